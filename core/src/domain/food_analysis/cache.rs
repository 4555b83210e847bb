use indexmap::IndexMap;
use sha2::{Digest, Sha256};

use crate::domain::food_analysis::entities::FoodAnalysis;

pub const DEFAULT_CACHE_CAPACITY: usize = 16;

/// Hex SHA-256 of the exact image bytes sent for analysis.
pub fn content_key(image_data: &[u8]) -> String {
    hex::encode(Sha256::digest(image_data))
}

/// Session-local memo of analysis results, least recently used evicted first.
#[derive(Debug, Clone)]
pub struct AnalysisCache {
    entries: IndexMap<String, FoodAnalysis>,
    capacity: usize,
}

impl Default for AnalysisCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl AnalysisCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&mut self, key: &str) -> Option<FoodAnalysis> {
        let index = self.entries.get_index_of(key)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get_index(last).map(|(_, v)| v.clone())
    }

    pub fn insert(&mut self, key: String, analysis: FoodAnalysis) {
        self.entries.shift_remove(&key);
        if self.entries.len() >= self.capacity {
            self.entries.shift_remove_index(0);
        }
        self.entries.insert(key, analysis);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
