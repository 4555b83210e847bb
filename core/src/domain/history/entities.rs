use chrono::{DateTime, Utc};

use crate::domain::{history::value_objects::HistoryParams, kitchen::value_objects::Mode};

/// Most recent entries kept per user.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryItem {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub display_title: String,
    pub params: HistoryParams,
}

impl HistoryItem {
    pub fn mode(&self) -> Mode {
        self.params.mode()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryItem {
    pub display_title: String,
    pub params: HistoryParams,
}

/// Puts `item` first and drops anything beyond [`HISTORY_LIMIT`].
pub fn prepend_capped(history: &mut Vec<HistoryItem>, item: HistoryItem) {
    history.insert(0, item);
    history.truncate(HISTORY_LIMIT);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: usize) -> HistoryItem {
        HistoryItem {
            id: n.to_string(),
            created_at: Utc::now(),
            display_title: format!("Entry {}", n),
            params: HistoryParams::Vision {
                vision_user_context: String::new(),
            },
        }
    }

    #[test]
    fn test_history_never_exceeds_limit() {
        let mut history = Vec::new();
        for n in 0..25 {
            prepend_capped(&mut history, item(n));
            assert!(history.len() <= HISTORY_LIMIT);
            assert_eq!(history[0].id, n.to_string());
        }
        assert_eq!(history.last().unwrap().id, "15");
    }
}
