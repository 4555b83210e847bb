use std::collections::HashSet;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ShoppingLink {
    pub title: String,
    #[serde(alias = "uri")]
    pub url: String,
}

/// Drops links without a URL and keeps the first link seen for each URL.
pub fn dedupe_links(links: impl IntoIterator<Item = ShoppingLink>) -> Vec<ShoppingLink> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| !link.url.trim().is_empty())
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}

/// Ingredient names the user intends to buy, in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingList {
    items: IndexSet<String>,
}

impl ShoppingList {
    pub fn add_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            let item = item.into();
            if !item.trim().is_empty() {
                self.items.insert(item);
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> Vec<String> {
        self.items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
