use serde::{Deserialize, Serialize};

use super::types::TodoItem;

/// Response representation of an item.
///
/// `from_cache` is decoration applied at serve time and is never persisted,
/// neither in the store nor in the cached snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: TodoItem,
    pub from_cache: bool,
}

impl ItemView {
    /// Decorates every item of a collection with the same origin marker.
    pub fn decorate(items: Vec<TodoItem>, from_cache: bool) -> Vec<Self> {
        items
            .into_iter()
            .map(|item| Self { item, from_cache })
            .collect()
    }
}

impl From<TodoItem> for ItemView {
    fn from(item: TodoItem) -> Self {
        Self {
            item,
            from_cache: false,
        }
    }
}
