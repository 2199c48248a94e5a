use serde::{Deserialize, Serialize};

use crate::todo::{ItemState, TodoItem};

/// Skip/batch pagination. Absent values mean "from the start" and "no limit".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub skip: Option<usize>,
    #[serde(default)]
    pub batch_size: Option<usize>,
}

impl Page {
    /// A page covering every row.
    pub fn all() -> Self {
        Self::default()
    }

    /// Creates a page with explicit bounds.
    pub fn new(skip: usize, batch_size: usize) -> Self {
        Self {
            skip: Some(skip),
            batch_size: Some(batch_size),
        }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> usize {
        self.skip.unwrap_or(0)
    }

    /// Applies this page to an already ordered sequence.
    pub fn apply<T>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        let rows = rows.into_iter().skip(self.offset());
        match self.batch_size {
            Some(limit) => rows.take(limit).collect(),
            None => rows.collect(),
        }
    }
}

/// Filter for item queries.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ItemQuery {
    pub state: Option<ItemState>,
    pub page: Page,
}

impl ItemQuery {
    /// Every item of the list, unfiltered.
    pub fn all() -> Self {
        Self::default()
    }

    /// Items in the given state.
    pub fn by_state(state: ItemState) -> Self {
        Self {
            state: Some(state),
            page: Page::all(),
        }
    }

    /// Sets the page for this query.
    pub fn with_page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Returns true if `item` passes the state filter.
    pub fn matches(&self, item: &TodoItem) -> bool {
        self.state.is_none_or(|state| item.state == state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_page_all_returns_everything() {
        assert_eq!(Page::all().apply(1..=5), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_skip_and_batch() {
        assert_eq!(Page::new(1, 2).apply(1..=5), vec![2, 3]);
    }

    #[test]
    fn test_page_skip_only() {
        let page = Page {
            skip: Some(3),
            batch_size: None,
        };
        assert_eq!(page.apply(1..=5), vec![4, 5]);
    }

    #[test]
    fn test_page_skip_past_end_is_empty() {
        assert!(Page::new(10, 2).apply(1..=5).is_empty());
    }

    #[test]
    fn test_page_deserializes_camel_case() {
        let page: Page = serde_json::from_str(r#"{"skip":2,"batchSize":3}"#).unwrap();
        assert_eq!(page, Page::new(2, 3));
    }

    #[test]
    fn test_item_query_state_filter() {
        let item = TodoItem::new(Uuid::new_v4(), "Milk").with_state(ItemState::InProgress);

        assert!(ItemQuery::all().matches(&item));
        assert!(ItemQuery::by_state(ItemState::InProgress).matches(&item));
        assert!(!ItemQuery::by_state(ItemState::Completed).matches(&item));
    }
}
