use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A named list that owns todo items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    /// Set on every mutation; `None` until the list is first updated.
    pub updated_date: Option<DateTime<Utc>>,
}

impl TodoList {
    /// Creates a new list with a fresh ID and the current timestamp.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            created_date: Utc::now(),
            updated_date: None,
        }
    }

    /// Sets the description for this list.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a specific ID for this list (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_date(mut self, created_date: DateTime<Utc>) -> Self {
        self.created_date = created_date;
        self
    }
}

/// Progress state of a todo item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemState {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ItemState {
    /// Returns the wire/storage representation of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemState::NotStarted => "not-started",
            ItemState::InProgress => "in-progress",
            ItemState::Completed => "completed",
        }
    }
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known [`ItemState`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown item state: {0}")]
pub struct ParseItemStateError(pub String);

impl FromStr for ItemState {
    type Err = ParseItemStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "not-started" => Ok(ItemState::NotStarted),
            "in-progress" => Ok(ItemState::InProgress),
            "completed" => Ok(ItemState::Completed),
            _ => Err(ParseItemStateError(s.to_string())),
        }
    }
}

/// A single item belonging to exactly one [`TodoList`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: Uuid,
    /// The owning list. Never changes after creation.
    pub list_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub state: ItemState,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
}

impl TodoItem {
    /// Creates a new item in the given list with a fresh ID.
    pub fn new(list_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id,
            name: name.into(),
            description: None,
            state: ItemState::default(),
            due_date: None,
            completed_date: None,
            created_date: Utc::now(),
            updated_date: None,
        }
    }

    /// Sets the description for this item.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the state for this item.
    pub fn with_state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }

    /// Sets the due date for this item.
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets a specific ID for this item (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the creation timestamp (useful for testing).
    pub fn with_created_date(mut self, created_date: DateTime<Utc>) -> Self {
        self.created_date = created_date;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_state_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ItemState::NotStarted).unwrap(),
            r#""not-started""#
        );
        assert_eq!(
            serde_json::to_string(&ItemState::InProgress).unwrap(),
            r#""in-progress""#
        );
        assert_eq!(
            serde_json::to_string(&ItemState::Completed).unwrap(),
            r#""completed""#
        );
    }

    #[test]
    fn test_item_state_from_str_matches_as_str() {
        for state in [
            ItemState::NotStarted,
            ItemState::InProgress,
            ItemState::Completed,
        ] {
            assert_eq!(state.as_str().parse::<ItemState>(), Ok(state));
        }
        assert_eq!("COMPLETED".parse::<ItemState>(), Ok(ItemState::Completed));
    }

    #[test]
    fn test_item_state_from_str_rejects_unknown() {
        let err = "archived".parse::<ItemState>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown item state: archived");
    }

    #[test]
    fn test_new_item_defaults() {
        let list_id = Uuid::new_v4();
        let item = TodoItem::new(list_id, "Milk");

        assert_eq!(item.list_id, list_id);
        assert_eq!(item.state, ItemState::NotStarted);
        assert!(item.description.is_none());
        assert!(item.updated_date.is_none());
    }

    #[test]
    fn test_item_json_uses_camel_case_fields() {
        let item = TodoItem::new(Uuid::nil(), "Milk");
        let json = serde_json::to_value(&item).unwrap();

        for field in [
            "id",
            "listId",
            "name",
            "description",
            "state",
            "dueDate",
            "completedDate",
            "createdDate",
            "updatedDate",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
    }

    #[test]
    fn test_list_builder() {
        let id = Uuid::new_v4();
        let list = TodoList::new("Groceries")
            .with_id(id)
            .with_description("Weekly shopping");

        assert_eq!(list.id, id);
        assert_eq!(list.name, "Groceries");
        assert_eq!(list.description.as_deref(), Some("Weekly shopping"));
    }
}
