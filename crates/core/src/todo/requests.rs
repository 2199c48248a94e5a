//! API request types for list and item operations.
//!
//! The same payload shape is used for create and update. Updates overwrite
//! every mutable field, so omitting an optional field clears it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{ItemState, TodoItem, TodoList};

/// Request payload for creating or updating a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUpdateTodoList {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateUpdateTodoList {
    /// Create a new request with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Set the list description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Converts the request into a new list.
    pub fn into_list(self) -> TodoList {
        let mut list = TodoList::new(self.name);
        list.description = self.description;
        list
    }

    /// Overwrites the mutable fields of `list` and stamps `updated_date`.
    pub fn apply_to(self, list: &mut TodoList, now: DateTime<Utc>) {
        list.name = self.name;
        list.description = self.description;
        list.updated_date = Some(now);
    }
}

/// Request payload for creating or updating an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateTodoItem {
    pub name: String,
    #[serde(default)]
    pub state: ItemState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateUpdateTodoItem {
    /// Create a new request with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ItemState::default(),
            due_date: None,
            completed_date: None,
            description: None,
        }
    }

    /// Set the item state.
    pub fn with_state(mut self, state: ItemState) -> Self {
        self.state = state;
        self
    }

    /// Set the item description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Converts the request into a new item of `list_id`.
    ///
    /// Only name, description and state are taken. Due and completion dates
    /// are set through updates.
    pub fn into_item(self, list_id: Uuid) -> TodoItem {
        let mut item = TodoItem::new(list_id, self.name);
        item.description = self.description;
        item.state = self.state;
        item
    }

    /// Overwrites the mutable fields of `item` and stamps `updated_date`.
    pub fn apply_to(self, item: &mut TodoItem, now: DateTime<Utc>) {
        item.name = self.name;
        item.description = self.description;
        item.completed_date = self.completed_date;
        item.due_date = self.due_date;
        item.state = self.state;
        item.updated_date = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_item_request_state_defaults_to_not_started() {
        let request: CreateUpdateTodoItem = serde_json::from_str(r#"{"name":"Milk"}"#).unwrap();
        assert_eq!(request.state, ItemState::NotStarted);
        assert!(request.due_date.is_none());
    }

    #[test]
    fn test_item_request_rejects_unknown_state() {
        let result: Result<CreateUpdateTodoItem, _> =
            serde_json::from_str(r#"{"name":"Milk","state":"archived"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_into_item_ignores_dates() {
        let request = CreateUpdateTodoItem {
            due_date: Some(fixed_timestamp()),
            completed_date: Some(fixed_timestamp()),
            ..CreateUpdateTodoItem::new("Milk").with_state(ItemState::InProgress)
        };
        let list_id = Uuid::new_v4();

        let item = request.into_item(list_id);

        assert_eq!(item.list_id, list_id);
        assert_eq!(item.state, ItemState::InProgress);
        assert!(item.due_date.is_none());
        assert!(item.completed_date.is_none());
    }

    #[test]
    fn test_item_apply_to_overwrites_fields() {
        let mut item = TodoItem::new(Uuid::new_v4(), "Milk").with_description("2 litres");
        let request = CreateUpdateTodoItem {
            completed_date: Some(fixed_timestamp()),
            ..CreateUpdateTodoItem::new("Oat milk").with_state(ItemState::Completed)
        };

        request.apply_to(&mut item, fixed_timestamp());

        assert_eq!(item.name, "Oat milk");
        assert_eq!(item.state, ItemState::Completed);
        assert_eq!(item.completed_date, Some(fixed_timestamp()));
        // Omitted description clears the previous one
        assert!(item.description.is_none());
        assert_eq!(item.updated_date, Some(fixed_timestamp()));
    }

    #[test]
    fn test_list_apply_to_stamps_updated_date() {
        let mut list = TodoList::new("Groceries");
        CreateUpdateTodoList::new("Errands")
            .with_description("Saturday")
            .apply_to(&mut list, fixed_timestamp());

        assert_eq!(list.name, "Errands");
        assert_eq!(list.description.as_deref(), Some("Saturday"));
        assert_eq!(list.updated_date, Some(fixed_timestamp()));
    }
}
