use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Shorthand for a missing list.
    pub fn list_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "TodoList",
            id: id.to_string(),
        }
    }

    /// Shorthand for a missing item.
    pub fn item_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "TodoItem",
            id: id.to_string(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_not_found_display() {
        let error = RepositoryError::list_not_found("abc-123");
        assert_eq!(error.to_string(), "TodoList not found: abc-123");
    }

    #[test]
    fn test_item_not_found_display() {
        let error = RepositoryError::item_not_found("def-456");
        assert_eq!(error.to_string(), "TodoItem not found: def-456");
    }

    #[test]
    fn test_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "TodoList",
            id: "groceries".to_string(),
        };
        assert_eq!(error.to_string(), "TodoList already exists: groceries");
    }

    #[test]
    fn test_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("database is locked".to_string());
        assert_eq!(error.to_string(), "Connection failed: database is locked");
    }
}
