//! Pure functions mapping core errors to HTTP status codes.
//!
//! | Error | Status |
//! |-------|--------|
//! | `RepositoryError::NotFound` | 404 |
//! | `RepositoryError::AlreadyExists` | 409 |
//! | `RepositoryError::InvalidData` | 400 |
//! | `RepositoryError::ConnectionFailed`, `CacheError::ConnectionFailed` | 503 |
//! | everything else | 500 |
//!
//! A cache outage maps to 503 just like a store outage: the item listing has
//! no path that bypasses the cache.

use crate::cache::CacheError;
use crate::storage::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// ```
/// use simpletodo_core::http_mapping::repository_error_to_status_code;
/// use simpletodo_core::storage::RepositoryError;
///
/// let error = RepositoryError::NotFound {
///     entity_type: "TodoList",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. } => 409,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 400,
    }
}

/// Maps a [`CacheError`] to an HTTP status code.
pub fn cache_error_to_status_code(error: &CacheError) -> u16 {
    match error {
        CacheError::ConnectionFailed(_) => 503,
        CacheError::OperationFailed(_) | CacheError::Serialization(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_statuses() {
        let cases = [
            (
                RepositoryError::NotFound {
                    entity_type: "TodoItem",
                    id: "item-1".to_string(),
                },
                404,
            ),
            (
                RepositoryError::AlreadyExists {
                    entity_type: "TodoList",
                    id: "list-1".to_string(),
                },
                409,
            ),
            (RepositoryError::ConnectionFailed("refused".to_string()), 503),
            (RepositoryError::QueryFailed("syntax".to_string()), 500),
            (RepositoryError::Serialization("bad row".to_string()), 500),
            (RepositoryError::InvalidData("foreign key".to_string()), 400),
        ];

        for (error, status) in cases {
            assert_eq!(repository_error_to_status_code(&error), status, "{error}");
        }
    }

    #[test]
    fn test_cache_connection_failure_is_unavailable() {
        let error = CacheError::ConnectionFailed("connection refused".to_string());
        assert_eq!(cache_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_cache_operation_failure_is_internal() {
        assert_eq!(
            cache_error_to_status_code(&CacheError::OperationFailed("OOM".to_string())),
            500
        );
        assert_eq!(
            cache_error_to_status_code(&CacheError::Serialization("eof".to_string())),
            500
        );
    }
}
