//! Redis error mapping to CacheError.

use simpletodo_core::cache::CacheError;

/// Maps Redis errors to CacheError.
///
/// Unreachable servers become `ConnectionFailed` so callers answer with 503;
/// everything else is an `OperationFailed`.
pub fn map_redis_error(err: redis::RedisError) -> CacheError {
    if err.is_connection_refusal()
        || err.is_timeout()
        || err.is_connection_dropped()
        || err.is_io_error()
    {
        CacheError::ConnectionFailed(err.to_string())
    } else {
        CacheError::OperationFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_maps_to_connection_failed() {
        let err = redis::RedisError::from(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ));

        assert!(matches!(
            map_redis_error(err),
            CacheError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_response_error_maps_to_operation_failed() {
        let err = redis::RedisError::from((redis::ErrorKind::TypeError, "wrong type"));

        assert!(matches!(
            map_redis_error(err),
            CacheError::OperationFailed(_)
        ));
    }
}
