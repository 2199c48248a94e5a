use std::env;

use crate::storage::cached::InvalidationPolicy;

/// Application configuration loaded from environment variables.
///
/// Read once at process start; nothing re-reads the environment afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis host (default: "localhost")
    pub redis_host: String,
    /// Redis port (default: 6379)
    pub redis_port: u16,
    /// Redis password, empty for no authentication (default: "")
    pub redis_password: String,
    /// Maximum number of cache entries for the memory cache (default: 10,000)
    pub cache_max_entries: usize,
    /// Whether item updates invalidate the cached collection (default: false)
    pub cache_invalidate_on_update: bool,
    /// Path to SQLite database file (default: "simpletodo.db")
    pub sqlite_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REDIS_HOST` - Redis host (default: "localhost")
    /// - `REDIS_PORT` - Redis port (default: 6379)
    /// - `REDIS_PASSWORD` - Redis password (default: none)
    /// - `CACHE_MAX_ENTRIES` - Maximum memory cache entries (default: 10,000)
    /// - `CACHE_INVALIDATE_ON_UPDATE` - `true`/`1` to invalidate on item update (default: false)
    /// - `SQLITE_PATH` - SQLite database path (default: "simpletodo.db")
    pub fn from_env() -> Self {
        Self {
            redis_host: env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string()),
            redis_port: env::var("REDIS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(6379),
            redis_password: env::var("REDIS_PASSWORD").unwrap_or_default(),
            cache_max_entries: env::var("CACHE_MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(10_000),
            cache_invalidate_on_update: env::var("CACHE_INVALIDATE_ON_UPDATE")
                .ok()
                .is_some_and(|v| parse_flag(&v)),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "simpletodo.db".to_string()),
        }
    }

    /// Redis connection URL built from host, port and password.
    ///
    /// The password is percent-encoded so any character is accepted.
    #[cfg_attr(not(feature = "redis"), allow(dead_code))]
    pub fn redis_url(&self) -> String {
        if self.redis_password.is_empty() {
            format!("redis://{}:{}", self.redis_host, self.redis_port)
        } else {
            format!(
                "redis://:{}@{}:{}",
                urlencoding::encode(&self.redis_password),
                self.redis_host,
                self.redis_port
            )
        }
    }

    /// Which mutations invalidate a list's cached item collection.
    pub fn invalidation_policy(&self) -> InvalidationPolicy {
        if self.cache_invalidate_on_update {
            InvalidationPolicy::AllMutations
        } else {
            InvalidationPolicy::CreateDelete
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            redis_host: "cache.internal".to_string(),
            redis_port: 6380,
            redis_password: String::new(),
            cache_max_entries: 10_000,
            cache_invalidate_on_update: false,
            sqlite_path: "test.db".to_string(),
        }
    }

    #[test]
    fn test_redis_url_without_password() {
        assert_eq!(test_config().redis_url(), "redis://cache.internal:6380");
    }

    #[test]
    fn test_redis_url_encodes_password() {
        let config = Config {
            redis_password: "p@ss:w/rd".to_string(),
            ..test_config()
        };

        assert_eq!(
            config.redis_url(),
            "redis://:p%40ss%3Aw%2Frd@cache.internal:6380"
        );
    }

    #[test]
    fn test_invalidation_policy_defaults_to_create_delete() {
        assert_eq!(
            test_config().invalidation_policy(),
            InvalidationPolicy::CreateDelete
        );
    }

    #[test]
    fn test_invalidation_policy_all_mutations() {
        let config = Config {
            cache_invalidate_on_update: true,
            ..test_config()
        };

        assert_eq!(
            config.invalidation_policy(),
            InvalidationPolicy::AllMutations
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" 1 "));
        assert!(parse_flag("ON"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
