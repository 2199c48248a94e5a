//! Redis cache backend implementation.
//!
//! Shares one reconnecting connection across instances of the service.

mod cache;
mod error;

pub use cache::RedisCache;
