//! SQLite storage backend implementation.
//!
//! Uses `rusqlite` for synchronous operations and `tokio-rusqlite` to run them
//! on a dedicated thread. Lock contention is retried inside SQLite through the
//! connection's busy timeout.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
