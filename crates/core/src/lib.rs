//! Functional core for simpletodo.
//!
//! Pure domain types, repository and cache traits, cache keys and the cached
//! snapshot codec. Nothing in this crate performs I/O; the `simpletodo` binary
//! provides the concrete backends.

pub mod cache;
pub mod http_mapping;
pub mod storage;
pub mod todo;
