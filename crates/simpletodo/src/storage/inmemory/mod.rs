//! In-memory storage backend.
//!
//! Keeps lists and items in HashMaps wrapped in `Arc<RwLock<_>>`. Nothing is
//! persisted, which makes it the default backend for tests and local runs.
//!
//! # Example
//!
//! ```rust,ignore
//! use simpletodo::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! repo.create_list(&TodoList::new("Groceries")).await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
