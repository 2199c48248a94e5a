mod error;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::{ItemRepository, ListRepository, TodoRepository};
pub use types::{ItemQuery, Page};
