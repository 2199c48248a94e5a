pub mod error;
pub mod health;
pub mod items;
pub mod lists;

pub use error::AppError;
