mod requests;
mod types;
mod view;

pub use requests::{CreateUpdateTodoItem, CreateUpdateTodoList};
pub use types::{ItemState, ParseItemStateError, TodoItem, TodoList};
pub use view::ItemView;
