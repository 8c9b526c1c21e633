//! Data model for the todo service.
//!
//! Holds the persisted [`TodoTask`] record, the request payloads accepted by
//! the HTTP layer, create-time validation and the allow-listed merge used by
//! partial edits. Nothing in here performs I/O.

pub mod due_date;
mod error;
mod payload;
mod task;

pub use error::ValidationError;
pub use payload::{CreateTodoTask, EditTodoTask, NewTodoTask, TodoChanges};
pub use task::{Priority, TodoTask};
