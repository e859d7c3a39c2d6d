//! Domain layer for the task list.
//!
//! Pure types with no I/O:
//!
//! - [`task`]: the persisted `Task` record and its validated parts
//! - [`filter`]: the request-scoped view selector

pub mod filter;
pub mod task;

pub use filter::{FILTER_PARAM, Filter};
pub use task::{NewTask, Task, TaskId, TaskTitle, TaskValidationError};
