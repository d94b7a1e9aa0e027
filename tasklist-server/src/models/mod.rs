//! Domain models with validation at construction
//!
//! Client input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod task;
pub mod validation;

pub use task::{NewTask, Task, TaskCreate, TaskDescription, TaskTitle};
pub use validation::ValidationError;
