//! Database layer - task repository
//!
//! The pool lives in [`crate::engine::EngineProvider`]; repositories borrow it.

pub mod tasks;

pub use tasks::TaskRepo;
