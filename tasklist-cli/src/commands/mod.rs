//! Command implementations for the tasklist CLI

pub mod check;
pub mod normalize;
pub mod serve;

// Re-export main dispatcher functions for flat access from main.rs
pub use check::run_check;
pub use normalize::run_normalize;
pub use serve::run_serve;
