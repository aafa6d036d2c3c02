//! Error handling
//!
//! Defines error types and handling for storage operations.

pub mod handlers;
pub mod types;

pub use types::*;
