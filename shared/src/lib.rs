//! Recipe App Shared Library
//!
//! This crate contains the API types, validation rules and small utilities
//! shared between the backend and its clients.

pub mod calc;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use calc::{add, subtract};
pub use types::*;
