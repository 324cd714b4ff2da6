//! Specwright Common Library
//!
//! Shared data model, error taxonomy and configuration for the Specwright
//! generation and execution pipeline.

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::Settings;
pub use error::{Error, Result};
pub use types::*;
