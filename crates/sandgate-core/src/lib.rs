//! Core constants shared across sandgate crates.
//!
//! This crate provides:
//! - Default configuration values
//! - Header names and identity constants for sandstorm authentication
//! - Error type constants for logging

pub mod defaults;
pub mod errors;

// Re-export commonly used items at crate root
pub use defaults::*;
pub use errors::*;

/// Project name.
pub const PROJECT_NAME: &str = "sandgate";
/// Project version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
