//! Error type constants for logging.
//!
//! These constants provide consistent error classification across all crates.

/// User store lookup failed for a reason other than "not found".
pub const ERROR_LOOKUP: &str = "lookup";
/// Saving a newly provisioned user failed.
pub const ERROR_PERSIST: &str = "persist";
/// Generic user store error.
pub const ERROR_STORE: &str = "store";
/// I/O error.
pub const ERROR_IO: &str = "io";
/// Configuration error.
pub const ERROR_CONFIG: &str = "config";
/// Authentication error.
pub const ERROR_AUTH: &str = "auth";
