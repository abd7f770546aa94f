//! Default configuration values.
//!
//! Centralized default constants for use across all crates.

// ============================================================================
// Sandstorm Identity
// ============================================================================

/// Header carrying the identity asserted by the sandstorm proxy.
pub const SANDSTORM_USER_HEADER: &str = "X-Sandstorm-User-Id";
/// Username used when the identity header is missing or empty.
pub const SANDSTORM_ANONYMOUS_USER: &str = "__sandstorm_anonymous";
/// Password stored for provisioned users. Never used for verification.
pub const SANDSTORM_PLACEHOLDER_PASSWORD: &str = "empty";
/// Name of the sandstorm authentication method.
pub const AUTH_METHOD_SANDSTORM: &str = "sandstorm";

// ============================================================================
// Server Defaults
// ============================================================================

/// Default HTTP listen address.
pub const DEFAULT_LISTEN: &str = "127.0.0.1:8080";
/// Default server root, used as the user store partition key.
pub const DEFAULT_ROOT: &str = "/srv";
/// Default graceful shutdown timeout in seconds.
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// User Defaults
// ============================================================================

/// Default user scope, relative to the server root.
pub const DEFAULT_USER_SCOPE: &str = ".";
/// Default user locale.
pub const DEFAULT_USER_LOCALE: &str = "en";
/// Default sort field.
pub const DEFAULT_SORTING_BY: &str = "name";

// ============================================================================
// Store Defaults
// ============================================================================

/// Default user store backend.
pub const DEFAULT_STORE_BACKEND: &str = "memory";
/// Default SQL pool size.
pub const DEFAULT_SQL_MAX_CONNECTIONS: u32 = 5;
/// Connections the SQL pool keeps open when idle.
pub const DEFAULT_SQL_MIN_CONNECTIONS: u32 = 1;
/// Default SQL connect timeout in seconds.
pub const DEFAULT_SQL_CONNECT_TIMEOUT_SECS: u64 = 30;
/// Create the users table on startup.
pub const DEFAULT_STORE_INIT_SCHEMA: bool = true;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Default log format.
pub const DEFAULT_LOG_FORMAT: &str = "pretty";
/// Default log output.
pub const DEFAULT_LOG_OUTPUT: &str = "stderr";
