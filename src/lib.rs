//! # sandgate
//!
//! Trusted-header ("sandstorm") authentication for a web file manager.
//!
//! ## Crates
//!
//! - [`sandgate_core`] - Shared constants and defaults
//! - [`sandgate_auth`] - Trusted fields, user model, stores and the sandstorm authenticator
//! - [`sandgate_config`] - Configuration loading and validation
//! - [`sandgate_server`] - HTTP server

pub use sandgate_auth as auth;
pub use sandgate_config as config;
pub use sandgate_core as core;
pub use sandgate_server as server;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use sandgate_auth::{
        AuthError, AuthRequest, Authenticator, MemoryStore, SandstormAuth, TrustedFields, User,
        UserStore,
    };
    pub use sandgate_config::{Config, load_config, validate_config};
    pub use sandgate_server::{
        AppState, CancellationToken, CurrentUser, ServerError, run, run_with_shutdown,
    };
}
