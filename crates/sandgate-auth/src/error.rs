//! Authentication and user store error types.

use sandgate_core::{ERROR_LOOKUP, ERROR_PERSIST, ERROR_STORE};

/// Error reported by a [`UserStore`](crate::UserStore) implementation.
///
/// "Not found" is not an error: stores return `Ok(None)` for it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend error (database, I/O, etc.).
    #[error("backend error: {0}")]
    Backend(String),

    /// A record for the same root and username already exists.
    #[error("user {username:?} already exists under {root:?}")]
    Conflict { root: String, username: String },

    /// A record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Create a backend error from any error type.
    #[inline]
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }

    /// Get the error type string for logging.
    pub fn error_type(&self) -> &'static str {
        ERROR_STORE
    }
}

#[cfg(feature = "sql")]
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Backend(err.to_string())
    }
}

/// Authentication error.
///
/// Both variants abort the request; the store error that caused them is kept
/// as the error source.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Looking up the user failed.
    #[error("user lookup failed: {0}")]
    Lookup(#[source] StoreError),

    /// Saving a newly provisioned user failed.
    #[error("saving provisioned user failed: {0}")]
    Persist(#[source] StoreError),
}

impl AuthError {
    /// Get the error type string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            AuthError::Lookup(_) => ERROR_LOOKUP,
            AuthError::Persist(_) => ERROR_PERSIST,
        }
    }

    /// The underlying store error.
    pub fn store_error(&self) -> &StoreError {
        match self {
            AuthError::Lookup(e) | AuthError::Persist(e) => e,
        }
    }
}
