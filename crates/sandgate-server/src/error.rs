//! Server error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sandgate_auth::{AuthError, StoreError};
use sandgate_config::ConfigError;
use sandgate_core::{ERROR_AUTH, ERROR_CONFIG, ERROR_IO};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("config: {0}")]
    Config(String),
    #[error("store: {0}")]
    Store(#[from] StoreError),
    #[error("auth: {0}")]
    Auth(#[from] AuthError),
    #[error("not authenticated")]
    Unauthenticated,
}

impl From<ConfigError> for ServerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => ServerError::Io(e),
            other => ServerError::Config(other.to_string()),
        }
    }
}

impl ServerError {
    /// Get the error type string for logging.
    pub fn error_type(&self) -> &'static str {
        match self {
            ServerError::Io(_) => ERROR_IO,
            ServerError::Config(_) => ERROR_CONFIG,
            ServerError::Store(e) => e.error_type(),
            ServerError::Auth(e) => e.error_type(),
            ServerError::Unauthenticated => ERROR_AUTH,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ServerError::Unauthenticated => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // Store errors can carry connection details; keep them in the logs.
        let message = match &self {
            ServerError::Auth(_) => "authentication failed".to_string(),
            other => other.to_string(),
        };
        (
            self.status(),
            Json(serde_json::json!({
                "error": message,
                "type": self.error_type(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_errors_are_internal() {
        let err = ServerError::from(AuthError::Lookup(StoreError::backend("db down")));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_type(), "lookup");

        let err = ServerError::from(AuthError::Persist(StoreError::backend("db down")));
        assert_eq!(err.error_type(), "persist");
    }

    #[test]
    fn test_unauthenticated_is_401() {
        let response = ServerError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_config_error_conversion() {
        let err = ServerError::from(ConfigError::Validation("server.root is empty".into()));
        assert!(matches!(err, ServerError::Config(ref m) if m.contains("server.root")));
    }
}
