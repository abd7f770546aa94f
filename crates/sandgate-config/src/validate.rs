//! Configuration validation logic.

use std::net::SocketAddr;

use http::HeaderName;
use sandgate_auth::is_valid;

use crate::Config;
use crate::loader::ConfigError;

const STORE_BACKENDS: [&str; 2] = ["memory", "sql"];
const LOG_FORMATS: [&str; 3] = ["json", "pretty", "compact"];
const LOG_OUTPUTS: [&str; 2] = ["stdout", "stderr"];

pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.listen.trim().is_empty() {
        return Err(ConfigError::Validation("server.listen is empty".into()));
    }
    if config.server.listen.parse::<SocketAddr>().is_err() {
        return Err(ConfigError::Validation(format!(
            "server.listen is not a socket address: {}",
            config.server.listen
        )));
    }
    if config.server.root.trim().is_empty() {
        return Err(ConfigError::Validation("server.root is empty".into()));
    }
    if config.server.shutdown_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "server.shutdown_timeout_secs must be > 0".into(),
        ));
    }
    if config.sandstorm.user_header.trim().is_empty() {
        return Err(ConfigError::Validation(
            "sandstorm.user_header is empty".into(),
        ));
    }
    // An unparseable name would never match, leaving every request anonymous.
    if HeaderName::from_bytes(config.sandstorm.user_header.as_bytes()).is_err() {
        return Err(ConfigError::Validation(format!(
            "sandstorm.user_header is not a valid header name: {:?}",
            config.sandstorm.user_header
        )));
    }
    if let Some(prefix) = &config.sandstorm.field_header_prefix {
        if prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sandstorm.field_header_prefix is empty; omit it to disable header fields".into(),
            ));
        }
        if HeaderName::from_bytes(prefix.as_bytes()).is_err() {
            return Err(ConfigError::Validation(format!(
                "sandstorm.field_header_prefix is not a valid header name prefix: {:?}",
                prefix
            )));
        }
    }
    if let Some(key) = config.sandstorm.fields.keys().find(|k| !is_valid(k)) {
        return Err(ConfigError::Validation(format!(
            "sandstorm.fields: unknown field {:?}",
            key
        )));
    }
    if config.defaults.perm.admin && !config.defaults.perm.is_consistent() {
        return Err(ConfigError::Validation(
            "defaults.perm: admin requires every other permission".into(),
        ));
    }
    if !STORE_BACKENDS.contains(&config.store.backend.as_str()) {
        return Err(ConfigError::Validation(format!(
            "store.backend must be one of: {:?}",
            STORE_BACKENDS
        )));
    }
    if config.store.backend == "sql"
        && config
            .store
            .database_url
            .as_deref()
            .is_none_or(|url| url.trim().is_empty())
    {
        return Err(ConfigError::Validation(
            "store.database_url is required for the sql backend".into(),
        ));
    }
    if config.store.max_connections == 0 {
        return Err(ConfigError::Validation(
            "store.max_connections must be > 0".into(),
        ));
    }
    if config.store.min_connections > config.store.max_connections {
        return Err(ConfigError::Validation(
            "store.min_connections must not exceed store.max_connections".into(),
        ));
    }
    if let Some(format) = &config.logging.format
        && !LOG_FORMATS.contains(&format.as_str())
    {
        return Err(ConfigError::Validation(format!(
            "logging.format must be one of: {:?}",
            LOG_FORMATS
        )));
    }
    if let Some(output) = &config.logging.output
        && !LOG_OUTPUTS.contains(&output.as_str())
    {
        return Err(ConfigError::Validation(format!(
            "logging.output must be one of: {:?}",
            LOG_OUTPUTS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(config: &Config, needle: &str) {
        match validate_config(config) {
            Err(ConfigError::Validation(msg)) => {
                assert!(msg.contains(needle), "{msg:?} does not mention {needle:?}")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        validate_config(&Config::default()).unwrap();
    }

    #[test]
    fn test_listen() {
        let mut config = Config::default();
        config.server.listen = " ".into();
        assert_invalid(&config, "server.listen is empty");

        config.server.listen = "localhost".into();
        assert_invalid(&config, "not a socket address");

        config.server.listen = "[::1]:8080".into();
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_root_required() {
        let mut config = Config::default();
        config.server.root = String::new();
        assert_invalid(&config, "server.root");
    }

    #[test]
    fn test_shutdown_timeout() {
        let mut config = Config::default();
        config.server.shutdown_timeout_secs = 0;
        assert_invalid(&config, "shutdown_timeout_secs");
    }

    #[test]
    fn test_unknown_static_field() {
        let mut config = Config::default();
        config.sandstorm.fields.insert("user.scope".into(), "/".into());
        validate_config(&config).unwrap();

        config
            .sandstorm
            .fields
            .insert("user.password".into(), "x".into());
        assert_invalid(&config, "user.password");
    }

    #[test]
    fn test_empty_field_prefix() {
        let mut config = Config::default();
        config.sandstorm.field_header_prefix = Some(String::new());
        assert_invalid(&config, "field_header_prefix");
    }

    #[test]
    fn test_user_header_must_be_header_name() {
        let mut config = Config::default();
        config.sandstorm.user_header = "X Sandstorm User".into();
        assert_invalid(&config, "not a valid header name");

        config.sandstorm.user_header = "X-Remote-User:".into();
        assert_invalid(&config, "sandstorm.user_header");

        config.sandstorm.user_header = "X-Remote-User".into();
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_field_prefix_must_be_header_name() {
        let mut config = Config::default();
        config.sandstorm.field_header_prefix = Some("X Field ".into());
        assert_invalid(&config, "not a valid header name prefix");

        config.sandstorm.field_header_prefix = Some("X-Sandgate-Field-".into());
        validate_config(&config).unwrap();
    }

    #[test]
    fn test_inconsistent_admin_defaults() {
        let mut config = Config::default();
        config.defaults.perm.admin = true;
        config.defaults.perm.share = false;
        assert_invalid(&config, "admin");
    }

    #[test]
    fn test_store() {
        let mut config = Config::default();
        config.store.backend = "redis".into();
        assert_invalid(&config, "store.backend");

        config.store.backend = "sql".into();
        assert_invalid(&config, "database_url");

        config.store.database_url = Some("sqlite:users.db".into());
        validate_config(&config).unwrap();

        config.store.min_connections = 6;
        assert_invalid(&config, "min_connections");

        config.store.min_connections = 0;
        config.store.max_connections = 0;
        assert_invalid(&config, "max_connections");
    }

    #[test]
    fn test_logging() {
        let mut config = Config::default();
        config.logging.format = Some("xml".into());
        assert_invalid(&config, "logging.format");

        config.logging.format = Some("json".into());
        config.logging.output = Some("file".into());
        assert_invalid(&config, "logging.output");
    }
}
