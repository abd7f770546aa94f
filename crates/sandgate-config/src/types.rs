//! Configuration types.

use std::collections::{BTreeMap, HashMap};

use sandgate_auth::{AuthMethod, ServerSettings, Settings, UserDefaults};
use serde::{Deserialize, Serialize};

use crate::defaults::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Defaults for users provisioned on first login.
    ///
    /// Takes the user record's camelCase keys (`viewMode`, `hideDotfiles`)
    /// or their snake_case spellings.
    #[serde(default)]
    pub defaults: UserDefaults,
    #[serde(default)]
    pub sandstorm: SandstormConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Global settings handed to the authenticator.
    pub fn settings(&self) -> Settings {
        Settings {
            auth_method: AuthMethod::Sandstorm,
            defaults: self.defaults.clone(),
        }
    }

    /// Server settings handed to the authenticator.
    pub fn server_settings(&self) -> ServerSettings {
        ServerSettings {
            root: self.server.root.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen address, e.g. `127.0.0.1:8080`.
    #[serde(default = "default_listen")]
    pub listen: String,
    /// Root of the served tree. Users are stored per root.
    #[serde(default = "default_root")]
    pub root: String,
    /// Time allowed for in-flight requests after a shutdown signal.
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            root: default_root(),
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
        }
    }
}

/// Where trusted identity and fields come from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandstormConfig {
    /// Header carrying the username.
    #[serde(default = "default_user_header")]
    pub user_header: String,
    /// Prefix of request headers that carry trusted fields, e.g.
    /// `X-Sandgate-Field-` makes `X-Sandgate-Field-user.perm.admin` set
    /// `user.perm.admin`. Unset disables per-request fields.
    ///
    /// Only set this when the proxy strips these headers from client
    /// requests.
    #[serde(default)]
    pub field_header_prefix: Option<String>,
    /// Trusted fields applied to every request.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Default for SandstormConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
            field_header_prefix: None,
            fields: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend: memory or sql.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Database URL for the sql backend.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open when idle; at most `max_connections`.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Create the users table on startup.
    #[serde(default = "default_init_schema")]
    pub init_schema: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            database_url: None,
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
            init_schema: default_init_schema(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// Log format: json, pretty, or compact. Default: pretty.
    pub format: Option<String>,
    /// Output target: stdout or stderr. Default: stderr.
    pub output: Option<String>,
    /// Per-module log level filters (e.g., {"sandgate_auth": "debug", "sqlx": "warn"}).
    #[serde(default)]
    pub filters: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.server.listen, "127.0.0.1:8080");
        assert_eq!(cfg.server.root, "/srv");
        assert_eq!(cfg.server.shutdown_timeout_secs, 10);
        assert_eq!(cfg.sandstorm.user_header, "X-Sandstorm-User-Id");
        assert_eq!(cfg.store.backend, "memory");
        assert!(cfg.store.database_url.is_none());
        assert_eq!(cfg.store.min_connections, 1);
        assert!(cfg.logging.level.is_none());
    }

    #[test]
    fn config_deserialize_empty() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.server.root, "/srv");
        assert_eq!(cfg.defaults, UserDefaults::default());
        assert!(cfg.sandstorm.fields.is_empty());
    }

    #[test]
    fn settings_from_config() {
        let mut cfg = Config::default();
        cfg.server.root = "/data".into();
        cfg.defaults.locale = "pt".into();

        assert_eq!(cfg.server_settings().root, "/data");
        let settings = cfg.settings();
        assert_eq!(settings.auth_method, AuthMethod::Sandstorm);
        assert_eq!(settings.defaults.locale, "pt");
    }
}
