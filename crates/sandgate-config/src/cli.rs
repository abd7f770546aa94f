//! CLI override definitions and application logic.

use clap::Parser;

use crate::Config;

#[derive(Debug, Clone, Parser, Default)]
pub struct CliOverrides {
    /// Override HTTP listen address, e.g. 0.0.0.0:8080
    #[arg(long)]
    pub listen: Option<String>,
    /// Override served root
    #[arg(long)]
    pub root: Option<String>,
    /// Override log level (trace/debug/info/warn/error)
    #[arg(long)]
    pub log_level: Option<String>,
    /// Override log format (json/pretty/compact)
    #[arg(long)]
    pub log_format: Option<String>,
    /// Override user store backend (memory/sql)
    #[arg(long)]
    pub store: Option<String>,
    /// Override database URL; implies the sql backend unless --store is given
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
    /// Read trusted fields from request headers with this prefix
    #[arg(long)]
    pub field_header_prefix: Option<String>,
}

pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) {
    if let Some(v) = &overrides.listen {
        config.server.listen = v.clone();
    }
    if let Some(v) = &overrides.root {
        config.server.root = v.clone();
    }
    if let Some(v) = &overrides.log_level {
        config.logging.level = Some(v.clone());
    }
    if let Some(v) = &overrides.log_format {
        config.logging.format = Some(v.clone());
    }
    if let Some(v) = &overrides.database_url {
        config.store.database_url = Some(v.clone());
        if overrides.store.is_none() {
            config.store.backend = "sql".into();
        }
    }
    if let Some(v) = &overrides.store {
        config.store.backend = v.clone();
    }
    if let Some(v) = &overrides.field_header_prefix {
        config.sandstorm.field_header_prefix = Some(v.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let overrides = CliOverrides {
            listen: Some("0.0.0.0:9999".into()),
            root: Some("/data".into()),
            log_level: Some("debug".into()),
            field_header_prefix: Some("X-Field-".into()),
            ..Default::default()
        };

        apply_overrides(&mut config, &overrides);
        assert_eq!(config.server.listen, "0.0.0.0:9999");
        assert_eq!(config.server.root, "/data");
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(
            config.sandstorm.field_header_prefix.as_deref(),
            Some("X-Field-")
        );
        assert_eq!(config.store.backend, "memory");
    }

    #[test]
    fn test_database_url_selects_sql() {
        let mut config = Config::default();
        let overrides = CliOverrides {
            database_url: Some("sqlite::memory:".into()),
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides);
        assert_eq!(config.store.backend, "sql");

        let mut config = Config::default();
        let overrides = CliOverrides {
            database_url: Some("sqlite::memory:".into()),
            store: Some("memory".into()),
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides);
        assert_eq!(config.store.backend, "memory");
    }

    #[test]
    fn test_empty_overrides_change_nothing() {
        let mut config = Config::default();
        apply_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config.server.listen, Config::default().server.listen);
        assert!(config.logging.level.is_none());
    }
}
