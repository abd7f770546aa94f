//! Per-request authentication inputs derived from configuration.

use std::sync::Arc;

use axum::http::HeaderMap;
use parking_lot::RwLock;
use sandgate_auth::{ServerSettings, Settings, TrustedFields};
use sandgate_config::Config;
use tracing::debug;

/// Settings and trusted-field sources handed to the authenticator.
#[derive(Debug, Clone, Default)]
pub struct AuthPolicy {
    pub settings: Settings,
    pub server: ServerSettings,
    /// Fields applied to every request.
    pub static_fields: TrustedFields,
    /// Prefix of headers carrying per-request fields; `None` disables them.
    pub field_header_prefix: Option<String>,
}

impl AuthPolicy {
    pub fn from_config(config: &Config) -> Self {
        Self {
            settings: config.settings(),
            server: config.server_settings(),
            static_fields: TrustedFields::from_pairs(&config.sandstorm.fields),
            field_header_prefix: config.sandstorm.field_header_prefix.clone(),
        }
    }

    /// Trusted fields for one request.
    ///
    /// Starts from the static fields; headers named `<prefix><field>` override
    /// them. Header names are matched without regard to case.
    pub fn request_fields(&self, headers: &HeaderMap) -> TrustedFields {
        let mut fields = self.static_fields.clone();
        let Some(prefix) = self.field_header_prefix.as_deref() else {
            return fields;
        };

        for (name, value) in headers {
            let name = name.as_str();
            let Some(key) = name
                .get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .and_then(|_| name.get(prefix.len()..))
            else {
                continue;
            };
            match std::str::from_utf8(value.as_bytes()) {
                Ok(value) => {
                    fields.insert(key, value);
                }
                Err(_) => debug!(header = name, "ignoring non-utf8 trusted field header"),
            }
        }
        fields
    }
}

/// A policy that can be swapped at runtime.
///
/// Uses `parking_lot::RwLock` which doesn't poison on panic. In-flight
/// requests keep the snapshot they started with.
#[derive(Debug)]
pub struct ReloadablePolicy {
    inner: RwLock<Arc<AuthPolicy>>,
}

impl ReloadablePolicy {
    pub fn new(policy: AuthPolicy) -> Self {
        Self {
            inner: RwLock::new(Arc::new(policy)),
        }
    }

    /// Replace the policy.
    pub fn reload(&self, policy: AuthPolicy) {
        *self.inner.write() = Arc::new(policy);
    }

    /// Get a clone of the current policy Arc.
    #[inline]
    pub fn get(&self) -> Arc<AuthPolicy> {
        self.inner.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn policy(prefix: Option<&str>) -> AuthPolicy {
        let mut config = Config::default();
        config
            .sandstorm
            .fields
            .insert("user.locale".into(), "fr".into());
        config
            .sandstorm
            .fields
            .insert("user.scope".into(), "/shared".into());
        config.sandstorm.field_header_prefix = prefix.map(str::to_string);
        AuthPolicy::from_config(&config)
    }

    #[test]
    fn test_static_fields_only_without_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert("x-field-user.locale", HeaderValue::from_static("de"));

        let fields = policy(None).request_fields(&headers);
        assert_eq!(fields.get("user.locale"), Some("fr"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_header_fields_override_static() {
        let mut headers = HeaderMap::new();
        headers.insert("x-field-user.locale", HeaderValue::from_static("de"));
        headers.insert("x-field-user.perm.admin", HeaderValue::from_static("true"));
        headers.insert("x-field-user.viewmode", HeaderValue::from_static("mosaic"));
        headers.insert("x-field-user.password", HeaderValue::from_static("x"));
        headers.insert("x-other", HeaderValue::from_static("1"));

        let fields = policy(Some("X-Field-")).request_fields(&headers);
        assert_eq!(fields.get("user.locale"), Some("de"));
        assert_eq!(fields.get("user.scope"), Some("/shared"));
        assert_eq!(fields.get("user.perm.admin"), Some("true"));
        assert_eq!(fields.get("user.viewMode"), Some("mosaic"));
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn test_utf8_header_values_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-field-user.scope",
            HeaderValue::from_bytes("/données".as_bytes()).unwrap(),
        );
        headers.insert(
            "x-field-user.locale",
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );

        let fields = policy(Some("X-Field-")).request_fields(&headers);
        assert_eq!(fields.get("user.scope"), Some("/données"));
        // Invalid UTF-8 leaves the static value in place
        assert_eq!(fields.get("user.locale"), Some("fr"));
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let reloadable = ReloadablePolicy::new(policy(None));
        let before = reloadable.get();

        reloadable.reload(policy(Some("X-Field-")));
        assert!(before.field_header_prefix.is_none());
        assert_eq!(
            reloadable.get().field_header_prefix.as_deref(),
            Some("X-Field-")
        );
    }
}
