//! Sandstorm header authentication.
//!
//! The sandstorm proxy in front of the app authenticates the user and passes
//! the identity in `X-Sandstorm-User-Id`. This authenticator trusts that
//! header, provisions a user on first sight, and layers the request's trusted
//! fields over the stored record.

use async_trait::async_trait;
use http::HeaderMap;
use sandgate_core::defaults;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::fields::TrustedFields;
use crate::store::UserStore;
use crate::traits::{AuthRequest, Authenticator};
use crate::users::{AuthMethod, Permissions, ServerSettings, Settings, Sorting, User, ViewMode};

/// Authenticator that trusts a proxy-set identity header.
///
/// # Example
/// ```
/// use http::HeaderMap;
/// use sandgate_auth::SandstormAuth;
///
/// let auth = SandstormAuth::new();
/// assert_eq!(auth.identity(&HeaderMap::new()), "__sandstorm_anonymous");
/// ```
#[derive(Debug, Clone)]
pub struct SandstormAuth {
    user_header: String,
}

impl SandstormAuth {
    /// Method identifier.
    pub const METHOD: AuthMethod = AuthMethod::Sandstorm;

    /// Create an authenticator reading `X-Sandstorm-User-Id`.
    #[inline]
    pub fn new() -> Self {
        Self::with_header(defaults::SANDSTORM_USER_HEADER)
    }

    /// Create an authenticator reading the identity from another header.
    pub fn with_header(user_header: impl Into<String>) -> Self {
        Self {
            user_header: user_header.into(),
        }
    }

    /// Name of the identity header.
    #[inline]
    pub fn user_header(&self) -> &str {
        &self.user_header
    }

    /// Resolve the username from the identity header.
    ///
    /// A missing or empty header yields the anonymous sentinel.
    pub fn identity(&self, headers: &HeaderMap) -> String {
        headers
            .get(self.user_header.as_str())
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| defaults::SANDSTORM_ANONYMOUS_USER.to_string())
    }
}

impl Default for SandstormAuth {
    fn default() -> Self {
        Self::new()
    }
}

/// Layer trusted fields over `baseline`.
///
/// Every field defaults to the baseline value. Admin forces every other
/// permission on. Id, username and password always come from the baseline,
/// and the password is always locked.
pub fn merge_fields(baseline: &User, fields: &TrustedFields) -> User {
    let base = &baseline.perm;
    let is_admin = fields.get_boolean("user.perm.admin", base.admin);
    let perm = Permissions {
        admin: is_admin,
        execute: is_admin || fields.get_boolean("user.perm.execute", base.execute),
        create: is_admin || fields.get_boolean("user.perm.create", base.create),
        rename: is_admin || fields.get_boolean("user.perm.rename", base.rename),
        modify: is_admin || fields.get_boolean("user.perm.modify", base.modify),
        delete: is_admin || fields.get_boolean("user.perm.delete", base.delete),
        share: is_admin || fields.get_boolean("user.perm.share", base.share),
        download: is_admin || fields.get_boolean("user.perm.download", base.download),
    };

    let view_mode = fields.get_string("user.viewMode", baseline.view_mode.as_str());

    User {
        id: baseline.id,
        username: baseline.username.clone(),
        password: baseline.password.clone(),
        scope: fields.get_string("user.scope", &baseline.scope),
        locale: fields.get_string("user.locale", &baseline.locale),
        view_mode: ViewMode::from(view_mode),
        single_click: fields.get_boolean("user.singleClick", baseline.single_click),
        sorting: Sorting {
            by: fields.get_string("user.sorting.by", &baseline.sorting.by),
            asc: fields.get_boolean("user.sorting.asc", baseline.sorting.asc),
        },
        perm,
        commands: fields.get_array("user.commands", &baseline.commands),
        hide_dotfiles: fields.get_boolean("user.hideDotfiles", baseline.hide_dotfiles),
        lock_password: true,
    }
}

#[async_trait]
impl Authenticator for SandstormAuth {
    async fn authenticate(
        &self,
        request: AuthRequest<'_>,
        store: &dyn UserStore,
        settings: &Settings,
        server: &ServerSettings,
    ) -> Result<User, AuthError> {
        let username = self.identity(request.headers);
        let root = server.root.as_str();

        let existing = store.get(root, &username).await.map_err(|e| {
            let err = AuthError::Lookup(e);
            warn!(%username, root, error.type = err.error_type(), "could not look up user: {}", err);
            err
        })?;

        if let Some(existing) = existing {
            // Merged view only; the stored record is left as it was.
            debug!(%username, id = existing.id, "merging trusted fields into existing user");
            return Ok(merge_fields(&existing, request.fields));
        }

        let baseline = settings.defaults.new_user(username.as_str());
        let user = merge_fields(&baseline, request.fields);
        let saved = store.save(root, user).await.map_err(|e| {
            let err = AuthError::Persist(e);
            warn!(%username, root, error.type = err.error_type(), "could not save user: {}", err);
            err
        })?;

        info!(%username, id = saved.id, admin = saved.perm.admin, "provisioned new user");
        Ok(saved)
    }

    #[inline]
    fn requires_login_page(&self) -> bool {
        false
    }

    #[inline]
    fn method(&self) -> AuthMethod {
        Self::METHOD
    }
}
