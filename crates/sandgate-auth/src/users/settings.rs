//! Process-wide settings consumed by authenticators.

use std::fmt;

use sandgate_core::defaults;
use serde::{Deserialize, Serialize};

use super::{Permissions, Sorting, User, ViewMode};

/// Supported authentication methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMethod {
    /// Trust the identity header set by a sandstorm proxy.
    #[default]
    Sandstorm,
}

impl AuthMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::Sandstorm => defaults::AUTH_METHOD_SANDSTORM,
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defaults applied to users created on first login.
///
/// Keys are camelCase like the user record; the snake_case spellings are
/// accepted as well so config files can use one style throughout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDefaults {
    pub scope: String,
    pub locale: String,
    #[serde(alias = "view_mode")]
    pub view_mode: ViewMode,
    #[serde(alias = "single_click")]
    pub single_click: bool,
    pub sorting: Sorting,
    pub perm: Permissions,
    pub commands: Vec<String>,
    #[serde(alias = "hide_dotfiles")]
    pub hide_dotfiles: bool,
}

impl Default for UserDefaults {
    fn default() -> Self {
        Self {
            scope: defaults::DEFAULT_USER_SCOPE.to_string(),
            locale: defaults::DEFAULT_USER_LOCALE.to_string(),
            view_mode: ViewMode::List,
            single_click: false,
            sorting: Sorting {
                by: defaults::DEFAULT_SORTING_BY.to_string(),
                asc: false,
            },
            perm: Permissions {
                admin: false,
                ..Permissions::all()
            },
            commands: Vec::new(),
            hide_dotfiles: false,
        }
    }
}

impl UserDefaults {
    /// Build an unsaved user from these defaults.
    ///
    /// The password is the fixed placeholder and the password is locked; the
    /// record is meant for header-authenticated users only.
    pub fn new_user(&self, username: impl Into<String>) -> User {
        User {
            id: 0,
            username: username.into(),
            password: defaults::SANDSTORM_PLACEHOLDER_PASSWORD.to_string(),
            scope: self.scope.clone(),
            locale: self.locale.clone(),
            view_mode: self.view_mode.clone(),
            single_click: self.single_click,
            sorting: self.sorting.clone(),
            perm: self.perm,
            commands: self.commands.clone(),
            hide_dotfiles: self.hide_dotfiles,
            lock_password: true,
        }
    }
}

/// Global settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub auth_method: AuthMethod,
    pub defaults: UserDefaults,
}

/// Server settings relevant to authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Root of the served tree; also the user store partition key.
    pub root: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            root: defaults::DEFAULT_ROOT.to_string(),
        }
    }
}
