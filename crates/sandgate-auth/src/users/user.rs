//! User record and its value types.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// File listing layout.
///
/// The file manager treats view modes as free-form strings; names it does not
/// know are carried through unchanged in [`ViewMode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ViewMode {
    #[default]
    List,
    Mosaic,
    MosaicGallery,
    Other(String),
}

impl ViewMode {
    /// Wire name of the view mode.
    pub fn as_str(&self) -> &str {
        match self {
            ViewMode::List => "list",
            ViewMode::Mosaic => "mosaic",
            ViewMode::MosaicGallery => "mosaic gallery",
            ViewMode::Other(name) => name,
        }
    }

    /// Whether this is one of the layouts the file manager ships.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, ViewMode::Other(_))
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ViewMode {
    fn from(s: &str) -> Self {
        match s {
            "list" => ViewMode::List,
            "mosaic" => ViewMode::Mosaic,
            "mosaic gallery" => ViewMode::MosaicGallery,
            other => ViewMode::Other(other.to_string()),
        }
    }
}

impl From<String> for ViewMode {
    fn from(s: String) -> Self {
        match ViewMode::from(s.as_str()) {
            ViewMode::Other(_) => ViewMode::Other(s),
            known => known,
        }
    }
}

impl From<ViewMode> for String {
    fn from(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ViewMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ViewMode::from(s))
    }
}

/// Listing sort order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sorting {
    /// Field to sort by (e.g. `name`, `size`, `modified`).
    pub by: String,
    /// Ascending order.
    pub asc: bool,
}

/// What a user may do inside their scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub admin: bool,
    pub execute: bool,
    pub create: bool,
    pub rename: bool,
    pub modify: bool,
    pub delete: bool,
    pub share: bool,
    pub download: bool,
}

impl Permissions {
    /// Every permission granted.
    pub const fn all() -> Self {
        Self {
            admin: true,
            execute: true,
            create: true,
            rename: true,
            modify: true,
            delete: true,
            share: true,
            download: true,
        }
    }

    /// Check that admin implies every other permission.
    pub fn is_consistent(&self) -> bool {
        !self.admin || *self == Self::all()
    }
}

/// A file manager user.
///
/// `id` is assigned by the store on save; `0` means the record has not been
/// saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: String,
    pub scope: String,
    pub locale: String,
    pub view_mode: ViewMode,
    pub single_click: bool,
    pub sorting: Sorting,
    pub perm: Permissions,
    #[serde(default)]
    pub commands: Vec<String>,
    pub hide_dotfiles: bool,
    pub lock_password: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("list".parse::<ViewMode>(), Ok(ViewMode::List));
        assert_eq!("mosaic gallery".parse::<ViewMode>(), Ok(ViewMode::MosaicGallery));
        assert_eq!(ViewMode::Mosaic.to_string(), "mosaic");

        let custom = ViewMode::from("grid");
        assert_eq!(custom, ViewMode::Other("grid".into()));
        assert_eq!(custom.to_string(), "grid");
        assert!(!custom.is_builtin());
        assert!(ViewMode::List.is_builtin());
    }

    #[test]
    fn test_view_mode_serde_passthrough() {
        let mode: ViewMode = serde_json::from_str(r#""carousel""#).unwrap();
        assert_eq!(mode, ViewMode::Other("carousel".into()));
        assert_eq!(serde_json::to_string(&mode).unwrap(), r#""carousel""#);

        let known: ViewMode = serde_json::from_str(r#""mosaic""#).unwrap();
        assert_eq!(known, ViewMode::Mosaic);
    }

    #[test]
    fn test_permissions_consistency() {
        assert!(Permissions::all().is_consistent());
        assert!(Permissions::default().is_consistent());

        let partial_admin = Permissions {
            admin: true,
            ..Default::default()
        };
        assert!(!partial_admin.is_consistent());
    }

    #[test]
    fn test_user_json_omits_password() {
        let user = User {
            id: 7,
            username: "alice".into(),
            password: "empty".into(),
            scope: "/".into(),
            locale: "en".into(),
            view_mode: ViewMode::MosaicGallery,
            single_click: false,
            sorting: Sorting {
                by: "name".into(),
                asc: true,
            },
            perm: Permissions::default(),
            commands: vec!["git".into()],
            hide_dotfiles: true,
            lock_password: true,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["viewMode"], "mosaic gallery");
        assert_eq!(json["hideDotfiles"], true);
        assert_eq!(json["sorting"]["asc"], true);
    }
}
