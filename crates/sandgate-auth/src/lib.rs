//! Trusted-header authentication for sandgate.
//!
//! A sandstorm proxy in front of the file manager authenticates users and
//! forwards their identity in a header. This crate turns that header into a
//! [`User`]: existing users are looked up in a [`UserStore`], new ones are
//! provisioned from [`UserDefaults`], and the request's [`TrustedFields`] are
//! layered on top.
//!
//! # Example
//!
//! ```
//! use http::HeaderMap;
//! use sandgate_auth::{
//!     AuthRequest, Authenticator, MemoryStore, SandstormAuth, ServerSettings, Settings,
//!     TrustedFields,
//! };
//!
//! # async fn example() -> Result<(), sandgate_auth::AuthError> {
//! let store = MemoryStore::new();
//! let mut headers = HeaderMap::new();
//! headers.insert("x-sandstorm-user-id", "alice".parse().unwrap());
//! let fields = TrustedFields::from_pairs([("user.perm.admin", "true")]);
//!
//! let user = SandstormAuth::new()
//!     .authenticate(
//!         AuthRequest::new(&headers, &fields),
//!         &store,
//!         &Settings::default(),
//!         &ServerSettings::default(),
//!     )
//!     .await?;
//! assert!(user.perm.delete);
//! # Ok(())
//! # }
//! ```

mod error;
mod fields;
mod sandstorm;
mod store;
mod traits;
pub mod users;

#[cfg(feature = "sql")]
pub mod sql;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{AuthError, StoreError};
pub use fields::{TrustedFields, VALID_FIELDS, canonical_field, is_valid};
pub use sandstorm::{SandstormAuth, merge_fields};
pub use store::{MemoryStore, UserStore};
pub use traits::{AuthRequest, Authenticator};
pub use users::{
    AuthMethod, Permissions, ServerSettings, Settings, Sorting, User, UserDefaults, ViewMode,
};

#[cfg(feature = "cli")]
pub use cli::UsersArgs;
