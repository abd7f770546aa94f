//! Data-access trait for user stores.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::users::User;

/// Data-access layer for users, partitioned by server root.
///
/// Return `Ok(None)` when no user matches. Any `Err` is treated by
/// authenticators as a fatal lookup failure.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by root and username.
    async fn get(&self, root: &str, username: &str) -> Result<Option<User>, StoreError>;

    /// Persist a new user under `root` and return it with its assigned id.
    ///
    /// Stores that enforce uniqueness return [`StoreError::Conflict`] when
    /// the username is already taken under `root`.
    async fn save(&self, root: &str, user: User) -> Result<User, StoreError>;
}

/// Blanket implementation for `Arc<S>` where `S: UserStore`.
#[async_trait]
impl<S: UserStore + ?Sized> UserStore for Arc<S> {
    #[inline]
    async fn get(&self, root: &str, username: &str) -> Result<Option<User>, StoreError> {
        (**self).get(root, username).await
    }

    #[inline]
    async fn save(&self, root: &str, user: User) -> Result<User, StoreError> {
        (**self).save(root, user).await
    }
}

/// Blanket implementation for `Box<S>` where `S: UserStore`.
#[async_trait]
impl<S: UserStore + ?Sized> UserStore for Box<S> {
    #[inline]
    async fn get(&self, root: &str, username: &str) -> Result<Option<User>, StoreError> {
        (**self).get(root, username).await
    }

    #[inline]
    async fn save(&self, root: &str, user: User) -> Result<User, StoreError> {
        (**self).save(root, user).await
    }
}
