//! In-memory user store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::users::User;

use super::UserStore;

/// In-memory user store keyed by `(root, username)`.
///
/// Uses `parking_lot::RwLock` which doesn't poison on panic. Contents are
/// lost on restart; use the SQL store for anything that must survive one.
#[derive(Debug)]
pub struct MemoryStore {
    users: RwLock<HashMap<(String, String), User>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Create a new empty store.
    #[inline]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a store pre-populated with users under `root`.
    ///
    /// Users without an id get one above every explicit id.
    pub fn with_users<I>(root: &str, users: I) -> Self
    where
        I: IntoIterator<Item = User>,
    {
        let users: Vec<User> = users.into_iter().collect();
        let store = Self::new();
        for user in &users {
            store.reserve_id(user.id);
        }
        {
            let mut map = store.users.write();
            for mut user in users {
                if user.id == 0 {
                    user.id = store.next_id.fetch_add(1, Ordering::Relaxed);
                }
                map.insert((root.to_string(), user.username.clone()), user);
            }
        }
        store
    }

    /// Keep future ids above `id`.
    fn reserve_id(&self, id: u64) {
        if id != 0 {
            self.next_id.fetch_max(id + 1, Ordering::Relaxed);
        }
    }

    /// Get the number of stored users across all roots.
    #[inline]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Check if no users are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }

    /// Synchronous lookup, for callers outside an async context.
    pub fn get_sync(&self, root: &str, username: &str) -> Option<User> {
        self.users
            .read()
            .get(&(root.to_string(), username.to_string()))
            .cloned()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn get(&self, root: &str, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.get_sync(root, username))
    }

    async fn save(&self, root: &str, mut user: User) -> Result<User, StoreError> {
        let key = (root.to_string(), user.username.clone());
        let mut users = self.users.write();
        if users.contains_key(&key) {
            return Err(StoreError::Conflict {
                root: key.0,
                username: key.1,
            });
        }
        if user.id == 0 {
            user.id = self.next_id.fetch_add(1, Ordering::Relaxed);
        } else {
            self.reserve_id(user.id);
        }
        users.insert(key, user.clone());
        Ok(user)
    }
}
