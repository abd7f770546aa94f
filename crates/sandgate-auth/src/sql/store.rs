//! SQL-backed user store.

use async_trait::async_trait;
use sqlx::any::{AnyPoolOptions, AnyRow};
use sqlx::{AnyPool, Row};
use tracing::debug;

use crate::error::StoreError;
use crate::store::UserStore;
use crate::users::User;

use super::config::SqlStoreConfig;
use super::queries::{self, DatabaseType};

/// User store on top of an SQLx `Any` pool.
///
/// # Example
///
/// ```ignore
/// use sandgate_auth::sql::{SqlStore, SqlStoreConfig};
///
/// let store = SqlStore::connect(SqlStoreConfig::new("postgres://localhost/files")).await?;
/// let users = store.list("/srv").await?;
/// ```
pub struct SqlStore {
    pool: AnyPool,
    db_type: DatabaseType,
    config: SqlStoreConfig,
}

impl SqlStore {
    /// Connect to the database.
    ///
    /// The schema is not created here; call [`SqlStore::init_schema`] for that.
    pub async fn connect(config: SqlStoreConfig) -> Result<Self, StoreError> {
        // Install database drivers for the "any" pool
        sqlx::any::install_default_drivers();

        let db_type = DatabaseType::from_url(&config.database_url)
            .ok_or_else(|| StoreError::backend("unsupported database URL scheme"))?;

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .max_lifetime(config.max_lifetime)
            .idle_timeout(config.idle_timeout)
            .connect(&config.database_url)
            .await?;

        Ok(Self {
            pool,
            db_type,
            config,
        })
    }

    /// Create the users table if it does not exist.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(queries::schema_for(self.db_type))
            .execute(&self.pool)
            .await?;
        debug!(db_type = ?self.db_type, "user schema ready");
        Ok(())
    }

    /// All users under `root`, ordered by id.
    pub async fn list(&self, root: &str) -> Result<Vec<User>, StoreError> {
        let query = match self.db_type {
            DatabaseType::PostgreSQL => queries::LIST_USERS_PG,
            DatabaseType::SQLite => queries::LIST_USERS_SQLITE,
        };

        sqlx::query(query)
            .bind(root)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Self::parse_user_row)
            .collect()
    }

    /// Parse a user row from AnyRow.
    fn parse_user_row(row: AnyRow) -> Result<User, StoreError> {
        let id: i64 = row.try_get("id")?;
        let profile: String = row.try_get("profile")?;

        let mut user: User = serde_json::from_str(&profile)?;
        user.id = u64::try_from(id).map_err(StoreError::backend)?;
        user.username = row.try_get("username")?;
        user.password = row.try_get("password")?;
        Ok(user)
    }

    /// Get the connection pool (for advanced usage).
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Get database type.
    pub fn database_type(&self) -> DatabaseType {
        self.db_type
    }
}

#[async_trait]
impl UserStore for SqlStore {
    async fn get(&self, root: &str, username: &str) -> Result<Option<User>, StoreError> {
        let query = match self.db_type {
            DatabaseType::PostgreSQL => queries::FIND_USER_PG,
            DatabaseType::SQLite => queries::FIND_USER_SQLITE,
        };

        sqlx::query(query)
            .bind(root)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .map(Self::parse_user_row)
            .transpose()
    }

    async fn save(&self, root: &str, mut user: User) -> Result<User, StoreError> {
        let query = match self.db_type {
            DatabaseType::PostgreSQL => queries::INSERT_USER_PG,
            DatabaseType::SQLite => queries::INSERT_USER_SQLITE,
        };
        let profile = serde_json::to_string(&user)?;

        let row = sqlx::query(query)
            .bind(root)
            .bind(&user.username)
            .bind(&user.password)
            .bind(profile)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => StoreError::Conflict {
                    root: root.to_string(),
                    username: user.username.clone(),
                },
                other => other.into(),
            })?;

        let id: i64 = row.try_get("id")?;
        user.id = u64::try_from(id).map_err(StoreError::backend)?;
        Ok(user)
    }
}

// Debug implementation (don't leak the connection URL)
impl std::fmt::Debug for SqlStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlStore")
            .field("db_type", &self.db_type)
            .field("max_connections", &self.config.max_connections)
            .finish_non_exhaustive()
    }
}
