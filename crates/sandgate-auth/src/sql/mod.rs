//! SQL user store.
//!
//! Users are kept in a single table partitioned by the served root, using
//! SQLx's `Any` driver so the same code runs against SQLite and PostgreSQL.
//!
//! Enable the database features you need in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! sandgate-auth = { version = "0.1", features = ["sql-postgres"] }
//! # or
//! sandgate-auth = { version = "0.1", features = ["sql-sqlite"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sandgate_auth::sql::{SqlStore, SqlStoreConfig};
//!
//! let store = SqlStore::connect(SqlStoreConfig::new("sqlite:users.db").max_connections(4)).await?;
//! store.init_schema().await?;
//! ```
//!
//! # Database Schema
//!
//! ```sql
//! CREATE TABLE sandgate_users (
//!     id BIGSERIAL PRIMARY KEY,
//!     root TEXT NOT NULL,
//!     username TEXT NOT NULL,
//!     password TEXT NOT NULL,
//!     profile TEXT NOT NULL,    -- JSON encoded preferences and permissions
//!     UNIQUE (root, username)
//! );
//! ```
//!
//! The unique constraint is what makes concurrent first logins of the same
//! identity safe: the losing insert fails with [`StoreError::Conflict`].
//!
//! [`StoreError::Conflict`]: crate::StoreError::Conflict

mod config;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use config::SqlStoreConfig;
pub use queries::{DatabaseType, schema_for};
pub use store::SqlStore;
