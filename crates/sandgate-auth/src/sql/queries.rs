//! SQL queries for the supported databases.

/// Database type enum for query selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseType {
    /// PostgreSQL database.
    PostgreSQL,
    /// SQLite database.
    SQLite,
}

impl DatabaseType {
    /// Detect database type from URL.
    pub fn from_url(url: &str) -> Option<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::PostgreSQL)
        } else if url.starts_with("sqlite:") {
            Some(Self::SQLite)
        } else {
            None
        }
    }
}

/// Schema for the given database.
pub fn schema_for(db_type: DatabaseType) -> &'static str {
    match db_type {
        DatabaseType::PostgreSQL => SCHEMA_PG,
        DatabaseType::SQLite => SCHEMA_SQLITE,
    }
}

pub const SCHEMA_PG: &str = r#"
CREATE TABLE IF NOT EXISTS sandgate_users (
    id BIGSERIAL PRIMARY KEY,
    root TEXT NOT NULL,
    username TEXT NOT NULL,
    password TEXT NOT NULL,
    profile TEXT NOT NULL,
    UNIQUE (root, username)
)
"#;

pub const SCHEMA_SQLITE: &str = r#"
CREATE TABLE IF NOT EXISTS sandgate_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    root TEXT NOT NULL,
    username TEXT NOT NULL,
    password TEXT NOT NULL,
    profile TEXT NOT NULL,
    UNIQUE (root, username)
)
"#;

/// Query to find a user by root and username (PostgreSQL).
pub const FIND_USER_PG: &str = r#"
SELECT id, username, password, profile
FROM sandgate_users
WHERE root = $1 AND username = $2
"#;

/// Query to find a user by root and username (SQLite).
pub const FIND_USER_SQLITE: &str = r#"
SELECT id, username, password, profile
FROM sandgate_users
WHERE root = ? AND username = ?
"#;

/// Query to insert a user and return its id (PostgreSQL).
pub const INSERT_USER_PG: &str = r#"
INSERT INTO sandgate_users (root, username, password, profile)
VALUES ($1, $2, $3, $4)
RETURNING id
"#;

/// Query to insert a user and return its id (SQLite).
pub const INSERT_USER_SQLITE: &str = r#"
INSERT INTO sandgate_users (root, username, password, profile)
VALUES (?, ?, ?, ?)
RETURNING id
"#;

/// Query to list users under a root (PostgreSQL).
pub const LIST_USERS_PG: &str = r#"
SELECT id, username, password, profile
FROM sandgate_users
WHERE root = $1
ORDER BY id
"#;

/// Query to list users under a root (SQLite).
pub const LIST_USERS_SQLITE: &str = r#"
SELECT id, username, password, profile
FROM sandgate_users
WHERE root = ?
ORDER BY id
"#;
