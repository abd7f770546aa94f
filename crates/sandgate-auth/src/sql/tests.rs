//! Tests for the SQL user store.

use crate::sql::{DatabaseType, SqlStore, SqlStoreConfig};
use crate::users::{Permissions, UserDefaults, ViewMode};
use crate::{MemoryStore, StoreError, UserStore};

/// Create a store on in-memory SQLite with the schema in place.
async fn setup_test_db() -> SqlStore {
    let config = SqlStoreConfig::new("sqlite::memory:")
        .max_connections(1)
        .min_connections(1);
    let store = SqlStore::connect(config).await.expect("Failed to connect");
    store.init_schema().await.expect("Failed to create schema");
    store
}

#[tokio::test]
async fn test_database_type_detection() {
    assert_eq!(
        DatabaseType::from_url("postgres://localhost/db"),
        Some(DatabaseType::PostgreSQL)
    );
    assert_eq!(
        DatabaseType::from_url("postgresql://localhost/db"),
        Some(DatabaseType::PostgreSQL)
    );
    assert_eq!(
        DatabaseType::from_url("sqlite::memory:"),
        Some(DatabaseType::SQLite)
    );
    assert_eq!(DatabaseType::from_url("mysql://localhost/db"), None);
    assert_eq!(DatabaseType::from_url("redis://localhost"), None);
}

#[tokio::test]
async fn test_unsupported_url_rejected() {
    let err = SqlStore::connect(SqlStoreConfig::new("mysql://localhost/db"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Backend(_)));
}

#[tokio::test]
async fn test_get_missing_is_none() {
    let store = setup_test_db().await;
    assert_eq!(store.get("/srv", "nobody").await.unwrap(), None);
}

#[tokio::test]
async fn test_save_and_get() {
    let store = setup_test_db().await;

    let mut user = UserDefaults::default().new_user("alice");
    user.view_mode = ViewMode::MosaicGallery;
    user.commands = vec!["ls".into(), "git".into()];
    user.perm = Permissions::all();

    let saved = store.save("/srv", user.clone()).await.unwrap();
    assert!(saved.id > 0);

    let loaded = store.get("/srv", "alice").await.unwrap().unwrap();
    assert_eq!(loaded.id, saved.id);
    assert_eq!(loaded.password, "empty");
    assert_eq!(loaded.view_mode, ViewMode::MosaicGallery);
    assert_eq!(loaded.commands, user.commands);
    assert_eq!(loaded, saved);
}

#[tokio::test]
async fn test_partitioned_by_root() {
    let store = setup_test_db().await;
    let defaults = UserDefaults::default();

    store.save("/a", defaults.new_user("alice")).await.unwrap();
    assert!(store.get("/b", "alice").await.unwrap().is_none());

    store.save("/b", defaults.new_user("alice")).await.unwrap();
    assert_eq!(store.list("/a").await.unwrap().len(), 1);
    assert_eq!(store.list("/b").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_duplicate_save_conflicts() {
    let store = setup_test_db().await;
    let defaults = UserDefaults::default();

    store.save("/srv", defaults.new_user("bob")).await.unwrap();
    let err = store.save("/srv", defaults.new_user("bob")).await.unwrap_err();
    assert!(
        matches!(err, StoreError::Conflict { ref username, .. } if username == "bob"),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_list_ordered_by_id() {
    let store = setup_test_db().await;
    let defaults = UserDefaults::default();

    for name in ["carol", "alice", "bob"] {
        store.save("/srv", defaults.new_user(name)).await.unwrap();
    }

    let names: Vec<_> = store
        .list("/srv")
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, ["carol", "alice", "bob"]);
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let store = setup_test_db().await;
    store.init_schema().await.unwrap();
    assert_eq!(store.database_type(), DatabaseType::SQLite);
}

#[tokio::test]
async fn test_behaves_like_memory_store() {
    let sql = setup_test_db().await;
    let memory = MemoryStore::new();
    let defaults = UserDefaults::default();

    let stores: [&dyn UserStore; 2] = [&sql, &memory];
    for store in stores {
        assert!(store.get("/srv", "dave").await.unwrap().is_none());
        let saved = store.save("/srv", defaults.new_user("dave")).await.unwrap();
        assert_eq!(store.get("/srv", "dave").await.unwrap(), Some(saved));
    }
}
