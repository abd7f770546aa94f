//! State shared across requests.

use std::sync::Arc;

use sandgate_auth::{Authenticator, MemoryStore, SandstormAuth, UserStore};
use sandgate_config::{Config, StoreConfig};
use tracing::info;

use crate::error::ServerError;
use crate::policy::{AuthPolicy, ReloadablePolicy};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn Authenticator>,
    pub store: Arc<dyn UserStore>,
    pub policy: Arc<ReloadablePolicy>,
}

impl AppState {
    pub fn new(
        auth: Arc<dyn Authenticator>,
        store: Arc<dyn UserStore>,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            auth,
            store,
            policy: Arc::new(ReloadablePolicy::new(policy)),
        }
    }

    /// Build the authenticator, user store and policy described by `config`.
    pub async fn from_config(config: &Config) -> Result<Self, ServerError> {
        let auth = SandstormAuth::with_header(config.sandstorm.user_header.as_str());
        info!(
            method = %auth.method(),
            header = auth.user_header(),
            "trusted-header authentication enabled"
        );
        let store = build_store(&config.store).await?;
        Ok(Self::new(
            Arc::new(auth),
            store,
            AuthPolicy::from_config(config),
        ))
    }
}

// Cannot derive Debug due to dyn Authenticator
impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("method", &self.auth.method())
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

async fn build_store(config: &StoreConfig) -> Result<Arc<dyn UserStore>, ServerError> {
    match config.backend.as_str() {
        "memory" => {
            info!("using in-memory user store, users are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "sql")]
        "sql" => {
            use std::time::Duration;

            use sandgate_auth::sql::{SqlStore, SqlStoreConfig};

            let url = config
                .database_url
                .as_deref()
                .ok_or_else(|| ServerError::Config("store.database_url is required".into()))?;
            let sql_config = SqlStoreConfig::new(url)
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
            let store = SqlStore::connect(sql_config).await?;
            if config.init_schema {
                store.init_schema().await?;
            }
            info!(
                db_type = ?store.database_type(),
                max_connections = config.max_connections,
                "using sql user store"
            );
            Ok(Arc::new(store))
        }
        other => Err(ServerError::Config(format!(
            "store backend {:?} is not available in this build",
            other
        ))),
    }
}
