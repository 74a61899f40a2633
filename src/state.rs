use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::config::AppConfig;
use crate::database::{
    CredentialStore, DatabaseManager, MemoryCredentialStore, MemoryUserStore, PgCredentialStore,
    PgUserStore, UserStore,
};

/// Shared handles every handler and the auth middleware receive through `State`.
#[derive(Clone)]
pub struct AppState {
    pub credentials: Arc<dyn CredentialStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenIssuer,
    /// `None` when running on the in-memory stores.
    pub database: Option<DatabaseManager>,
    pub max_page_size: i64,
}

impl AppState {
    pub fn postgres(config: &AppConfig, database: DatabaseManager) -> Self {
        Self {
            credentials: Arc::new(PgCredentialStore::new(database.pool())),
            users: Arc::new(PgUserStore::new(database.pool())),
            tokens: TokenIssuer::from_config(&config.security),
            database: Some(database),
            max_page_size: config.api.max_page_size,
        }
    }

    pub fn in_memory(config: &AppConfig) -> Self {
        Self {
            credentials: Arc::new(MemoryCredentialStore::new()),
            users: Arc::new(MemoryUserStore::new()),
            tokens: TokenIssuer::from_config(&config.security),
            database: None,
            max_page_size: config.api.max_page_size,
        }
    }
}
