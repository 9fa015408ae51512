use crate::config::AppConfig;
use crate::users::repo::{PgUserStore, UserStore};
use crate::users::services::AccountManager;
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountManager,
}

impl AppState {
    /// Opens the shared connection pool and wires the Postgres-backed store.
    pub async fn init(config: &AppConfig) -> anyhow::Result<(Self, PgPool)> {
        let db = PgPoolOptions::new()
            .max_connections(config.db.max_connections)
            .acquire_timeout(config.db.acquire_timeout)
            .connect(&config.db.url)
            .await
            .context("connect to database")?;

        let store = Arc::new(PgUserStore::new(db.clone())) as Arc<dyn UserStore>;
        Ok((Self::with_store(store), db))
    }

    pub fn with_store(store: Arc<dyn UserStore>) -> Self {
        Self {
            accounts: AccountManager::new(store),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::users::repo::memory::MemoryUserStore;

        Self::with_store(Arc::new(MemoryUserStore::default()))
    }
}
