use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::{ArticleStore, MemoryStore, PgStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub articles: Arc<dyn ArticleStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        match config.database_url.as_deref() {
            Some(url) => {
                let store = Arc::new(PgStore::connect(url).await?);
                Ok(Self::from_parts(store.clone(), store, config))
            }
            None => {
                tracing::warn!("DATABASE_URL not set; falling back to the in-memory store");
                Ok(Self::in_memory())
            }
        }
    }

    pub fn from_parts(
        users: Arc<dyn UserStore>,
        articles: Arc<dyn ArticleStore>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self { users, articles, config }
    }

    /// State over the in-memory store. Backs DATABASE_URL-less runs and the
    /// test suite.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::default());
        Self::from_parts(
            store.clone(),
            store,
            Arc::new(AppConfig { database_url: None }),
        )
    }
}
