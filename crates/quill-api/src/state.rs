use std::sync::Arc;

use quill_db::Database;
use rusqlite::Transaction;
use tracing::error;

use crate::config::Config;
use crate::error::{ApiError, ServiceError};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppStateInner {
    pub fn new(db: Database, config: Arc<Config>) -> AppState {
        Arc::new(Self { db, config })
    }

    /// Run one unit of service work off the async runtime, on its own
    /// connection and transaction.
    pub async fn run<F, T>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || db.with_tx(f))
            .await
            .map_err(|e| {
                error!("spawn_blocking join error: {}", e);
                ApiError::Internal
            })?
            .map_err(ApiError::from)
    }
}
