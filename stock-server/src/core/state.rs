use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::inventory::StockService;

/// Shared services, cloned into every handler
///
/// | Field | Type | Meaning |
/// |------|------|------|
/// | config | Config | Immutable configuration |
/// | db | DbService | SQLite pool |
/// | stock | StockService | Stock reads and writes |
/// | jwt_service | Arc<JwtService> | Token validation |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub stock: StockService,
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let stock = StockService::new(
            db.pool.clone(),
            config.stock_fallback_policy,
            config.stock_retry.clone(),
        );
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        Self {
            config,
            db,
            stock,
            jwt_service,
        }
    }

    /// Open the database under the configured path and build the services
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        std::fs::create_dir_all(&config.work_dir)?;
        let db = DbService::new(&config.database_path)
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        tracing::info!(
            database = %config.database_path,
            fallback_policy = config.stock_fallback_policy.as_str(),
            retry_attempts = config.stock_retry.max_attempts,
            "Server state initialized"
        );
        Ok(Self::new(config.clone(), db))
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
