use deadpool_redis::{Pool as RedisPool, PoolConfig};
use std::sync::Arc;
use tracing::info;

use balance_ledger_adapters::outgoing::{
    memory_dashmap::balance_store_memory::InMemoryBalanceStore,
    redis_deadpool::balance_store_redis::RedisBalanceConnector,
};
use balance_ledger_adapters::shared::app_state::AppState as AdaptersAppState;
use balance_ledger_application::error::AppError;
use balance_ledger_application::infrastructure_config::{Config, StoreBackend};
use balance_ledger_application::ledger::service::{DynLedgerUseCase, LedgerService};
use balance_ledger_application::ports::outgoing::balance_store::DynBalanceConnectorPort;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ledger_service: Arc<LedgerService>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let config = Arc::new(config);

        let connector = Self::create_balance_connector(&config)?;
        let ledger_service = Arc::new(LedgerService::new(connector, config.ledger.settings()));

        Ok(Self {
            config,
            ledger_service,
        })
    }

    fn create_balance_connector(config: &Config) -> Result<DynBalanceConnectorPort, AppError> {
        match config.store.backend {
            StoreBackend::Redis => {
                info!("Using redis URL {}", config.redis.redacted_url());
                let redis_pool = Self::create_redis_pool(config)?;
                Ok(Arc::new(RedisBalanceConnector::new(
                    redis_pool,
                    config.redis.namespace.as_deref(),
                    config.redis.connect_timeout_ms,
                    config.redis.reuse_connections,
                )))
            }
            StoreBackend::Memory => {
                info!("Using in-memory balance store");
                Ok(Arc::new(InMemoryBalanceStore::new()))
            }
        }
    }

    fn create_redis_pool(config: &Config) -> Result<RedisPool, AppError> {
        let mut redis_config = deadpool_redis::Config::from_url(config.redis.redis_url()?);
        redis_config.pool = Some(PoolConfig::new(config.redis.pool_max_size));

        redis_config
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| AppError::ConfigError {
                message: format!("Failed to create Redis pool: {}", e),
            })
    }

    pub fn to_adapters_state(self) -> AdaptersAppState {
        AdaptersAppState::new(
            self.config,
            self.ledger_service as DynLedgerUseCase,
        )
    }
}
