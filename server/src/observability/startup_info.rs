use balance_ledger_application::infrastructure_config::{Config, StoreBackend};
use tracing::info;

pub fn print_api_info(config: &Config) {
    print_api_endpoints(config);
    print_configuration_info(config);
}

fn print_api_endpoints(config: &Config) {
    let base_url = format!("http://{}", config.server_address());
    info!("📋 API:");
    info!("  💳 POST {}/charge", base_url);
    info!("  🔄 POST {}/reset", base_url);
    info!("  ❤️  GET  {}/health", base_url);
    if cfg!(feature = "docs") {
        info!("  📖 Swagger UI: {}/docs", base_url);
    }
}

fn print_configuration_info(config: &Config) {
    info!("⚙️  Configuration:");
    info!(
        "  💰 Default balance: {}, default charge: {}, default account: '{}'",
        config.ledger.default_balance, config.ledger.default_charge, config.ledger.default_account
    );
    print_store_configuration(config);
}

fn print_store_configuration(config: &Config) {
    match config.store.backend {
        StoreBackend::Redis => {
            info!(
                "  📦 Store: Redis at {} (pool {}, connect timeout {}ms, {})",
                config.redis.redacted_url(),
                config.redis.pool_max_size,
                config.redis.connect_timeout_ms,
                if config.redis.reuse_connections {
                    "pooled connections"
                } else {
                    "connection per request"
                }
            );
        }
        StoreBackend::Memory => {
            info!("  📦 Store: in-memory (process local, not persisted)");
        }
    }
}
