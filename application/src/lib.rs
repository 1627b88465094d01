#[cfg(any(feature = "adapters", feature = "axum", feature = "deadpool-redis"))]
compile_error!("application must not depend on adapters/framework crates");

pub mod config;
pub mod error;
pub mod infrastructure_config;
pub mod ledger;
pub mod ports;
