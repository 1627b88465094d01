use std::sync::Arc;

use balance_ledger_application::{
    infrastructure_config::Config, ledger::service::DynLedgerUseCase,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ledger_use_case: DynLedgerUseCase,
}

impl AppState {
    pub fn new(config: Arc<Config>, ledger_use_case: DynLedgerUseCase) -> Self {
        Self {
            config,
            ledger_use_case,
        }
    }
}
