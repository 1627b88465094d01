use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    config::LedgerSettings,
    error::AppResult,
    ports::{incoming::ledger::LedgerUseCase, outgoing::balance_store::DynBalanceConnectorPort},
};
use domain::account::AccountId;
use domain::ledger::ChargeOutcome;

/// Every operation opens its own store session and closes it before
/// returning, on success and on failure alike. Nothing between `open` and
/// `close` may return early.
pub struct LedgerService {
    connector: DynBalanceConnectorPort,
    settings: LedgerSettings,
}

impl LedgerService {
    pub fn new(connector: DynBalanceConnectorPort, settings: LedgerSettings) -> Self {
        Self {
            connector,
            settings,
        }
    }
}

#[async_trait::async_trait]
impl LedgerUseCase for LedgerService {
    #[instrument(skip(self))]
    async fn reset(&self, account: &AccountId) -> AppResult<()> {
        let mut connection = self.connector.open().await?;
        let result = connection
            .set_balance(account, self.settings.default_balance)
            .await;
        connection.close().await;
        result?;

        debug!(
            "Reset account {} to {}",
            account, self.settings.default_balance
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn charge(&self, account: &AccountId, amount: i64) -> AppResult<ChargeOutcome> {
        let mut connection = self.connector.open().await?;
        let result = connection.conditional_debit(account, amount).await;
        connection.close().await;
        let debit = result?;

        debug!(
            "Charge of {} on account {}: authorized={}, remaining={}",
            amount, account, debit.authorized, debit.remaining_balance
        );
        Ok(ChargeOutcome::from_debit(debit, amount))
    }

    async fn check_store(&self) -> AppResult<()> {
        let mut connection = self.connector.open().await?;
        let result = connection.ping().await;
        connection.close().await;
        result
    }
}

pub type DynLedgerUseCase = Arc<dyn LedgerUseCase>;
