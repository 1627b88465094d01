use std::sync::Arc;

use crate::error::AppResult;
use domain::account::AccountId;
use domain::ledger::DebitResult;

/// Hands out connection-scoped sessions against the balance store.
#[async_trait::async_trait]
pub trait BalanceConnectorPort: Send + Sync {
    async fn open(&self) -> AppResult<Box<dyn BalanceConnection>>;
}

/// One open session. Callers must pass every opened session to
/// [`BalanceConnection::close`] exactly once, whatever the operation outcome.
#[async_trait::async_trait]
pub trait BalanceConnection: Send {
    /// Compare-and-decrement executed as a single indivisible unit by the store.
    async fn conditional_debit(&mut self, account: &AccountId, amount: i64)
    -> AppResult<DebitResult>;

    /// Unconditional overwrite, acknowledged by the store before returning.
    async fn set_balance(&mut self, account: &AccountId, value: i64) -> AppResult<()>;

    async fn ping(&mut self) -> AppResult<()>;

    async fn close(self: Box<Self>);
}

pub type DynBalanceConnectorPort = Arc<dyn BalanceConnectorPort>;
