use crate::error::AppResult;
use domain::account::AccountId;
use domain::ledger::ChargeOutcome;

#[async_trait::async_trait]
pub trait LedgerUseCase: Send + Sync {
    async fn reset(&self, account: &AccountId) -> AppResult<()>;
    async fn charge(&self, account: &AccountId, amount: i64) -> AppResult<ChargeOutcome>;
    async fn check_store(&self) -> AppResult<()>;
}
