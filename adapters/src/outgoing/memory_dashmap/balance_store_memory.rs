use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use balance_ledger_application::{
    error::AppResult,
    ports::outgoing::balance_store::{BalanceConnection, BalanceConnectorPort},
};
use domain::account::AccountId;
use domain::ledger::{DebitResult, decide_debit};

/// Process-local balance store. A debit holds the shard lock of its key for
/// the whole read-compare-write, which makes it indivisible per account.
#[derive(Clone, Default)]
pub struct InMemoryBalanceStore {
    balances: Arc<DashMap<String, i64>>,
}

impl InMemoryBalanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: &AccountId) -> Option<i64> {
        self.balances.get(account.as_str()).map(|entry| *entry)
    }
}

#[async_trait::async_trait]
impl BalanceConnectorPort for InMemoryBalanceStore {
    async fn open(&self) -> AppResult<Box<dyn BalanceConnection>> {
        Ok(Box::new(InMemoryBalanceConnection {
            balances: Arc::clone(&self.balances),
        }))
    }
}

pub struct InMemoryBalanceConnection {
    balances: Arc<DashMap<String, i64>>,
}

#[async_trait::async_trait]
impl BalanceConnection for InMemoryBalanceConnection {
    async fn conditional_debit(
        &mut self,
        account: &AccountId,
        amount: i64,
    ) -> AppResult<DebitResult> {
        let debit = match self.balances.get_mut(account.as_str()) {
            Some(mut entry) => {
                let (debit, write) = decide_debit(Some(*entry), amount);
                if let Some(value) = write {
                    *entry = value;
                }
                debit
            }
            None => decide_debit(None, amount).0,
        };

        debug!(
            "In-memory debit of {} on {}: authorized={}, remaining={}",
            amount, account, debit.authorized, debit.remaining_balance
        );
        Ok(debit)
    }

    async fn set_balance(&mut self, account: &AccountId, value: i64) -> AppResult<()> {
        self.balances.insert(account.as_str().to_string(), value);
        Ok(())
    }

    async fn ping(&mut self) -> AppResult<()> {
        Ok(())
    }

    async fn close(self: Box<Self>) {}
}
