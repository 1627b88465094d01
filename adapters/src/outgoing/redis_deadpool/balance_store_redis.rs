use std::{sync::LazyLock, time::Duration};

use deadpool_redis::{
    Connection as RedisConnection, Pool as RedisPool,
    redis::{
        AsyncCommands, ErrorKind, FromRedisValue, RedisError, RedisResult, Script,
        Value as RedisValue, cmd,
    },
};
use tokio::time::timeout;
use tracing::{debug, instrument};

use super::keys::RedisKeyBuilder;
use balance_ledger_application::{
    error::{AppError, AppResult},
    ports::outgoing::balance_store::{BalanceConnection, BalanceConnectorPort},
};
use domain::account::AccountId;
use domain::ledger::DebitResult;

// Mirrors domain::ledger::decide_debit. A value that is not a number reads as
// an absent record.
static CONDITIONAL_DEBIT_SCRIPT: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r"
        local balance_key = KEYS[1]
        local amount = tonumber(ARGV[1])
        local balance = tonumber(redis.call('GET', balance_key))

        if not balance then
            if amount == 0 then
                return {1, 0}
            end
            return {0, 0}
        end

        if balance >= amount then
            balance = balance - amount
            redis.call('SET', balance_key, string.format('%d', balance))
            return {1, balance}
        end

        return {0, balance}
        ",
    )
});

#[derive(Debug)]
struct DebitScriptResult {
    authorized: bool,
    remaining_balance: i64,
}

impl FromRedisValue for DebitScriptResult {
    fn from_redis_value(v: &RedisValue) -> RedisResult<Self> {
        if let RedisValue::Array(values) = v {
            if values.len() != 2 {
                return Err((ErrorKind::TypeError, "Expected array of 2 elements").into());
            }

            let authorized = i64::from_redis_value(values.first().ok_or(RedisError::from((
                ErrorKind::TypeError,
                "Missing value at index 0",
            )))?)? == 1;
            let remaining_balance = i64::from_redis_value(values.get(1).ok_or(
                RedisError::from((ErrorKind::TypeError, "Missing value at index 1")),
            )?)?;

            Ok(DebitScriptResult {
                authorized,
                remaining_balance,
            })
        } else {
            Err((ErrorKind::TypeError, "Expected array").into())
        }
    }
}

pub struct RedisBalanceConnector {
    redis_pool: RedisPool,
    redis_keys: RedisKeyBuilder,
    connect_timeout: Duration,
    reuse_connections: bool,
}

impl RedisBalanceConnector {
    pub fn new(
        redis_pool: RedisPool,
        namespace: Option<&str>,
        connect_timeout_ms: u64,
        reuse_connections: bool,
    ) -> Self {
        Self {
            redis_pool,
            redis_keys: RedisKeyBuilder::new(namespace),
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            reuse_connections,
        }
    }
}

#[async_trait::async_trait]
impl BalanceConnectorPort for RedisBalanceConnector {
    #[instrument(skip(self))]
    async fn open(&self) -> AppResult<Box<dyn BalanceConnection>> {
        let conn = timeout(self.connect_timeout, self.redis_pool.get())
            .await
            .map_err(|_| AppError::ConnectionError {
                message: "Redis connection timeout".to_string(),
            })?
            .map_err(|e| AppError::ConnectionError {
                message: format!("Failed to get Redis connection: {}", e),
            })?;

        debug!("Opened Redis connection");

        Ok(Box::new(RedisBalanceConnection {
            conn,
            redis_keys: self.redis_keys.clone(),
            reuse_connection: self.reuse_connections,
        }))
    }
}

pub struct RedisBalanceConnection {
    conn: RedisConnection,
    redis_keys: RedisKeyBuilder,
    reuse_connection: bool,
}

#[async_trait::async_trait]
impl BalanceConnection for RedisBalanceConnection {
    #[instrument(skip(self))]
    async fn conditional_debit(
        &mut self,
        account: &AccountId,
        amount: i64,
    ) -> AppResult<DebitResult> {
        let balance_key = self.redis_keys.balance_key(account);

        let result: DebitScriptResult = CONDITIONAL_DEBIT_SCRIPT
            .key(&balance_key)
            .arg(amount)
            .invoke_async(&mut self.conn)
            .await
            .map_err(|e| AppError::StoreError {
                message: format!("Failed to execute conditional debit script: {}", e),
            })?;

        debug!(
            "Debit script on {}: authorized={}, remaining={}",
            balance_key, result.authorized, result.remaining_balance
        );

        Ok(DebitResult {
            authorized: result.authorized,
            remaining_balance: result.remaining_balance,
        })
    }

    #[instrument(skip(self))]
    async fn set_balance(&mut self, account: &AccountId, value: i64) -> AppResult<()> {
        let balance_key = self.redis_keys.balance_key(account);

        let _: () = self
            .conn
            .set(&balance_key, value)
            .await
            .map_err(|e| AppError::StoreError {
                message: format!("Failed to set balance for {}: {}", account, e),
            })?;

        debug!("Set {} to {}", balance_key, value);
        Ok(())
    }

    async fn ping(&mut self) -> AppResult<()> {
        let _: String = cmd("PING")
            .query_async(&mut self.conn)
            .await
            .map_err(|e| AppError::StoreError {
                message: format!("Failed to ping Redis: {}", e),
            })?;
        Ok(())
    }

    async fn close(self: Box<Self>) {
        let RedisBalanceConnection {
            conn,
            reuse_connection,
            ..
        } = *self;

        if reuse_connection {
            drop(conn);
            debug!("Returned Redis connection to pool");
        } else {
            drop(RedisConnection::take(conn));
            debug!("Closed Redis connection");
        }
    }
}
