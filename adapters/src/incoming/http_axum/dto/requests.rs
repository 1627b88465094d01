use serde::Deserialize;
#[cfg(feature = "docs")]
use utoipa::ToSchema;
use validator::Validate;

use balance_ledger_application::error::{AppError, AppResult};
use domain::account::AccountId;

/// Largest charge the store script compares exactly; Lua numbers are doubles.
pub const MAX_CHARGE: i64 = 9_007_199_254_740_991;

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Request to reset an account balance to the configured default. An empty body resets the default account.",
    example = json!({
        "account": "account"
    })
))]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ResetRequest {
    #[cfg_attr(feature = "docs", schema(example = "account"))]
    #[validate(length(
        min = 1,
        max = 256,
        message = "Account must be between 1 and 256 characters"
    ))]
    pub account: Option<String>,
}

impl ResetRequest {
    pub fn account_or(&self, default_account: &str) -> AppResult<AccountId> {
        resolve_account(self.account.as_deref(), default_account)
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Request to charge an account. Missing fields fall back to the configured default account and charge amount.",
    example = json!({
        "account": "account",
        "charges": 10
    })
))]
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ChargeRequest {
    #[cfg_attr(feature = "docs", schema(example = "account"))]
    #[validate(length(
        min = 1,
        max = 256,
        message = "Account must be between 1 and 256 characters"
    ))]
    pub account: Option<String>,
    #[cfg_attr(feature = "docs", schema(example = 10, minimum = 0))]
    #[validate(range(
        min = 0,
        max = MAX_CHARGE,
        message = "Charges must be an integer between 0 and 2^53 - 1"
    ))]
    pub charges: Option<i64>,
}

impl ChargeRequest {
    pub fn account_or(&self, default_account: &str) -> AppResult<AccountId> {
        resolve_account(self.account.as_deref(), default_account)
    }

    #[must_use]
    pub fn charges_or(&self, default_charge: i64) -> i64 {
        self.charges.unwrap_or(default_charge)
    }
}

pub fn validate_request(request: &impl Validate) -> AppResult<()> {
    request.validate().map_err(|e| AppError::ValidationError {
        message: e.to_string(),
    })
}

fn resolve_account(requested: Option<&str>, default_account: &str) -> AppResult<AccountId> {
    Ok(AccountId::parse(requested.unwrap_or(default_account))?)
}
