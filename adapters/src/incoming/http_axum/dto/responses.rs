use serde::Serialize;
#[cfg(feature = "docs")]
use utoipa::ToSchema;

use domain::ledger::ChargeOutcome;

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Health report. Failures use the standard error body instead.",
    example = json!({
        "ok": true
    })
))]
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

impl HealthResponse {
    #[must_use]
    pub fn healthy() -> Self {
        Self { ok: true }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Outcome of a charge. A denied charge is a successful response with isAuthorized=false and charges=0.",
    example = json!({
        "isAuthorized": true,
        "remainingBalance": 90,
        "charges": 10
    })
))]
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeResponse {
    pub is_authorized: bool,
    #[cfg_attr(feature = "docs", schema(example = 90))]
    pub remaining_balance: i64,
    #[cfg_attr(feature = "docs", schema(example = 10))]
    pub charges: i64,
}

impl From<ChargeOutcome> for ChargeResponse {
    fn from(outcome: ChargeOutcome) -> Self {
        Self {
            is_authorized: outcome.is_authorized,
            remaining_balance: outcome.remaining_balance,
            charges: outcome.charges,
        }
    }
}
