use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, instrument};

use crate::incoming::http_axum::{
    core::extractors::JsonOrDefault,
    dto::{
        requests::{ChargeRequest, ResetRequest, validate_request},
        responses::ChargeResponse,
    },
    error_mapper::HttpError,
};
use crate::shared::app_state::AppState;

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/reset",
    tag = "ledger",
    request_body(content = ResetRequest, description = "Account to reset; optional"),
    responses(
        (status = 204, description = "Balance reset to the configured default"),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Balance store unavailable or write not acknowledged")
    )
))]
#[instrument(skip(state, request))]
pub async fn reset_account(
    State(state): State<AppState>,
    JsonOrDefault(request): JsonOrDefault<ResetRequest>,
) -> Result<StatusCode, HttpError> {
    validate_request(&request)?;
    let account = request.account_or(&state.config.ledger.default_account)?;

    state.ledger_use_case.reset(&account).await?;

    info!("Successfully reset account {}", account);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/charge",
    tag = "ledger",
    request_body(content = ChargeRequest, description = "Account and amount to charge; both optional"),
    responses(
        (status = 200, description = "Charge evaluated; check isAuthorized", body = ChargeResponse),
        (status = 422, description = "Invalid request body"),
        (status = 500, description = "Balance store unavailable or script failed")
    )
))]
#[instrument(skip(state, request))]
pub async fn charge_account(
    State(state): State<AppState>,
    JsonOrDefault(request): JsonOrDefault<ChargeRequest>,
) -> Result<Json<ChargeResponse>, HttpError> {
    validate_request(&request)?;
    let account = request.account_or(&state.config.ledger.default_account)?;
    let amount = request.charges_or(state.config.ledger.default_charge);

    let outcome = state.ledger_use_case.charge(&account, amount).await?;

    info!(
        "Successfully charged account {} (authorized: {}, remaining: {})",
        account, outcome.is_authorized, outcome.remaining_balance
    );
    Ok(Json(ChargeResponse::from(outcome)))
}
