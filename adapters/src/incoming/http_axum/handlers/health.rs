use axum::{Json, extract::State};

use crate::incoming::http_axum::{dto::responses::HealthResponse, error_mapper::HttpError};
use crate::shared::app_state::AppState;

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Balance store reachable", body = HealthResponse,
         example = json!({ "ok": true })
        ),
        (status = 500, description = "Balance store unreachable")
    ),
    tag = "system",
    summary = "System health check",
    description = "Opens a balance store connection, pings it and releases it.",
    operation_id = "health_check"
))]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, HttpError> {
    state.ledger_use_case.check_store().await?;
    Ok(Json(HealthResponse::healthy()))
}
