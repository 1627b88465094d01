use crate::incoming::http_axum::{dto, handlers};
use dto::requests::{ChargeRequest, ResetRequest};
use dto::responses::{ChargeResponse, HealthResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::ledger::reset_account,
        handlers::ledger::charge_account,
        handlers::health::health_check,
    ),
    components(
        schemas(
            ResetRequest,
            ChargeRequest,
            ChargeResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "ledger", description = "Balance operations - reset an account to the default balance and charge it atomically"),
        (name = "system", description = "System health and status monitoring")
    ),
    info(
        title = "Balance Ledger API",
        description = "Account balance ledger. Charges are conditional debits executed atomically inside the balance store, so concurrent charges never overdraw an account.",
    ),
    servers(
        (url = "http://localhost:3000", description = "Development server"),
    )
)]
pub struct ApiDoc;
