use axum::{
    Router,
    routing::{get, post},
};
#[cfg(feature = "docs")]
use utoipa::OpenApi;
#[cfg(feature = "docs")]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::docs::ApiDoc;
use crate::incoming::http_axum::{
    handlers::{
        health::health_check,
        ledger::{charge_account, reset_account},
    },
    router_ext::RouterExt,
};
use crate::shared::app_state::AppState;

pub fn build_application_router() -> Router<AppState> {
    let router = Router::new()
        .route("/reset", post(reset_account))
        .route("/charge", post(charge_account))
        .route("/health", get(health_check))
        .with_request_id();

    #[cfg(feature = "docs")]
    {
        router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }

    #[cfg(not(feature = "docs"))]
    {
        router
    }
}
