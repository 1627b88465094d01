use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use balance_ledger_application::error::AppError;

pub struct HttpError(pub AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status_code = match app_error {
            AppError::Domain(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ConnectionError { .. }
            | AppError::StoreError { .. }
            | AppError::ConfigError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code.is_server_error() {
            error!("Server error response generated: {}", app_error);
        } else {
            debug!("Client error response generated: {}", app_error);
        }

        let error_response = json!({
            "ok": false,
            "error": app_error.to_string(),
            "status": status_code.as_u16()
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<AppError> for HttpError {
    fn from(app_error: AppError) -> Self {
        HttpError(app_error)
    }
}
