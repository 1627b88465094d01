use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

use crate::incoming::http_axum::error_mapper::HttpError;
use balance_ledger_application::error::AppError;

/// JSON body where an empty body stands for `T::default()`.
pub struct JsonOrDefault<T>(pub T);

impl<S, T> FromRequest<S> for JsonOrDefault<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Default,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            HttpError(AppError::ValidationError {
                message: rejection.body_text(),
            })
        })?;

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        serde_json::from_slice(&body).map(Self).map_err(|e| {
            HttpError(AppError::ValidationError {
                message: format!("Invalid JSON body: {e}"),
            })
        })
    }
}
