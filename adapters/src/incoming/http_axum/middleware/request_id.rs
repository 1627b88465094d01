use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

fn is_ledger_path(path: &str) -> bool {
    matches!(path, "/reset" | "/charge")
}

/// Reuses a caller-supplied id when it is a valid header value, otherwise
/// mints a fresh UUID.
fn resolve_request_id(request: &Request) -> HeaderValue {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|value| value.to_str().is_ok())
        .cloned()
        .or_else(|| HeaderValue::from_str(&Uuid::new_v4().to_string()).ok())
        .unwrap_or_else(|| HeaderValue::from_static("unknown"))
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = resolve_request_id(&request);
    request
        .headers_mut()
        .insert(REQUEST_ID_HEADER, request_id.clone());

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let log_request = is_ledger_path(&path);
    let id = request_id.to_str().unwrap_or_default().to_owned();

    if log_request {
        info!(request_id = %id, %method, %path, "Processing ledger request");
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, request_id);

    if log_request {
        info!(
            request_id = %id,
            status = %response.status(),
            %method,
            %path,
            "Ledger request completed"
        );
    }

    response
}
