use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use futures::future::join_all;
use serde_json::{Value, json};
use tower::ServiceExt;

use balance_ledger_application::infrastructure_config::{Config, StoreBackend};
use server::bootstrap::{router::create_router, state::AppState};

fn memory_app() -> Router {
    let mut config = Config::default();
    config.store.backend = StoreBackend::Memory;
    create_router(AppState::new(config).unwrap())
}

fn unreachable_redis_app() -> Router {
    let mut config = Config::default();
    config.redis.host = "127.0.0.1".to_string();
    config.redis.port = 1;
    config.redis.connect_timeout_ms = 500;
    create_router(AppState::new(config).unwrap())
}

async fn post(app: &Router, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::post(path);
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn sequential_charges_drain_default_balance() {
    let app = memory_app();

    let (status, _) = post(&app, "/reset", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for expected in [90, 80, 70, 60, 50, 40] {
        let (status, body) = post(&app, "/charge", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "isAuthorized": true, "remainingBalance": expected, "charges": 10 })
        );
    }

    let (status, body) = post(&app, "/charge", Some(json!({ "charges": 100 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "isAuthorized": false, "remainingBalance": 40, "charges": 0 })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_charges_settle_deterministically() {
    let app = memory_app();
    post(&app, "/reset", None).await;

    let replies = join_all((0..5).map(|_| post(&app, "/charge", None))).await;
    for (status, body) in &replies {
        assert_eq!(*status, StatusCode::OK);
        assert_eq!(body["isAuthorized"], json!(true));
    }

    let (_, body) = post(&app, "/charge", Some(json!({ "charges": 0 }))).await;
    assert_eq!(
        body,
        json!({ "isAuthorized": true, "remainingBalance": 50, "charges": 0 })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_overspend_authorizes_only_what_fits() {
    let app = memory_app();
    post(&app, "/reset", Some(json!({ "account": "race" }))).await;

    let replies = join_all(
        (0..25).map(|_| post(&app, "/charge", Some(json!({ "account": "race", "charges": 30 })))),
    )
    .await;

    let authorized = replies
        .iter()
        .filter(|(_, body)| body["isAuthorized"] == json!(true))
        .count();
    assert_eq!(authorized, 3);

    let (_, body) = post(&app, "/charge", Some(json!({ "account": "race", "charges": 0 }))).await;
    assert_eq!(body["remainingBalance"], json!(10));
}

#[tokio::test]
async fn accounts_are_independent() {
    let app = memory_app();
    post(&app, "/reset", Some(json!({ "account": "alice" }))).await;
    post(&app, "/reset", Some(json!({ "account": "bob" }))).await;

    post(&app, "/charge", Some(json!({ "account": "alice", "charges": 70 }))).await;
    let (_, bob) = post(&app, "/charge", Some(json!({ "account": "bob", "charges": 1 }))).await;

    assert_eq!(bob["remainingBalance"], json!(99));
}

#[tokio::test]
async fn reset_restores_default_after_charges() {
    let app = memory_app();
    post(&app, "/reset", None).await;
    post(&app, "/charge", Some(json!({ "charges": 55 }))).await;

    post(&app, "/reset", None).await;
    let (_, body) = post(&app, "/charge", Some(json!({ "charges": 0 }))).await;

    assert_eq!(body["remainingBalance"], json!(100));
}

#[tokio::test]
async fn charge_on_unknown_account_is_denied() {
    let app = memory_app();

    let (status, body) = post(&app, "/charge", Some(json!({ "account": "nobody" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "isAuthorized": false, "remainingBalance": 0, "charges": 0 })
    );
}

#[tokio::test]
async fn invalid_bodies_are_rejected_at_the_boundary() {
    let app = memory_app();

    let (status, body) = post(&app, "/charge", Some(json!({ "charges": -5 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Validation error"));

    let (status, _) = post(&app, "/charge", Some(json!({ "charges": 1.5 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/reset", Some(json!({ "account": "" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = post(&app, "/charge", Some(json!({ "charges": 9_007_199_254_740_992_i64 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn largest_accepted_charge_is_denied_on_default_balance() {
    let app = memory_app();
    post(&app, "/reset", None).await;

    let (status, body) = post(&app, "/charge", Some(json!({ "charges": 9_007_199_254_740_991_i64 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "isAuthorized": false, "remainingBalance": 100, "charges": 0 })
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = memory_app();
    let request = Request::post("/reset")
        .header("X-Request-Id", "req-1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-1");
}

#[tokio::test]
async fn health_reports_memory_store() {
    let app = memory_app();
    let request = Request::get("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn unreachable_store_surfaces_as_server_error() {
    let app = unreachable_redis_app();

    let (status, body) = post(&app, "/charge", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().starts_with("Connection error"));

    let (status, _) = post(&app, "/reset", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let request = Request::get("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["ok"], json!(false));
}
