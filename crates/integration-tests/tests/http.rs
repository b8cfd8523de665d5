//! Router behavior that does not need a database.

#![allow(clippy::unwrap_used)]

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use shiptrack_integration_tests::{DASHBOARD_ORIGIN, test_app};

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn readiness_reports_unreachable_database() {
    let response = test_app()
        .oneshot(Request::get("/health/ready").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn api_requires_a_session() {
    for uri in [
        "/api/me",
        "/api/shipments",
        "/api/getShipments/1",
        "/api/getShipmentCoordinates",
        "/api/getShipmentCoordinatesById/1",
        "/api/getWarehouses",
        "/api/getDrivers",
        "/api/getCustomers",
    ] {
        let response = test_app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(json_body(response).await["error"], "Login required");
    }
}

#[tokio::test]
async fn writes_require_a_session() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri("/api/shipments/1/status")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "status": "delivered" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn managers_cannot_self_register() {
    let response = test_app()
        .oneshot(post_json(
            "/auth/register",
            &json!({
                "name": "Eve",
                "email": "eve@example.com",
                "password": "long enough password",
                "role": "manager",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn registration_rejects_short_passwords() {
    let response = test_app()
        .oneshot(post_json(
            "/auth/register",
            &json!({
                "name": "Asha",
                "email": "asha@example.com",
                "password": "short",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("at least 8"));
}

#[tokio::test]
async fn cors_preflight_allows_dashboard_origin() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/shipments")
                .header(header::ORIGIN, DASHBOARD_ORIGIN)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        DASHBOARD_ORIGIN
    );
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
        "true"
    );
}

#[tokio::test]
async fn upstream_request_id_is_echoed() {
    let response = test_app()
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "req-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-123");
}
