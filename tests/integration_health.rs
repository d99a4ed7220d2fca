use axum::body::Body;
use axum::body::to_bytes;
use axum::http::Request;
use omsbot_rs::{db, server};
use tower::util::ServiceExt;

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let pool = db::connect_in_memory().await.unwrap();
    let app = server::build_router(pool, None);

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.expect("service call failed");
    assert_eq!(resp.status(), 200);

    let body_bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body_str = std::str::from_utf8(&body_bytes).unwrap();
    assert!(body_str.contains("\"status\":\"ok\""));
    assert!(body_str.contains("\"database\":\"ok\""));
}

#[tokio::test]
async fn health_endpoint_reports_closed_database() {
    let pool = db::connect_in_memory().await.unwrap();
    pool.close().await;
    let app = server::build_router(pool, None);

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.expect("service call failed");
    assert_eq!(resp.status(), 503);
}
