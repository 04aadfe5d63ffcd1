mod common;

use axum::http::StatusCode;
use sqlx::PgPool;
use tower::ServiceExt;

use common::{json_request, response_json, setup_test_app};

#[sqlx::test(migrations = "./migrations")]
async fn test_health_check(pool: PgPool) {
    let app = setup_test_app(pool.clone());

    let request = json_request("GET", "/api/health", None, None);
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "success");
    assert!(body["timestamp"].is_string());
    assert!(body["version"].is_string());
}
