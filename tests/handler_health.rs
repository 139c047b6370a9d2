mod common;

use axum_test::TestServer;
use linkcut::routes::app_router;
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_ok() {
    let (state, _repository) = common::create_test_state();
    let server = TestServer::new(app_router(state)).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 200);

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}
