mod common;

use affiliate_redirect::api::handlers::{health_handler, whoami_handler};
use affiliate_redirect::application::services::UnmappedDomainPolicy;
use axum::{Router, routing::get};
use axum_test::TestServer;

fn app(state: affiliate_redirect::AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/whoami", get(whoami_handler))
        .with_state(state)
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _rx) = common::create_test_state(
        common::full_credentials(),
        UnmappedDomainPolicy::Passthrough,
    );
    let server = TestServer::new(app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["ok"], true);
    assert_eq!(json["decision_queue"], "ok");
    assert!(json["ts"].as_i64().unwrap() > 0);
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_reports_closed_queue() {
    let (state, rx) = common::create_test_state(
        common::full_credentials(),
        UnmappedDomainPolicy::Passthrough,
    );
    drop(rx);
    let server = TestServer::new(app(state)).unwrap();

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["ok"], false);
    assert_eq!(json["decision_queue"], "closed");
}

#[tokio::test]
async fn test_health_with_decisions_disabled() {
    let (mut state, _rx) = common::create_test_state(
        common::full_credentials(),
        UnmappedDomainPolicy::Passthrough,
    );
    state.decision_sender = None;
    let server = TestServer::new(app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["decision_queue"],
        "disabled"
    );
}

#[tokio::test]
async fn test_whoami_reports_deployment() {
    let (state, _rx) = common::create_test_state(
        common::full_credentials(),
        UnmappedDomainPolicy::Passthrough,
    );
    let server = TestServer::new(app(state)).unwrap();

    let response = server.get("/whoami").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["ok"], true);
    assert_eq!(json["env"], "test");
    assert_eq!(json["commit"], "abc1234");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["now"].as_i64().unwrap() > 0);
}
