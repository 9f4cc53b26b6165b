use affiliate_redirect::domain::decision_event::DecisionEvent;
use affiliate_redirect::domain::entities::NetworkKind;
use affiliate_redirect::infrastructure::dispatch::{DecisionSink, SinkError, WebhookSink};
use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Local stand-in for a decision collector.
#[derive(Clone, Default)]
struct Collector {
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn accept(State(c): State<Collector>, Json(body): Json<serde_json::Value>) -> StatusCode {
    c.hits.fetch_add(1, Ordering::SeqCst);
    c.bodies.lock().unwrap().push(body);
    StatusCode::NO_CONTENT
}

async fn fail(State(c): State<Collector>) -> StatusCode {
    c.hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn slow(State(c): State<Collector>) -> StatusCode {
    c.hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_secs(2)).await;
    StatusCode::OK
}

async fn spawn_collector() -> (SocketAddr, Collector) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let collector = Collector::default();

    let app = Router::new()
        .route("/in", post(accept))
        .route("/fail", post(fail))
        .route("/slow", post(slow))
        .with_state(collector.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, collector)
}

fn sink(addr: SocketAddr, path: &str, timeout: Duration) -> WebhookSink {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    WebhookSink::with_client(client, format!("http://{}{}", addr, path), timeout)
}

fn event() -> DecisionEvent {
    DecisionEvent::new(302, "www.zalando.de", Some(NetworkKind::Awin), true)
        .with_request_meta(Some("req-7"), Some("TestAgent/1.0"))
}

#[tokio::test]
async fn test_webhook_posts_event_as_json() {
    let (addr, collector) = spawn_collector().await;

    sink(addr, "/in", Duration::from_secs(1))
        .dispatch(&event())
        .await
        .unwrap();

    assert_eq!(collector.hits.load(Ordering::SeqCst), 1);
    let bodies = collector.bodies.lock().unwrap();
    let body = &bodies[0];
    assert_eq!(body["outcome"], 302);
    assert_eq!(body["host"], "www.zalando.de");
    assert_eq!(body["network"], "awin");
    assert_eq!(body["is_affiliate"], true);
    assert_eq!(body["expanded"], false);
    assert_eq!(body["correlation_id"], "req-7");
    assert_eq!(body["user_agent"], "TestAgent/1.0");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_webhook_error_status_fails_after_one_attempt() {
    let (addr, collector) = spawn_collector().await;

    let result = sink(addr, "/fail", Duration::from_secs(1))
        .dispatch(&event())
        .await;

    assert!(matches!(result, Err(SinkError::UnexpectedStatus(500))));
    assert_eq!(collector.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_webhook_gives_up_after_timeout() {
    let (addr, collector) = spawn_collector().await;
    let started = tokio::time::Instant::now();

    let result = sink(addr, "/slow", Duration::from_millis(200))
        .dispatch(&event())
        .await;

    assert!(matches!(result, Err(SinkError::RequestError(_))));
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(collector.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unreachable_webhook_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = sink(addr, "/in", Duration::from_secs(1))
        .dispatch(&event())
        .await;

    assert!(matches!(result, Err(SinkError::RequestError(_))));
}
