use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tokio_util::task::TaskTracker;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use edulead_api::config::ServerConfig;
use edulead_api::notifications::{NotificationSink, SubmissionNotice};
use edulead_api::routes;
use edulead_api::state::AppState;
use edulead_sheets::{MemorySheet, SheetStore};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

// ---------------------------------------------------------------------------
// Notification doubles
// ---------------------------------------------------------------------------

/// Captures delivered notices instead of sending email.
#[derive(Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<SubmissionNotice>>,
}

impl RecordingSink {
    pub async fn notices(&self) -> Vec<SubmissionNotice> {
        self.notices.lock().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, notice: SubmissionNotice) {
        self.notices.lock().await.push(notice);
    }
}

/// Panics on delivery, to prove a broken mailer cannot fail a submission.
pub struct PanickingSink;

#[async_trait]
impl NotificationSink for PanickingSink {
    async fn deliver(&self, _notice: SubmissionNotice) {
        panic!("notification delivery exploded");
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// A router wired to in-memory doubles, plus handles to inspect them.
pub struct TestApp {
    pub app: Router,
    pub sheet: Arc<MemorySheet>,
    pub sink: Arc<RecordingSink>,
    pub tracker: TaskTracker,
}

impl TestApp {
    /// Wait until every spawned notification delivery has finished.
    pub async fn drain_notifications(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}

/// Build the full application router against an in-memory sheet and a
/// recording notification sink.
pub fn build_test_app() -> TestApp {
    let sheet = Arc::new(MemorySheet::new());
    let sink = Arc::new(RecordingSink::default());
    let tracker = TaskTracker::new();

    let app = build_app_with(
        Arc::clone(&sheet) as Arc<dyn SheetStore>,
        Some(Arc::clone(&sink) as Arc<dyn NotificationSink>),
        tracker.clone(),
    );

    TestApp {
        app,
        sheet,
        sink,
        tracker,
    }
}

/// Build the application router with all middleware layers over the given
/// doubles.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_app_with(
    store: Arc<dyn SheetStore>,
    notifier: Option<Arc<dyn NotificationSink>>,
    tracker: TaskTracker,
) -> Router {
    let config = test_config();

    let state = AppState {
        store,
        notifier,
        config: Arc::new(config),
        tracker,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the router and return the response.
pub async fn get(app: Router, path: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("request completes")
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds"),
    )
    .await
    .expect("request completes")
}

/// Boundary used by [`multipart_body`] and [`post_multipart`].
pub const BOUNDARY: &str = "X-EDULEAD-TEST-BOUNDARY";

/// Assemble a `multipart/form-data` body from text fields and an optional
/// `cv` file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"cv\"; \
                 filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Send a POST request with a multipart body and return the response.
pub async fn post_multipart(app: Router, path: &str, body: Vec<u8>) -> Response {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(
                CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("request builds"),
    )
    .await
    .expect("request completes")
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}
