//! Mock image edit backend for integration tests
//!
//! Implements the slice of the `OpenAI` images API the provider uses:
//! `POST /v1/images/edits` with a multipart form.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;

/// How the mock answers image edit requests
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Return one image URL
    Succeed,
    /// Return the given status with an `OpenAI` style error body
    Fail(u16, &'static str),
    /// Return 200 with an empty `data` array
    Empty,
    /// Sleep before answering successfully
    Delay(Duration),
}

/// One image edit request as received by the mock
#[derive(Debug, Clone, Default)]
pub struct RecordedEdit {
    pub authorization: Option<String>,
    pub prompt: Option<String>,
    pub size: Option<String>,
    pub n: Option<String>,
    pub response_format: Option<String>,
    pub model: Option<String>,
    pub image_file_name: Option<String>,
    pub image_content_type: Option<String>,
    pub image: Vec<u8>,
}

/// Mock provider that records requests and answers per [`Behavior`]
pub struct MockOpenAi {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    behavior: Behavior,
    edit_count: AtomicU32,
    last_edit: Mutex<Option<RecordedEdit>>,
}

/// URL the mock hands back for every generated image
pub const GENERATED_URL: &str = "https://images.example.com/generated/doodle.png";

impl MockOpenAi {
    /// Start a mock that always succeeds
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_with(Behavior::Succeed).await
    }

    /// Start a mock with the given behavior, returning immediately
    pub async fn start_with(behavior: Behavior) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behavior,
            edit_count: AtomicU32::new(0),
            last_edit: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/images/edits", routing::post(handle_edit))
            .layer(DefaultBodyLimit::disable())
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1` since the provider appends `/images/edits`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of image edit requests received
    pub fn edit_count(&self) -> u32 {
        self.state.edit_count.load(Ordering::Relaxed)
    }

    /// The most recent image edit request
    pub fn last_edit(&self) -> Option<RecordedEdit> {
        self.state.last_edit.lock().unwrap().clone()
    }
}

impl Drop for MockOpenAi {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_edit(State(state): State<Arc<MockState>>, headers: HeaderMap, mut multipart: Multipart) -> Response {
    state.edit_count.fetch_add(1, Ordering::Relaxed);

    let mut edit = RecordedEdit {
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned),
        ..RecordedEdit::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_owned();

        if name == "image" {
            edit.image_file_name = field.file_name().map(ToOwned::to_owned);
            edit.image_content_type = field.content_type().map(ToOwned::to_owned);
            edit.image = field.bytes().await.unwrap().to_vec();
            continue;
        }

        let value = Some(field.text().await.unwrap());
        match name.as_str() {
            "prompt" => edit.prompt = value,
            "size" => edit.size = value,
            "n" => edit.n = value,
            "response_format" => edit.response_format = value,
            "model" => edit.model = value,
            _ => {}
        }
    }

    *state.last_edit.lock().unwrap() = Some(edit);

    match &state.behavior {
        Behavior::Succeed => success(),
        Behavior::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            success()
        }
        Behavior::Empty => Json(serde_json::json!({"created": 1_700_000_000, "data": []})).into_response(),
        Behavior::Fail(status, message) => {
            let status = StatusCode::from_u16(*status).unwrap();
            let body = serde_json::json!({
                "error": {"message": message, "type": "invalid_request_error", "code": null}
            });
            (status, Json(body)).into_response()
        }
    }
}

fn success() -> Response {
    Json(serde_json::json!({
        "created": 1_700_000_000,
        "data": [{"url": GENERATED_URL}]
    }))
    .into_response()
}
