//! Fake generative-language API plus a thumbnail host.
//!
//! Serves:
//! - `POST /v1beta/models/{call}` — records the request and answers with the
//!   configured [`Reply`]
//! - `GET /img/thumb.png` — a few bytes of "PNG" with `content-type: image/png`
//!
//! Anything else under `/img/` is a 404, which the analyst treats as an
//! unreadable thumbnail.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// Bytes served at `/img/thumb.png`.
pub const THUMB_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-thumbnail";

/// How the fake model answers.
#[derive(Debug, Clone)]
pub enum Reply {
    /// 200 with one candidate holding these text parts.
    Text(Vec<&'static str>),
    /// 200 with no candidates at all.
    Empty,
    /// 400 with the API's invalid-key error envelope.
    InvalidKey,
    /// 500 with a plain-text body.
    ServerError,
}

/// One request as seen by the fake.
#[derive(Debug, Clone)]
pub struct Recorded {
    /// The `{model}:generateContent` path segment.
    pub call: String,
    pub api_key: Option<String>,
    pub body: serde_json::Value,
}

struct GeminiState {
    reply: Reply,
    requests: Mutex<Vec<Recorded>>,
}

/// Handle to the running fake.
pub struct FakeGemini {
    addr: SocketAddr,
    state: Arc<GeminiState>,
}

impl FakeGemini {
    pub async fn start(reply: Reply) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(GeminiState {
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1beta/models/{call}", post(generate))
            .route("/img/thumb.png", get(thumbnail))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Value for `[analysis] endpoint`.
    pub fn endpoint(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    /// URL of the served thumbnail.
    pub fn thumb_url(&self) -> String {
        format!("http://{}/img/thumb.png", self.addr)
    }

    /// URL under `/img/` that does not exist.
    pub fn missing_thumb_url(&self) -> String {
        format!("http://{}/img/missing.png", self.addr)
    }

    pub async fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().await.clone()
    }
}

async fn generate(
    Path(call): Path<String>,
    State(state): State<Arc<GeminiState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let api_key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().await.push(Recorded {
        call,
        api_key,
        body,
    });

    match &state.reply {
        Reply::Text(parts) => {
            let parts: Vec<_> = parts
                .iter()
                .map(|t| serde_json::json!({ "text": t }))
                .collect();
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "candidates": [{ "content": { "role": "model", "parts": parts } }]
                })),
            )
        }
        Reply::Empty => (StatusCode::OK, Json(serde_json::json!({ "candidates": [] }))),
        Reply::InvalidKey => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": {
                    "code": 400,
                    "message": "API key not valid. Please pass a valid API key.",
                    "status": "INVALID_ARGUMENT"
                }
            })),
        ),
        Reply::ServerError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": { "code": 500, "message": "internal", "status": "INTERNAL" }
            })),
        ),
    }
}

async fn thumbnail() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "image/png")], THUMB_BYTES)
}
