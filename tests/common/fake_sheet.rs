//! Fake published-sheet server.
//!
//! Serves `GET /sheet.csv` with a fixed status and body. Any other path is
//! axum's default 404.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

struct SheetState {
    status: StatusCode,
    body: String,
    hits: AtomicUsize,
}

/// Handle to the running fake sheet server.
pub struct FakeSheet {
    addr: SocketAddr,
    state: Arc<SheetState>,
}

impl FakeSheet {
    /// Start serving `body` with `status` on a random port.
    pub async fn start(status: StatusCode, body: impl Into<String>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(SheetState {
            status,
            body: body.into(),
            hits: AtomicUsize::new(0),
        });

        let app = Router::new()
            .route("/sheet.csv", get(serve_sheet))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Full URL of the CSV export.
    pub fn csv_url(&self) -> String {
        format!("http://{}/sheet.csv", self.addr)
    }

    /// Number of requests served so far.
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn serve_sheet(State(state): State<Arc<SheetState>>) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    (state.status, state.body.clone())
}
