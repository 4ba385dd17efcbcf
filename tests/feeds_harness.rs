#![allow(unused)]
//! Feed integration harness.
//!
//! # What this covers
//!
//! - **Sheet over HTTP**: a fake published sheet (axum) served with 200 is
//!   normalized into a live dataset; 404 and refused connections fall back to
//!   the sample data.
//! - **Local file**: a CSV on disk is read as a live dataset; a missing file
//!   falls back.
//! - **Zero records is still live**: a reachable sheet with only a header row
//!   must not be mistaken for a failure.
//!
//! # Running
//!
//! ```sh
//! cargo test --test feeds_harness
//! ```

mod common;
use axum::http::StatusCode;
use common::fake_sheet::FakeSheet;
use common::*;
use pretty_assertions::assert_eq;
use std::time::Duration;
use thumbrank_core::{config::SheetConfig, fallback};
use thumbrank_feeds::{
    file::FileSource, load_dataset, sheet::SheetSource, DataOrigin, FeedError, RecordSource,
};

fn sheet_source(url: String) -> SheetSource {
    SheetSource::from_config(&SheetConfig {
        csv_url: url,
        timeout_secs: 5,
    })
    .unwrap()
}

// ---------------------------------------------------------------------------
// Sheet over HTTP
// ---------------------------------------------------------------------------

#[tokio::test]
async fn published_sheet_loads_live() {
    let sheet = FakeSheet::start(StatusCode::OK, SHEET_ASCII).await.unwrap();
    let source = sheet_source(sheet.csv_url());

    let dataset = load_dataset(&source).await;

    assert_eq!(
        dataset.origin,
        DataOrigin::Live {
            source: sheet.csv_url()
        }
    );
    assert_ids!(dataset.records, ["row-1", "row-2", "row-3"]);
    assert_eq!(dataset.records[0].views, 15_000.0);
    assert_eq!(sheet.hits(), 1);
}

#[tokio::test]
async fn not_found_falls_back_to_samples() {
    let sheet = FakeSheet::start(StatusCode::NOT_FOUND, "").await.unwrap();
    let source = sheet_source(sheet.csv_url());

    match source.fetch_text().await {
        Err(FeedError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected a status error, got {other:?}"),
    }

    let dataset = load_dataset(&source).await;
    assert!(dataset.origin.is_fallback());
    assert_eq!(dataset.records, fallback::sample_records());
    assert!(fallback::looks_like_fallback(&dataset.records));
}

#[tokio::test]
async fn refused_connection_falls_back() {
    // Bind then drop to get a port nothing listens on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let source = SheetSource::new(
        format!("http://127.0.0.1:{port}/sheet.csv"),
        Duration::from_secs(2),
    )
    .unwrap();

    let dataset = load_dataset(&source).await;
    match &dataset.origin {
        DataOrigin::Fallback { reason } => assert!(!reason.is_empty()),
        other => panic!("expected fallback, got {other:?}"),
    }
    assert_eq!(dataset.records.len(), 5);
}

#[tokio::test]
async fn header_only_sheet_is_live_and_empty() {
    let sheet = FakeSheet::start(StatusCode::OK, SHEET_HEADER_ONLY).await.unwrap();
    let dataset = load_dataset(&sheet_source(sheet.csv_url())).await;

    assert!(!dataset.origin.is_fallback());
    assert!(dataset.records.is_empty());
}

// ---------------------------------------------------------------------------
// Local file
// ---------------------------------------------------------------------------

#[tokio::test]
async fn csv_file_loads_live() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    std::fs::write(&path, SHEET_CHINESE).unwrap();

    let dataset = load_dataset(&FileSource::new(&path)).await;

    assert_eq!(
        dataset.origin,
        DataOrigin::Live {
            source: path.display().to_string()
        }
    );
    assert_eq!(dataset.records.len(), 1);
    assert_eq!(dataset.records[0].title, "Hello World");
}

#[tokio::test]
async fn missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(dir.path().join("nope.csv"));

    assert!(matches!(
        source.fetch_text().await,
        Err(FeedError::Io { .. })
    ));
    let dataset = load_dataset(&source).await;
    match dataset.origin {
        DataOrigin::Fallback { reason } => assert!(reason.contains("nope.csv")),
        other => panic!("expected fallback, got {other:?}"),
    }
}
