//! thumbrank-feeds — remote adapters for thumbrank.
//!
//! Two kinds of adapter live here: [`RecordSource`] implementations that
//! produce the raw sheet text ([`sheet::SheetSource`], [`file::FileSource`]),
//! and the [`analysis::Analyst`] that asks a multimodal model for commentary
//! on one thumbnail. [`dataset::load_dataset`] ties a source to the
//! normalizer and substitutes the sample data when the source fails.

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod file;
pub mod sheet;

pub use analysis::{AnalysisError, Analyst, GeminiAnalyst};
pub use dataset::{load_dataset, DataOrigin, Dataset};
pub use error::FeedError;

/// Anything that can hand back the raw CSV text of the sheet.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    /// Human-readable origin (URL or path) for logs and the header bar.
    fn describe(&self) -> String;

    /// Fetch the whole sheet as text.
    async fn fetch_text(&self) -> Result<String, FeedError>;
}
