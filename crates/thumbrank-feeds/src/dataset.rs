//! Dataset loading — source text through the normalizer, with the sample
//! data standing in when the source is unreachable.

use crate::RecordSource;
use thumbrank_core::{fallback, normalize, ThumbnailRecord};

/// Where the records on screen came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataOrigin {
    /// Parsed from the source text (possibly zero records).
    Live { source: String },
    /// The source failed; records are the built-in samples.
    Fallback { reason: String },
}

impl DataOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DataOrigin::Fallback { .. })
    }
}

/// Records plus their origin, as handed to the dashboard.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<ThumbnailRecord>,
    pub origin: DataOrigin,
}

impl Dataset {
    /// The sample dataset, tagged with why it is being used.
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self {
            records: fallback::sample_records(),
            origin: DataOrigin::Fallback {
                reason: reason.into(),
            },
        }
    }
}

/// Fetch and normalize. Never fails: any source error yields the fallback.
pub async fn load_dataset(source: &dyn RecordSource) -> Dataset {
    let described = source.describe();

    match source.fetch_text().await {
        Ok(text) => {
            let records = normalize(&text);
            tracing::info!(source = %described, records = records.len(), "dataset loaded");
            Dataset {
                records,
                origin: DataOrigin::Live { source: described },
            }
        }
        Err(err) => {
            tracing::warn!(source = %described, %err, "could not load live data; using sample data");
            Dataset::fallback(err.to_string())
        }
    }
}
