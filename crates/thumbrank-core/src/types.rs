//! Core types for thumbrank-core.
//!
//! This module defines the data structures shared across all layers: the
//! normalised [`ThumbnailRecord`] and the [`SortOption`] the dashboard ranks by.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of the thumbnail performance sheet after normalisation.
///
/// Records are built once by the normalizer (or the fallback dataset) and are
/// never mutated afterwards. Sorting produces reordered copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRecord {
    /// Synthetic identifier derived from the source row position (`row-N`),
    /// or `mock-N` for the built-in sample data.
    pub id: String,
    /// Display title. Never empty.
    pub title: String,
    /// Thumbnail image URL. Empty means "render a placeholder".
    pub thumbnail_url: String,
    /// Click-through rate in percent (`5.5` means 5.5%). Finite, >= 0.
    pub ctr: f64,
    /// View count. Finite, >= 0.
    pub views: f64,
    /// Free-form grade such as `S`, `A`, `B+`. Never empty (`-` when absent).
    pub rating: String,
    /// Header name to original cell text, kept for traceability.
    pub raw_fields: BTreeMap<String, String>,
}

/// Ordering applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Highest click-through rate first.
    #[default]
    CtrDesc,
    /// Lowest click-through rate first.
    CtrAsc,
    /// Rating strings in ascending lexical order, so `A` ranks above `B`.
    RatingDesc,
}

impl SortOption {
    /// Next option in the `s` key cycle.
    pub fn cycle(self) -> Self {
        match self {
            SortOption::CtrDesc => SortOption::CtrAsc,
            SortOption::CtrAsc => SortOption::RatingDesc,
            SortOption::RatingDesc => SortOption::CtrDesc,
        }
    }

    /// Short human label for the header bar.
    pub fn label(self) -> &'static str {
        match self {
            SortOption::CtrDesc => "CTR high → low",
            SortOption::CtrAsc => "CTR low → high",
            SortOption::RatingDesc => "rating",
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOption::CtrDesc => write!(f, "ctr-desc"),
            SortOption::CtrAsc => write!(f, "ctr-asc"),
            SortOption::RatingDesc => write!(f, "rating"),
        }
    }
}

impl std::str::FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ctr-desc" | "ctr" => Ok(SortOption::CtrDesc),
            "ctr-asc" => Ok(SortOption::CtrAsc),
            "rating" | "rating-desc" => Ok(SortOption::RatingDesc),
            other => Err(format!(
                "unknown sort option: {other} (expected ctr-desc, ctr-asc or rating)"
            )),
        }
    }
}
