//! Test builders — ergonomic constructors for `ThumbnailRecord`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use std::collections::BTreeMap;
use thumbrank_core::ThumbnailRecord;

/// Fluent builder for [`ThumbnailRecord`] test fixtures.
///
/// # Example
///
/// ```rust,ignore
/// let record = RecordBuilder::new("row-1")
///     .title("Launch day")
///     .ctr(7.5)
///     .rating("A")
///     .build();
/// ```
pub struct RecordBuilder {
    record: ThumbnailRecord,
}

impl RecordBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            record: ThumbnailRecord {
                title: format!("title of {id}"),
                thumbnail_url: String::new(),
                ctr: 0.0,
                views: 0.0,
                rating: "-".to_string(),
                raw_fields: BTreeMap::new(),
                id,
            },
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.record.title = title.into();
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.record.thumbnail_url = url.into();
        self
    }

    pub fn ctr(mut self, ctr: f64) -> Self {
        self.record.ctr = ctr;
        self
    }

    pub fn views(mut self, views: f64) -> Self {
        self.record.views = views;
        self
    }

    pub fn rating(mut self, rating: impl Into<String>) -> Self {
        self.record.rating = rating.into();
        self
    }

    pub fn build(self) -> ThumbnailRecord {
        self.record
    }
}

/// `n` records with CTRs cycling through a small range and mixed ratings.
pub fn many_records(n: usize) -> Vec<ThumbnailRecord> {
    (0..n)
        .map(|i| {
            RecordBuilder::new(format!("row-{}", i + 1))
                .ctr((i * 37 % 200) as f64 / 10.0)
                .views((i * 113 % 50_000) as f64)
                .rating(["S", "A", "B", "C", "-"][i % 5])
                .build()
        })
        .collect()
}
