//! Built-in sample dataset shown when the live sheet cannot be fetched.
//!
//! The records use `mock-N` ids so the dashboard can tell them apart from
//! parsed rows (`row-N`).

use crate::ThumbnailRecord;
use std::collections::BTreeMap;

/// Id prefix shared by every sample record.
pub const FALLBACK_ID_PREFIX: &str = "mock";

const SAMPLES: &[(&str, &str, f64, f64, &str)] = &[
    ("範例: 如何在10分鐘內學會 React", "react", 12.5, 15000.0, "S"),
    ("範例: 高 CTR 的秘密", "ctr", 8.2, 8500.0, "A"),
    ("範例: 日常 Vlog", "vlog", 3.5, 2000.0, "C"),
    ("範例: TypeScript 終極指南", "ts", 15.1, 32000.0, "S+"),
    ("範例: 為什麼你的程式碼很慢", "slow", 5.1, 4500.0, "B"),
];

/// The fixed sample records, in display order.
pub fn sample_records() -> Vec<ThumbnailRecord> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(i, (title, seed, ctr, views, rating))| ThumbnailRecord {
            id: format!("{FALLBACK_ID_PREFIX}-{}", i + 1),
            title: title.to_string(),
            thumbnail_url: format!("https://picsum.photos/seed/{seed}/320/180"),
            ctr: *ctr,
            views: *views,
            rating: rating.to_string(),
            raw_fields: BTreeMap::new(),
        })
        .collect()
}

/// True when the first record carries a sample id.
pub fn looks_like_fallback(records: &[ThumbnailRecord]) -> bool {
    records
        .first()
        .is_some_and(|r| r.id.starts_with(FALLBACK_ID_PREFIX))
}
