//! thumbrank-core — thumbnail performance records and the sheet normalizer.
//!
//! This crate holds everything that does no I/O: the [`ThumbnailRecord`]
//! type, the CSV [`normalizer`], ranking, the fallback sample data, the
//! commentary prompt, the plain-text report and the configuration types.
//!
//! # Data flow
//!
//! ```text
//! sheet CSV ──► normalizer ──► sort ──► dashboard / report
//!                                  └──► prompt ──► commentary model
//! ```

pub mod config;
pub mod fallback;
pub mod normalizer;
pub mod prompt;
pub mod report;
pub mod sort;
pub mod types;

pub use normalizer::normalize;
pub use sort::sort_records;
pub use types::{SortOption, ThumbnailRecord};
