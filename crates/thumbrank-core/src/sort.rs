//! Ranking — reorders records for the board without touching the originals.

use crate::{SortOption, ThumbnailRecord};

/// Return a sorted copy of `records`. The sort is stable, so rows that tie
/// keep their sheet order.
pub fn sort_records(records: &[ThumbnailRecord], option: SortOption) -> Vec<ThumbnailRecord> {
    let mut sorted = records.to_vec();
    match option {
        SortOption::CtrDesc => sorted.sort_by(|a, b| b.ctr.total_cmp(&a.ctr)),
        SortOption::CtrAsc => sorted.sort_by(|a, b| a.ctr.total_cmp(&b.ctr)),
        SortOption::RatingDesc => sorted.sort_by(|a, b| a.rating.cmp(&b.rating)),
    }
    sorted
}
