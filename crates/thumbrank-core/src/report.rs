//! Plain-text ranking table for `--print`.

use crate::ThumbnailRecord;
use std::fmt::Write;

/// Render records, already in display order, as a fixed-width table.
pub fn render_table(records: &[ThumbnailRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>4} {:>7} {:>10} {:<6} title", "rank", "ctr", "views", "rating");

    if records.is_empty() {
        out.push_str("(no thumbnails)\n");
        return out;
    }

    for (i, record) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4} {:>7} {:>10} {:<6} {}",
            i + 1,
            format!("{:.1}%", record.ctr),
            format!("{:.0}", record.views),
            record.rating,
            record.title,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::sample_records;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_table_says_so() {
        assert_eq!(
            render_table(&[]),
            "rank     ctr      views rating title\n(no thumbnails)\n"
        );
    }

    #[test]
    fn rows_are_ranked_from_one() {
        let table = render_table(&sample_records()[..1]);
        let row = table.lines().nth(1).unwrap();
        assert_eq!(row, "   1   12.5%      15000 S      範例: 如何在10分鐘內學會 React");
    }
}
