//! Normalizer — turns the published sheet's CSV text into [`ThumbnailRecord`] values.
//!
//! The sheet is maintained by hand, so nothing about it is trusted: column
//! order varies, headers mix Chinese and English, numbers carry `%` signs and
//! thousands separators, and rows are often ragged. [`normalize`] is total. It
//! never fails and never panics; the only signal of bad input is a short or
//! empty result.
//!
//! Parsing runs in three steps:
//!
//! 1. split into lines and drop blank ones;
//! 2. tokenize the first line as the header and resolve each [`Role`] to a
//!    column index by keyword matching ([`ColumnMap::resolve`]);
//! 3. tokenize every remaining line and pull each role's cell, coercing the
//!    numeric ones with [`coerce_number`].
//!
//! The tokenizer is deliberately not RFC 4180: a `"` only toggles quoting and
//! is never emitted, so a doubled `""` inside a quoted field is two toggles
//! rather than a literal quote. Sheets exported by Google never need it, and
//! the dashboard has always behaved this way.

use crate::ThumbnailRecord;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{FEFF}';

/// Rating shown when a row has no grade.
pub const RATING_SENTINEL: &str = "-";

/// Longest decimal literal at the start of a cleaned cell.
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("leading-number pattern must compile")
});

// ---------------------------------------------------------------------------
// Column roles
// ---------------------------------------------------------------------------

/// A semantic column the normalizer looks for among arbitrary sheet headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Title,
    ThumbnailUrl,
    Ctr,
    Views,
    Rating,
}

/// Keywords per role, matched case-insensitively as substrings of a header.
///
/// Each role is resolved on its own: one header may satisfy several roles,
/// and within a role the leftmost matching header wins.
pub const ROLE_KEYWORDS: &[(Role, &[&str])] = &[
    (Role::Title, &["標題", "Title", "name", "影片", "video"]),
    (
        Role::ThumbnailUrl,
        &["縮圖", "網址", "Image", "Thumbnail", "url", "封面", "圖片", "picture"],
    ),
    (Role::Ctr, &["CTR", "點擊率", "點閱率", "Click", "點閱"]),
    (Role::Views, &["觀看", "Views", "流量", "次數"]),
    (
        Role::Rating,
        &["評鑑", "Rating", "Score", "Grade", "演算法", "評級", "分數"],
    ),
];

/// Column index for each [`Role`], or `None` when no header matched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub title: Option<usize>,
    pub thumbnail_url: Option<usize>,
    pub ctr: Option<usize>,
    pub views: Option<usize>,
    pub rating: Option<usize>,
}

impl ColumnMap {
    /// Resolve every role against the header row.
    pub fn resolve(headers: &[String]) -> Self {
        let mut map = ColumnMap::default();
        for (role, keywords) in ROLE_KEYWORDS {
            *map.slot_mut(*role) = find_column(headers, keywords);
        }
        map
    }

    pub fn index(&self, role: Role) -> Option<usize> {
        match role {
            Role::Title => self.title,
            Role::ThumbnailUrl => self.thumbnail_url,
            Role::Ctr => self.ctr,
            Role::Views => self.views,
            Role::Rating => self.rating,
        }
    }

    fn slot_mut(&mut self, role: Role) -> &mut Option<usize> {
        match role {
            Role::Title => &mut self.title,
            Role::ThumbnailUrl => &mut self.thumbnail_url,
            Role::Ctr => &mut self.ctr,
            Role::Views => &mut self.views,
            Role::Rating => &mut self.rating,
        }
    }
}

/// Index of the first header containing any keyword (case-insensitive).
pub fn find_column(headers: &[String], keywords: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.to_lowercase();
        keywords
            .iter()
            .any(|keyword| header.contains(&keyword.to_lowercase()))
    })
}

// ---------------------------------------------------------------------------
// Tokenizing and coercion
// ---------------------------------------------------------------------------

/// Strip whitespace and byte-order marks from both ends.
///
/// Spreadsheet exports saved as "CSV UTF-8" lead with U+FEFF, which
/// `str::trim` keeps.
fn trim_cell(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// Split one line on commas that sit outside a quoted span.
///
/// Quote characters toggle the quoted state and are dropped. Every field is
/// trimmed, byte-order marks included.
pub fn tokenize_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            DELIMITER if !in_quotes => {
                fields.push(trim_cell(&current).to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(trim_cell(&current).to_string());

    fields
}

/// Coerce a spreadsheet cell such as `"12.5%"` or `"1,000"` to a number.
///
/// Percent signs, currency symbols, commas and whitespace are removed, then
/// the leading decimal literal is parsed. Anything else (empty text, no
/// digits, a negative or non-finite value) becomes `0.0`.
pub fn coerce_number(text: &str) -> f64 {
    let clean: String = text.chars().filter(|c| !is_numeric_noise(*c)).collect();

    match LEADING_NUMBER
        .find(&clean)
        .and_then(|m| m.as_str().parse::<f64>().ok())
    {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

fn is_numeric_noise(c: char) -> bool {
    matches!(c, '%' | '$' | '€' | '£' | '¥' | '₩' | '₹' | ',') || c.is_whitespace()
}

/// Remove one leading and one trailing `"` if present.
fn strip_outer_quotes(cell: &str) -> &str {
    let cell = cell.strip_prefix(QUOTE).unwrap_or(cell);
    cell.strip_suffix(QUOTE).unwrap_or(cell)
}

/// Title used for rows whose title cell is empty. `row` is 1-based.
pub fn placeholder_title(row: usize) -> String {
    format!("Video {row}")
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Parse raw sheet text (header row first) into records, in source order.
///
/// Blank lines are skipped before numbering, so `row` in `row-N` and in the
/// placeholder title counts non-blank data lines from 1.
pub fn normalize(raw: &str) -> Vec<ThumbnailRecord> {
    let mut lines = raw.lines().filter(|line| !trim_cell(line).is_empty());

    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let headers = tokenize_line(header_line);
    let columns = ColumnMap::resolve(&headers);
    tracing::debug!(?columns, header_count = headers.len(), "resolved sheet columns");

    lines
        .enumerate()
        .filter_map(|(i, line)| parse_row(i + 1, line, &headers, &columns))
        .collect()
}

fn parse_row(
    row: usize,
    line: &str,
    headers: &[String],
    columns: &ColumnMap,
) -> Option<ThumbnailRecord> {
    let cells = tokenize_line(line);

    let title = cell(&cells, columns.title);
    let thumbnail_url = cell(&cells, columns.thumbnail_url);
    if title.is_empty() && thumbnail_url.is_empty() {
        tracing::debug!(row, "dropping row with neither title nor thumbnail");
        return None;
    }

    let rating = cell(&cells, columns.rating);

    let raw_fields: BTreeMap<String, String> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| (header.clone(), cells.get(i).cloned().unwrap_or_default()))
        .collect();

    Some(ThumbnailRecord {
        id: format!("row-{row}"),
        title: if title.is_empty() {
            placeholder_title(row)
        } else {
            title.to_string()
        },
        thumbnail_url: thumbnail_url.to_string(),
        ctr: coerce_number(cell(&cells, columns.ctr)),
        views: coerce_number(cell(&cells, columns.views)),
        rating: if rating.is_empty() {
            RATING_SENTINEL.to_string()
        } else {
            rating.to_string()
        },
        raw_fields,
    })
}

/// Cell for a resolved column, or `""` when unresolved or past the row's end.
fn cell(cells: &[String], index: Option<usize>) -> &str {
    index
        .and_then(|i| cells.get(i))
        .map(|c| strip_outer_quotes(c))
        .unwrap_or("")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn quoted_comma_stays_in_field() {
        assert_eq!(tokenize_line(r#"A,"B,C",D"#), vec!["A", "B,C", "D"]);
    }

    #[test]
    fn fields_are_trimmed() {
        assert_eq!(tokenize_line("  a , b ,c  "), vec!["a", "b", "c"]);
    }

    #[test]
    fn doubled_quotes_toggle_twice() {
        // Not RFC 4180: `""` is not an escaped quote.
        assert_eq!(tokenize_line(r#"a,"x""y",b"#), vec!["a", "xy", "b"]);
        // The third quote reopens the span, so the comma stays inside.
        assert_eq!(tokenize_line(r#"a,"x"",y",b"#), vec!["a", "x,y", "b"]);
    }

    #[test]
    fn byte_order_mark_is_trimmed_from_header() {
        let records = normalize("\u{FEFF}Title,Thumbnail\nA,http://x\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "A");
        assert_eq!(
            records[0].raw_fields.keys().collect::<Vec<_>>(),
            vec!["Thumbnail", "Title"]
        );
    }

    #[test]
    fn line_holding_only_a_byte_order_mark_is_blank() {
        let records = normalize("Title\n\u{FEFF}\nA");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "row-1");
        assert_eq!(records[0].title, "A");
    }

    #[test]
    fn trailing_delimiter_yields_empty_field() {
        assert_eq!(tokenize_line("a,b,"), vec!["a", "b", ""]);
    }

    #[rstest]
    #[case("12.5%", 12.5)]
    #[case("1,000", 1000.0)]
    #[case("", 0.0)]
    #[case("abc", 0.0)]
    #[case("$1,234.50", 1234.5)]
    #[case(" 7 % ", 7.0)]
    #[case("3.2k", 3.2)]
    #[case(".5", 0.5)]
    #[case("1２", 1.0)]
    #[case("1e3", 1000.0)]
    #[case("-4", 0.0)]
    #[case("1e999", 0.0)]
    fn coerce_number_cases(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(coerce_number(input), expected);
    }

    #[test]
    fn roles_resolve_against_mixed_language_headers() {
        let h = headers(&["標題", "縮圖網址", "CTR", "觀看次數", "評級"]);
        let map = ColumnMap::resolve(&h);
        assert_eq!(
            map,
            ColumnMap {
                title: Some(0),
                thumbnail_url: Some(1),
                ctr: Some(2),
                views: Some(3),
                rating: Some(4),
            }
        );
    }

    #[test]
    fn role_matching_is_case_insensitive() {
        let h = headers(&["VIEWS", "thumbnail", "click rate"]);
        let map = ColumnMap::resolve(&h);
        assert_eq!(map.views, Some(0));
        assert_eq!(map.thumbnail_url, Some(1));
        assert_eq!(map.ctr, Some(2));
        assert_eq!(map.title, None);
        assert_eq!(map.rating, None);
    }

    #[test]
    fn one_header_can_satisfy_two_roles() {
        let h = headers(&["Video URL", "Score"]);
        let map = ColumnMap::resolve(&h);
        assert_eq!(map.title, Some(0));
        assert_eq!(map.thumbnail_url, Some(0));
        assert_eq!(map.index(Role::Rating), Some(1));
    }

    #[test]
    fn leftmost_matching_header_wins() {
        let h = headers(&["Notes", "Image", "Thumbnail"]);
        assert_eq!(find_column(&h, &["Image", "Thumbnail"]), Some(1));
    }

    #[test]
    fn empty_and_header_only_inputs_yield_nothing() {
        assert!(normalize("").is_empty());
        assert!(normalize("\n\r\n   \n").is_empty());
        assert!(normalize("Title,Thumbnail\n").is_empty());
    }

    #[test]
    fn scenario_chinese_headers() {
        let raw = "標題,縮圖網址,CTR,觀看次數,評級\nHello World,http://x/a.jpg,12.5%,\"1,000\",S\n";
        let records = normalize(raw);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, "row-1");
        assert_eq!(r.title, "Hello World");
        assert_eq!(r.thumbnail_url, "http://x/a.jpg");
        assert_eq!(r.ctr, 12.5);
        assert_eq!(r.views, 1000.0);
        assert_eq!(r.rating, "S");
        assert_eq!(r.raw_fields["觀看次數"], "1,000");
    }

    #[test]
    fn scenario_missing_title_gets_placeholder() {
        let records = normalize("Title,Thumbnail\n,http://x/b.jpg");
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.title, placeholder_title(1));
        assert_eq!(r.thumbnail_url, "http://x/b.jpg");
        assert_eq!(r.ctr, 0.0);
        assert_eq!(r.views, 0.0);
        assert_eq!(r.rating, RATING_SENTINEL);
    }

    #[test]
    fn scenario_blank_row_is_skipped() {
        let records = normalize("Title,CTR\r\n\r\n   \r\nFirst,4.2%\r\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "row-1");
        assert_eq!(records[0].title, "First");
        assert_eq!(records[0].ctr, 4.2);
    }

    #[test]
    fn row_without_title_or_thumbnail_is_dropped() {
        let records = normalize("Title,Thumbnail,CTR\n,,9%\n,,\nKept,,1%");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Kept");
        // Numbering counts dropped rows too.
        assert_eq!(records[0].id, "row-3");
    }

    #[test]
    fn short_rows_fill_raw_fields_with_empty_strings() {
        let records = normalize("Title,Thumbnail,CTR,Rating\nOnly title");
        let r = &records[0];
        assert_eq!(r.raw_fields.len(), 4);
        assert_eq!(r.raw_fields["Title"], "Only title");
        assert_eq!(r.raw_fields["Rating"], "");
        assert_eq!(r.rating, RATING_SENTINEL);
    }

    #[test]
    fn extra_cells_are_ignored_by_raw_fields() {
        let records = normalize("Title\nA,extra,more");
        assert_eq!(records[0].raw_fields.len(), 1);
    }

    #[test]
    fn no_matching_headers_defaults_every_role() {
        let records = normalize("foo,bar\n1,2\n3,4");
        assert!(records.is_empty(), "no title or thumbnail column means every row is dropped");
    }

    #[test]
    fn normalize_is_idempotent() {
        let raw = "Title,Image,CTR,Views,Grade\nA,http://a,5%,10,A\nB,,2%,\"2,000\",";
        assert_eq!(normalize(raw), normalize(raw));
    }
}
