//! Sheet exports used across harnesses.

/// English headers, three rows in source order Alpha, Beta, Gamma.
pub const SHEET_ASCII: &str = "\
Title,Thumbnail URL,CTR,Views,Rating
Alpha launch,http://img/a.jpg,12.5%,\"15,000\",S
Beta recap,http://img/b.jpg,3.2%,2000,C
Gamma tips,http://img/c.jpg,8%,8500,A
";

/// `SHEET_ASCII` ranked by CTR, high to low, as printed by `--print`.
pub const SHEET_ASCII_TABLE: &str = "\
rank     ctr      views rating title
   1   12.5%      15000 S      Alpha launch
   2    8.0%       8500 A      Gamma tips
   3    3.2%       2000 C      Beta recap
";

/// Chinese headers with a quoted thousands separator.
pub const SHEET_CHINESE: &str =
    "標題,縮圖連結,點閱率,觀看次數,評級\nHello World,http://x/a.jpg,12.5%,\"1,000\",S\n";

/// Only title and thumbnail columns; the one row has no title.
pub const SHEET_UNTITLED: &str = "Title,Thumbnail\n,http://x/b.jpg\n";

/// Blank line and an all-empty row between the header and a valid row.
pub const SHEET_WITH_GAPS: &str = "Title,Thumbnail,CTR\n\n,,\nReal,http://x/r.jpg,4.5\n";

/// Windows line endings, extra unrecognised columns.
pub const SHEET_CRLF: &str =
    "Video Title,Image,Click-through,Views,Score,Notes\r\nOne,http://x/1.jpg,1.5,10,B,keep\r\nTwo,http://x/2.jpg,2.5,20,A,\r\n";

/// Header row only.
pub const SHEET_HEADER_ONLY: &str = "Title,Thumbnail URL,CTR,Views,Rating\n";

/// A sheet with `rows` generated data rows, for properties and benches.
pub fn generated_sheet(rows: usize) -> String {
    let mut out = String::from("標題,縮圖網址,點閱率,觀看次數,演算法評鑑,備註\n");
    for i in 0..rows {
        out.push_str(&format!(
            "Video {i},https://img.example/{i}.jpg,{}.{}%,\"{},{:03}\",{},note {i}\n",
            i % 23,
            i % 10,
            i % 90 + 1,
            i % 1000,
            ["S", "A", "B", "C", ""][i % 5],
        ));
    }
    out
}
