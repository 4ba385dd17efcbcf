//! Domain-specific assertion macros for thumbrank harnesses.

/// Assert the ids of a record slice, in order.
///
/// ```rust,ignore
/// assert_ids!(records, ["row-2", "row-1"]);
/// ```
#[macro_export]
macro_rules! assert_ids {
    ($records:expr, [$($id:expr),* $(,)?]) => {{
        let actual: Vec<&str> = $records.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<&str> = vec![$($id),*];
        pretty_assertions::assert_eq!(actual, expected, "record ids differ");
    }};
}

/// Assert that a slice of records is ordered by `ctr` with the given
/// comparison between neighbours (`>=` for high → low).
#[macro_export]
macro_rules! assert_ctr_ordered {
    ($records:expr, $op:tt) => {{
        for pair in $records.windows(2) {
            assert!(
                pair[0].ctr $op pair[1].ctr,
                "assert_ctr_ordered! failed: {} ({}) then {} ({})",
                pair[0].id, pair[0].ctr, pair[1].id, pair[1].ctr
            );
        }
    }};
}
