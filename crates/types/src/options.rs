//! Delimited option-list parsing.

/// Split a comma-delimited option string into its entries, order preserved.
///
/// Mirrors the host's semantics exactly: no trimming, no deduplication, so
/// `"A,,B"` yields three entries with an empty middle one. A missing or
/// empty source string yields an empty list (a malformed list degrades to
/// "render nothing" rather than failing the control).
pub fn parse_option_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        None | Some("") => Vec::new(),
        Some(s) => s.split(',').map(str::to_string).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_count_and_order() {
        assert_eq!(parse_option_list(Some("A,B,C")), vec!["A", "B", "C"]);
        assert_eq!(parse_option_list(Some("one")), vec!["one"]);
    }

    #[test]
    fn test_empty_segments_survive() {
        assert_eq!(parse_option_list(Some("A,,B")), vec!["A", "", "B"]);
        assert_eq!(parse_option_list(Some(",")), vec!["", ""]);
    }

    #[test]
    fn test_missing_or_empty_is_empty_list() {
        assert!(parse_option_list(None).is_empty());
        assert!(parse_option_list(Some("")).is_empty());
    }

    #[test]
    fn test_no_trimming_or_dedup() {
        assert_eq!(
            parse_option_list(Some(" A ,A, A ")),
            vec![" A ", "A", " A "]
        );
    }
}
