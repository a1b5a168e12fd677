//! Line-ending normalization pre-pass.
//!
//! Patch steps are authored against LF line endings. Editors and checkouts on
//! other platforms introduce CRLF pairs, which would make every multi-line
//! literal unmatchable. Normalizing once before matching keeps the authored
//! patterns reliable.

use std::borrow::Cow;

/// Convert all CRLF pairs in `input` to LF.
///
/// Total and idempotent: normalizing an already-normalized buffer returns it
/// unchanged (and borrowed, so the common case allocates nothing).
///
/// A carriage return not followed by a newline survives; a run of them
/// directly before a newline collapses into that newline, since each removed
/// CRLF pair would otherwise expose a fresh one and break idempotence.
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains("\r\n") {
        return Cow::Borrowed(input);
    }

    let mut text = input.replace("\r\n", "\n");

    // A run of CRs before a newline ("\r\r\n") leaves a fresh CRLF behind
    // after one pass; iterate to the fixpoint so the result is idempotent.
    while text.contains("\r\n") {
        text = text.replace("\r\n", "\n");
    }

    Cow::Owned(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_crlf_converted() {
        assert_eq!(normalize_line_endings("a\r\nb\r\n"), "a\nb\n");
    }

    #[test]
    fn test_lf_untouched_and_borrowed() {
        let input = "a\nb\n";
        let out = normalize_line_endings(input);
        assert_eq!(out, input);
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn test_lone_cr_preserved() {
        assert_eq!(normalize_line_endings("a\rb"), "a\rb");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize_line_endings(""), "");
    }

    #[test]
    fn test_mixed_endings() {
        assert_eq!(normalize_line_endings("a\r\nb\nc\r\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_cr_run_before_newline_collapses() {
        assert_eq!(normalize_line_endings("a\r\r\nb"), "a\nb");
    }

    /// Strings built from segments likely to exercise the CR/LF edge cases.
    fn line_ending_soup() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                Just("\r\n".to_string()),
                Just("\r".to_string()),
                Just("\n".to_string()),
                "[a-z ]{0,4}",
            ],
            0..32,
        )
        .prop_map(|segments| segments.concat())
    }

    proptest! {
        #[test]
        fn prop_idempotent(input in line_ending_soup()) {
            let once = normalize_line_endings(&input).into_owned();
            let twice = normalize_line_endings(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_no_crlf_remains(input in line_ending_soup()) {
            let out = normalize_line_endings(&input);
            prop_assert!(!out.contains("\r\n"));
        }
    }
}
