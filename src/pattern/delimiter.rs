//! Structural delimiters that captures cannot span.

use phf::{Set, phf_set};

/// Characters a bare or enumerated capture never matches across.
///
/// Wildcards ignore this set.
static DELIMITERS: Set<char> = phf_set! {
    '.',
    '/',
};

/// Test whether `ch` is a delimiter.
pub fn is_delimiter(ch: char) -> bool {
    DELIMITERS.contains(&ch)
}

/// Length in bytes of the leading delimiter-free run of `s`.
pub fn leading_run(s: &str) -> usize {
    s.find(is_delimiter).unwrap_or(s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_and_slash_are_delimiters() {
        assert!(is_delimiter('.'));
        assert!(is_delimiter('/'));
        for ch in ['-', '_', ':', '*', ' ', 'a', '0'] {
            assert!(!is_delimiter(ch), "unexpected delimiter: {ch:?}");
        }
    }

    #[test]
    fn leading_run_stops_at_first_delimiter() {
        assert_eq!(leading_run("book.example.com"), 4);
        assert_eq!(leading_run("/size"), 0);
        assert_eq!(leading_run("small-video"), 11);
        assert_eq!(leading_run(""), 0);
    }

    #[test]
    fn leading_run_counts_bytes() {
        assert_eq!(leading_run("héllo/x"), "héllo".len());
    }
}
