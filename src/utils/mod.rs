//! Small shared helpers.
//!
//! - [`path`]: path and URL helpers, slugification
//! - [`plural_s`] / [`plural_count`]: pluralized counts for log lines

pub mod path;

/// Return "s" suffix for plural counts
///
/// - `plural_s(0)` -> `"s"` (0 links)
/// - `plural_s(1)` -> `""` (1 link)
#[inline]
pub fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// - `plural_count(3, "page")` -> `"3 pages"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, plural_s(count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural_s(0), "s");
        assert_eq!(plural_s(1), "");
        assert_eq!(plural_count(1, "page"), "1 page");
        assert_eq!(plural_count(12, "anchor"), "12 anchors");
    }
}
