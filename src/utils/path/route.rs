//! Link string utilities.
//!
//! Provides consistent link handling across the codebase:
//! - Link type detection (external vs internal)
//! - Fragment and query splitting
//! - Relative path resolution in page-path space

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
///
/// A valid scheme must:
/// - Have at least 1 character before the colon
/// - Only contain ASCII alphanumeric or `+`, `-`, `.`
///
/// Protocol-relative links (`//cdn.example.com/x.js`) are external too.
#[inline]
pub fn is_external_link(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    link.find(':').is_some_and(|pos| {
        pos > 0
            && link[..pos]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Split a link into path and fragment parts
///
/// # Examples
/// ```ignore
/// assert_eq!(split_path_fragment("/about#team"), ("/about", "team"));
/// assert_eq!(split_path_fragment("/about"), ("/about", ""));
/// ```
#[inline]
pub fn split_path_fragment(url: &str) -> (&str, &str) {
    url.split_once('#').unwrap_or((url, ""))
}

/// Drop a `?query` suffix from a path (fragment already removed).
#[inline]
pub fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(path, _)| path)
}

/// Parent directory of a page path, always ending with `/`.
///
/// - `/guide/x.md` -> `/guide/`
/// - `/x.md` -> `/`
pub fn parent_dir(page: &str) -> &str {
    match page.rfind('/') {
        Some(pos) => &page[..=pos],
        None => "/",
    }
}

/// Resolve `rel` against the directory `base` in page-path space.
///
/// `.` segments are dropped and `..` pops one segment; climbing above the
/// root stays at the root. A trailing slash on `rel` is preserved.
///
/// - base=`/guide/`, rel=`../about/x.md` -> `/about/x.md`
/// - base=`/guide/`, rel=`./y.md` -> `/guide/y.md`
pub fn resolve_relative(base: &str, rel: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();

    for part in rel.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(part),
        }
    }

    let mut resolved = format!("/{}", segments.join("/"));
    if rel.ends_with('/') && !resolved.ends_with('/') {
        resolved.push('/');
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_external_link() {
        assert!(is_external_link("https://example.com"));
        assert!(is_external_link("mailto:user@example.com"));
        assert!(is_external_link("tel:+1234567890"));
        assert!(is_external_link("//cdn.example.com/lib.js"));
        assert!(!is_external_link("/about"));
        assert!(!is_external_link("./file.txt"));
        assert!(!is_external_link("#section"));
        assert!(!is_external_link(":weird"));
    }

    #[test]
    fn test_split_path_fragment() {
        assert_eq!(split_path_fragment("/about#team"), ("/about", "team"));
        assert_eq!(split_path_fragment("/about"), ("/about", ""));
        assert_eq!(split_path_fragment("#section"), ("", "section"));
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("y.md?v=2"), "y.md");
        assert_eq!(strip_query("y.md"), "y.md");
    }

    #[test]
    fn test_parent_dir() {
        assert_eq!(parent_dir("/guide/x.md"), "/guide/");
        assert_eq!(parent_dir("/x.md"), "/");
        assert_eq!(parent_dir("x.md"), "/");
    }

    #[test]
    fn test_resolve_relative() {
        assert_eq!(resolve_relative("/guide/", "y.md"), "/guide/y.md");
        assert_eq!(resolve_relative("/guide/", "./y.md"), "/guide/y.md");
        assert_eq!(resolve_relative("/guide/", "../about/x.md"), "/about/x.md");
        assert_eq!(resolve_relative("/", "../../x.md"), "/x.md");
        assert_eq!(resolve_relative("/guide/", "sub/"), "/guide/sub/");
    }
}
