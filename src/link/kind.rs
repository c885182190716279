//! Link classification utilities.

use crate::dom::Element;
use crate::utils::path::route::is_external_link;

/// Syntactic classification of links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind<'a> {
    /// External link with URL scheme (https://, mailto:, tel:, etc.)
    External(&'a str),
    /// Pure fragment/anchor link (#section). Value is anchor without `#`.
    Fragment(&'a str),
    /// Site-root-relative path (/about, /posts/hello).
    SiteRoot(&'a str),
    /// File-relative path (./image.png, ../other).
    FileRelative(&'a str),
}

impl<'a> LinkKind<'a> {
    /// Parse a link string into its syntactic kind.
    #[inline]
    pub fn parse(link: &'a str) -> Self {
        if is_external_link(link) {
            Self::External(link)
        } else if let Some(anchor) = link.strip_prefix('#') {
            Self::Fragment(anchor)
        } else if let Some(anchor) = link.strip_prefix("./#") {
            // ./#fragment is the current page anchor
            Self::Fragment(anchor)
        } else if link.starts_with('/') {
            Self::SiteRoot(link)
        } else {
            Self::FileRelative(link)
        }
    }
}

/// Whether `target` should be collected for deferred validation.
///
/// Empty values, anything with a scheme or `//` host prefix, and
/// unexpanded template placeholders (`{{ ... }}`) are not intra-site links.
pub fn is_intra_link(target: &str) -> bool {
    !target.is_empty()
        && !target.contains("{{")
        && !matches!(LinkKind::parse(target), LinkKind::External(_))
}

/// Attribute that carries the link target for an allow-listed tag.
pub fn link_attribute(tag: &str) -> Option<&'static str> {
    match tag {
        "a" | "link" => Some("href"),
        "img" | "pic" | "thumbnail" | "script" => Some("src"),
        _ => None,
    }
}

/// The element's default resource reference, if it has one.
pub fn default_resource_path(node: &Element) -> Option<&str> {
    link_attribute(&node.tag).and_then(|attr| node.attr(attr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            LinkKind::parse("https://example.com"),
            LinkKind::External("https://example.com")
        );
        assert_eq!(
            LinkKind::parse("mailto:user@example.com"),
            LinkKind::External("mailto:user@example.com")
        );
        assert_eq!(LinkKind::parse("#section"), LinkKind::Fragment("section"));
        assert_eq!(LinkKind::parse("./#section"), LinkKind::Fragment("section"));
        assert_eq!(LinkKind::parse("#"), LinkKind::Fragment(""));
        assert_eq!(LinkKind::parse("/about#team"), LinkKind::SiteRoot("/about#team"));
        assert_eq!(LinkKind::parse("../other"), LinkKind::FileRelative("../other"));
        assert_eq!(LinkKind::parse("y.md"), LinkKind::FileRelative("y.md"));
    }

    #[test]
    fn test_is_intra_link() {
        assert!(is_intra_link("y.md"));
        assert!(is_intra_link("/guide/x.md#intro"));
        assert!(is_intra_link("#intro"));
        assert!(!is_intra_link(""));
        assert!(!is_intra_link("https://example.com/y.md"));
        assert!(!is_intra_link("//cdn.example.com/lib.js"));
        assert!(!is_intra_link("{{ base }}/y.md"));
    }

    #[test]
    fn test_default_resource_path() {
        let a = Element::new("a").with_attr("href", "y.md");
        assert_eq!(default_resource_path(&a), Some("y.md"));

        let img = Element::new("img").with_attr("src", "p.png").with_attr("href", "x");
        assert_eq!(default_resource_path(&img), Some("p.png"));

        let script = Element::new("script");
        assert_eq!(default_resource_path(&script), None);

        let div = Element::new("div").with_attr("href", "x.md");
        assert_eq!(default_resource_path(&div), None);
    }
}
