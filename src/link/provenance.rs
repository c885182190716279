//! Provenance markers on identifiers.
//!
//! Identifiers touched while normalizing included content carry suffixes
//! recording how they came to be:
//!
//! | Identifier                  | Meaning                                   |
//! |-----------------------------|-------------------------------------------|
//! | `setup`                     | author-supplied, never normalized         |
//! | `setup(include)`            | author-supplied, seen in included content |
//! | `setup(heading)(include)`   | minted for a heading in included content  |
//!
//! Nodes and the anchor index store the concatenated string; [`TaggedId`]
//! is the structured form used to apply markers once and to compare
//! fragments against the base identifier.

use std::fmt;

/// Appended to an id minted for a heading.
pub const HEADING_MARKER: &str = "(heading)";

/// Appended to every id seen during include normalization.
pub const INCLUDE_MARKER: &str = "(include)";

/// An identifier split into its base and provenance flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaggedId<'a> {
    pub base: &'a str,
    pub heading: bool,
    pub include: bool,
}

impl<'a> TaggedId<'a> {
    /// An untagged identifier.
    pub const fn new(base: &'a str) -> Self {
        Self {
            base,
            heading: false,
            include: false,
        }
    }

    /// Split trailing markers off `id`. Markers are only recognized in
    /// mint-then-seen order: `(heading)` followed by `(include)`.
    pub fn parse(id: &'a str) -> Self {
        let (rest, include) = match id.strip_suffix(INCLUDE_MARKER) {
            Some(rest) => (rest, true),
            None => (id, false),
        };
        let (base, heading) = match rest.strip_suffix(HEADING_MARKER) {
            Some(base) => (base, true),
            None => (rest, false),
        };
        Self {
            base,
            heading,
            include,
        }
    }

    pub const fn minted_heading(self) -> Self {
        Self {
            heading: true,
            ..self
        }
    }

    pub const fn seen_in_include(self) -> Self {
        Self {
            include: true,
            ..self
        }
    }
}

impl fmt::Display for TaggedId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base)?;
        if self.heading {
            f.write_str(HEADING_MARKER)?;
        }
        if self.include {
            f.write_str(INCLUDE_MARKER)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let tagged = TaggedId::parse("title(heading)(include)");
        assert_eq!(tagged.base, "title");
        assert!(tagged.heading && tagged.include);

        let tagged = TaggedId::parse("foo(include)");
        assert_eq!(tagged, TaggedId::new("foo").seen_in_include());

        let tagged = TaggedId::parse("foo(heading)");
        assert_eq!(tagged, TaggedId::new("foo").minted_heading());

        assert_eq!(TaggedId::parse("plain"), TaggedId::new("plain"));
    }

    #[test]
    fn test_out_of_order_markers_stay_in_base() {
        let tagged = TaggedId::parse("x(include)(heading)");
        assert_eq!(tagged.base, "x(include)");
        assert!(tagged.heading);
        assert!(!tagged.include);
    }

    #[test]
    fn test_display_order() {
        let id = TaggedId::new("intro").seen_in_include().minted_heading();
        assert_eq!(id.to_string(), "intro(heading)(include)");
        assert_eq!(TaggedId::new("x").to_string(), "x");
    }
}
