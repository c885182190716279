//! Heading id minting and provenance tagging for included content.

use super::SiteLinkManager;
use super::heading::HeadingIdGenerator;
use super::provenance::TaggedId;
use crate::dom::{Element, Node};

/// `h1` through `h6`.
#[inline]
pub fn is_heading(tag: &str) -> bool {
    matches!(tag.as_bytes(), [b'h', b'1'..=b'6'])
}

impl SiteLinkManager {
    /// Normalize the subtree rooted at `node`, content included into `cwf`.
    ///
    /// Visits elements pre-order in document order. Headings without an
    /// `id` get one from `ids`, marked `(heading)`. Every element that ends
    /// up with an `id` is marked `(include)` and indexed under `cwf`.
    ///
    /// Running twice over the same subtree changes nothing: marked ids are
    /// left alone and headings that already have an id are not re-minted.
    pub fn maintain_include(
        &mut self,
        node: &mut Element,
        cwf: &str,
        ids: &mut impl HeadingIdGenerator,
    ) {
        if !self.config.enabled {
            return;
        }

        let mut stack = vec![node];
        while let Some(elem) = stack.pop() {
            if is_heading(&elem.tag) && elem.id().is_none() {
                ids.set_heading_id(elem, true);
                if let Some(id) = elem.id() {
                    let tagged = TaggedId::new(id).minted_heading().to_string();
                    elem.set_attr("id", tagged);
                }
            }

            if let Some(id) = elem.id() {
                let tagged = TaggedId::parse(id);
                if !tagged.include {
                    let tagged = tagged.seen_in_include().to_string();
                    elem.set_attr("id", tagged);
                }
                self.record_identifier(elem, cwf);
            }

            stack.extend(
                elem.children
                    .iter_mut()
                    .rev()
                    .filter_map(Node::as_element_mut),
            );
        }
    }
}
