//! Deferred intra-site link validation.
//!
//! Links between pages are checked in two phases. While pages are
//! traversed, [`SiteLinkManager`] records every intra-site link target per
//! page and every `id` defined on each page. Once the whole site has been
//! visited, [`SiteLinkManager::validate_all_intralinks`] hands each unique
//! (target, page) pair to an [`IntraLinkResolver`] together with the
//! complete [`AnchorIndex`]. A link on page A may point at an anchor on
//! page B that had not been visited yet when the link was seen.
//!
//! # Module Structure
//!
//! - [`anchor`]: per-page identifier sets ([`AnchorIndex`])
//! - [`collect`]: link collection and the tag allow-list
//! - [`include`]: heading id minting and provenance tagging for included content
//! - [`provenance`]: `(heading)` / `(include)` markers on identifiers
//! - [`heading`]: heading id generation ([`HeadingIdGenerator`])
//! - [`kind`]: syntactic link classification
//!
//! # Protocol
//!
//! ```text
//! per page:    maintain_include(body)        ids minted, tagged, indexed
//!              record_identifier(node)       every node
//!              collect_intra_link(node)      every node
//! once:        validate_all_intralinks()     drains the collection
//! ```
//!
//! Every public operation is a no-op while [`LinkConfig::enabled`] is off.

pub mod anchor;
pub mod collect;
pub mod heading;
pub mod include;
pub mod kind;
pub mod provenance;

pub use anchor::AnchorIndex;
pub use collect::LinkCollection;
pub use heading::{HeadingIdGenerator, SlugHeadingIds};
pub use kind::LinkKind;

use crate::debug;
use crate::dom::Element;
use crate::utils::plural_count;

/// Checks one collected link once every page has been indexed.
///
/// Failures are reported as a side effect (a report, log lines); nothing
/// is returned to the driver.
pub trait IntraLinkResolver {
    fn validate_intra_link(&mut self, target: &str, cwf: &str, anchors: &AnchorIndex);
}

/// Settings injected into [`SiteLinkManager`] at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkConfig {
    /// Gates collection, bookkeeping and validation.
    pub enabled: bool,
    /// Prefix stripped from file paths to obtain page paths.
    pub root_path: String,
}

impl LinkConfig {
    /// Map a file path into page-path space by removing the root prefix.
    ///
    /// The prefix only matches on a path-segment boundary; a file outside
    /// the root keeps its full path.
    ///
    /// - root=`/site`, cwf=`/site/guide/x.md` -> `/guide/x.md`
    pub fn page_path(&self, cwf: &str) -> String {
        let root = self.root_path.trim_end_matches('/');
        if root.is_empty() {
            return cwf.to_string();
        }
        match cwf.strip_prefix(root) {
            Some(rest) if rest.is_empty() => "/".to_string(),
            Some(rest) if rest.starts_with('/') => rest.to_string(),
            _ => cwf.to_string(),
        }
    }
}

/// Owns the link collection and the anchor index for one site build.
#[derive(Debug, Default)]
pub struct SiteLinkManager {
    config: LinkConfig,
    collection: LinkCollection,
    anchors: AnchorIndex,
}

impl SiteLinkManager {
    pub fn new(config: LinkConfig) -> Self {
        Self {
            config,
            collection: LinkCollection::default(),
            anchors: AnchorIndex::default(),
        }
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    pub fn anchors(&self) -> &AnchorIndex {
        &self.anchors
    }

    /// Links collected since the last validation pass.
    pub fn pending(&self) -> &LinkCollection {
        &self.collection
    }

    /// Register the node's `id` (if any) under the page of `cwf`.
    ///
    /// The page entry is created even for nodes without an `id`, so every
    /// visited page is known to the resolver.
    pub fn record_identifier(&mut self, node: &Element, cwf: &str) {
        if !self.config.enabled {
            return;
        }
        let path = self.config.page_path(cwf);
        let ids = self.anchors.ensure_page(&path);
        if let Some(id) = node.id() {
            ids.insert(id.to_string());
        }
    }

    /// Dispatch every collected (target, page) pair to `resolver` exactly
    /// once, then forget them.
    ///
    /// Must run after all pages have been traversed; earlier calls see an
    /// incomplete anchor index. A second call without new collection does
    /// nothing.
    pub fn validate_all_intralinks(&mut self, resolver: &mut impl IntraLinkResolver) {
        if !self.config.enabled || self.collection.is_empty() {
            return;
        }

        let collected = self.collection.drain();
        let mut dispatched = 0;
        for (cwf, targets) in &collected {
            for target in targets {
                resolver.validate_intra_link(target, cwf, &self.anchors);
                dispatched += 1;
            }
        }

        debug!(
            "link";
            "dispatched {} from {}",
            plural_count(dispatched, "link"),
            plural_count(collected.len(), "page")
        );
    }

    /// Human-readable anchor index: a `path:` header per page followed by
    /// its identifiers indented by two spaces.
    pub fn dump_anchors(&self) -> String {
        self.anchors.dump()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::dom::Node;

    pub const ROOT: &str = "/site";

    pub fn manager() -> SiteLinkManager {
        SiteLinkManager::new(LinkConfig {
            enabled: true,
            root_path: ROOT.to_string(),
        })
    }

    pub fn disabled_manager() -> SiteLinkManager {
        SiteLinkManager::new(LinkConfig {
            enabled: false,
            root_path: ROOT.to_string(),
        })
    }

    /// Resolver that records every call.
    #[derive(Default)]
    pub struct RecordingResolver {
        pub calls: Vec<(String, String)>,
        pub anchor_pages: Vec<usize>,
    }

    impl IntraLinkResolver for RecordingResolver {
        fn validate_intra_link(&mut self, target: &str, cwf: &str, anchors: &AnchorIndex) {
            self.calls.push((target.to_string(), cwf.to_string()));
            self.anchor_pages.push(anchors.page_count());
        }
    }

    fn link(href: &str) -> Element {
        Element::new("a").with_attr("href", href)
    }

    #[test]
    fn test_page_path_strips_root() {
        let config = manager().config().clone();
        assert_eq!(config.page_path("/site/guide/x.md"), "/guide/x.md");
        assert_eq!(config.page_path("/site"), "/");
        assert_eq!(config.page_path("/site2/x.md"), "/site2/x.md");
        assert_eq!(config.page_path("/elsewhere/x.md"), "/elsewhere/x.md");

        let trailing = LinkConfig {
            enabled: true,
            root_path: "/site/".to_string(),
        };
        assert_eq!(trailing.page_path("/site/x.md"), "/x.md");
        assert_eq!(LinkConfig::default().page_path("/x.md"), "/x.md");
    }

    #[test]
    fn test_record_identifier() {
        let mut m = manager();
        m.record_identifier(&Element::new("p"), "/site/a.md");
        assert!(m.anchors().contains_page("/a.md"));
        assert!(m.anchors().anchors("/a.md").unwrap().is_empty());

        m.record_identifier(&Element::new("div").with_attr("id", "x"), "/site/a.md");
        m.record_identifier(&Element::new("div").with_attr("id", ""), "/site/a.md");
        let ids = m.anchors().anchors("/a.md").unwrap();
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("x"));
    }

    #[test]
    fn test_duplicate_pair_validated_once() {
        let mut m = manager();
        m.collect_intra_link(&link("/b.md"), "/site/a.md");
        m.collect_intra_link(&link("/b.md"), "/site/a.md");

        let mut resolver = RecordingResolver::default();
        m.validate_all_intralinks(&mut resolver);
        assert_eq!(
            resolver.calls,
            vec![("/b.md".to_string(), "/site/a.md".to_string())]
        );
    }

    #[test]
    fn test_second_validation_is_noop() {
        let mut m = manager();
        m.collect_intra_link(&link("b.md"), "/site/a.md");
        m.collect_intra_link(&link("c.md"), "/site/a.md");

        let mut first = RecordingResolver::default();
        m.validate_all_intralinks(&mut first);
        assert_eq!(first.calls.len(), 2);
        assert!(m.pending().is_empty());

        let mut second = RecordingResolver::default();
        m.validate_all_intralinks(&mut second);
        assert!(second.calls.is_empty());

        // Collection keeps working after a drain
        m.collect_intra_link(&link("d.md"), "/site/a.md");
        let mut third = RecordingResolver::default();
        m.validate_all_intralinks(&mut third);
        assert_eq!(third.calls, vec![("d.md".to_string(), "/site/a.md".to_string())]);
    }

    #[test]
    fn test_disabled_manager_is_inert() {
        let mut m = disabled_manager();
        let mut heading = Element::new("h2").with_text("Title");
        let mut ids = FixedIds("title");

        m.record_identifier(&Element::new("p").with_attr("id", "x"), "/site/a.md");
        m.maintain_include(&mut heading, "/site/a.md", &mut ids);
        let outcome = m.collect_intra_link(&link("b.md"), "/site/a.md");

        assert_eq!(outcome, collect::CollectOutcome::NotApplicable);
        assert!(m.pending().is_empty());
        assert_eq!(m.anchors().page_count(), 0);
        assert_eq!(heading.id(), None);

        let mut resolver = RecordingResolver::default();
        m.validate_all_intralinks(&mut resolver);
        assert!(resolver.calls.is_empty());
    }

    #[test]
    fn test_missing_anchor_reported_for_linking_page_only() {
        let mut m = manager();

        let mut page_a = Element::new("body").with_child(link("/b.md#missing"));
        let mut page_b = Element::new("body")
            .with_child(Element::new("p").with_attr("id", "present"))
            .with_child(Element::new("div"));

        let mut ids = FixedIds("unused");
        for (page, cwf) in [(&mut page_a, "/site/a.md"), (&mut page_b, "/site/b.md")] {
            m.maintain_include(page, cwf, &mut ids);
            page.walk(&mut |node| {
                m.record_identifier(node, cwf);
                m.collect_intra_link(node, cwf);
            });
        }

        let mut resolver = RecordingResolver::default();
        m.validate_all_intralinks(&mut resolver);
        assert_eq!(
            resolver.calls,
            vec![("/b.md#missing".to_string(), "/site/a.md".to_string())]
        );
        // The resolver sees both pages
        assert_eq!(resolver.anchor_pages, vec![2]);
        assert!(!m.anchors().has_anchor("/b.md", "missing"));
        assert!(m.anchors().has_anchor("/b.md", "present"));
    }

    #[test]
    fn test_guide_scenario() {
        let mut m = manager();
        let mut x = Element::new("body")
            .with_child(Element::new("h2").with_text("Title"))
            .with_child(link("y.md"));
        let mut y = Element::new("body").with_child(Element::new("p").with_text("Y"));

        let mut ids = SlugHeadingIds::new(Default::default());
        for (page, cwf) in [(&mut x, "/site/guide/x.md"), (&mut y, "/site/guide/y.md")] {
            m.maintain_include(page, cwf, &mut ids);
            page.walk(&mut |node| {
                m.record_identifier(node, cwf);
                m.collect_intra_link(node, cwf);
            });
        }

        let x_ids = m.anchors().anchors("/guide/x.md").unwrap();
        assert_eq!(x_ids.len(), 1);
        assert!(x_ids.iter().all(|id| id.ends_with("(heading)(include)")));
        assert!(m.anchors().contains_page("/guide/y.md"));

        let pending = m.pending().targets("/site/guide/x.md").unwrap();
        assert_eq!(pending.len(), 1);
        assert!(pending.contains("y.md"));

        let mut resolver = RecordingResolver::default();
        m.validate_all_intralinks(&mut resolver);
        assert!(m.pending().is_empty());
        assert_eq!(
            resolver.calls,
            vec![("y.md".to_string(), "/site/guide/x.md".to_string())]
        );
    }

    #[test]
    fn test_dump_anchors() {
        let mut m = manager();
        m.record_identifier(&Element::new("p").with_attr("id", "b"), "/site/z.md");
        m.record_identifier(&Element::new("p").with_attr("id", "a"), "/site/z.md");
        m.record_identifier(&Element::new("p"), "/site/a.md");
        assert_eq!(m.dump_anchors(), "/a.md:\n/z.md:\n  a\n  b\n");
    }

    /// Generator that always mints the same slug.
    pub struct FixedIds(pub &'static str);

    impl HeadingIdGenerator for FixedIds {
        fn set_heading_id(&mut self, node: &mut Element, _is_include_context: bool) {
            node.set_attr("id", self.0);
        }
    }

    #[test]
    fn test_text_nodes_are_skipped() {
        let mut m = manager();
        let mut body = Element::new("body").with_child(Node::Text("plain".into()));
        m.maintain_include(&mut body, "/site/t.md", &mut FixedIds("x"));
        assert!(m.anchors().anchors("/t.md").is_none());
    }
}
