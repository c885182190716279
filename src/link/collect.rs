//! Intra-site link collection.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};

use super::SiteLinkManager;
use super::kind::{default_resource_path, is_intra_link, link_attribute};
use crate::debug;
use crate::dom::Element;

/// Attribute that opts an element out of validation.
pub const NO_VALIDATION_ATTR: &str = "no-validation";

/// Result of offering one node to the collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// Not a link-bearing tag, no usable target, or collection disabled.
    NotApplicable,
    /// Opted out with `no-validation`.
    ValidationDisabled,
    /// Stored for the validation pass.
    Collected,
}

impl fmt::Display for CollectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotApplicable => "should not validate",
            Self::ValidationDisabled => "intralink validation disabled",
            Self::Collected => "intralink collected to be validated later",
        })
    }
}

/// Page file path -> link targets found on that page.
///
/// Both levels are sets, so each (target, page) pair is stored once.
#[derive(Debug, Default, Clone)]
pub struct LinkCollection {
    pages: FxHashMap<String, FxHashSet<String>>,
}

impl LinkCollection {
    /// Store a pair. Returns `false` if it was already present.
    pub fn add(&mut self, target: &str, cwf: &str) -> bool {
        match self.pages.get_mut(cwf) {
            Some(targets) => targets.insert(target.to_string()),
            None => {
                let mut targets = FxHashSet::default();
                targets.insert(target.to_string());
                self.pages.insert(cwf.to_string(), targets);
                true
            }
        }
    }

    /// Take every pair out, leaving the collection empty.
    pub fn drain(&mut self) -> FxHashMap<String, FxHashSet<String>> {
        std::mem::take(&mut self.pages)
    }

    #[cfg(test)]
    pub fn targets(&self, cwf: &str) -> Option<&FxHashSet<String>> {
        self.pages.get(cwf)
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.pages.values().map(FxHashSet::len).sum()
    }
}

impl SiteLinkManager {
    /// Offer `node` on page `cwf` to the collector.
    ///
    /// Only `a`, `link`, `img`, `pic`, `thumbnail` and `script` carry
    /// links; their default attribute (`href` or `src`) is read and kept
    /// when it points inside the site.
    pub fn collect_intra_link(&mut self, node: &Element, cwf: &str) -> CollectOutcome {
        if !self.config.enabled || link_attribute(&node.tag).is_none() {
            return CollectOutcome::NotApplicable;
        }
        let target = default_resource_path(node).unwrap_or_default();

        let outcome = if node.has_attr(NO_VALIDATION_ATTR) {
            CollectOutcome::ValidationDisabled
        } else if is_intra_link(target) {
            self.collection.add(target, cwf);
            CollectOutcome::Collected
        } else {
            CollectOutcome::NotApplicable
        };

        debug!("link"; "<{}> `{}` in {}: {}", node.tag, target, cwf, outcome);
        outcome
    }
}
