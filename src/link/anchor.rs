//! Per-page identifier sets.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use rustc_hash::{FxHashMap, FxHashSet};

use super::provenance::TaggedId;

/// Page path -> identifiers defined on that page.
///
/// Page paths are root-relative (`/guide/x.md`), the same coordinate
/// space link targets resolve into. Entries are only ever added.
#[derive(Debug, Default, Clone)]
pub struct AnchorIndex {
    pages: FxHashMap<String, FxHashSet<String>>,
}

impl AnchorIndex {
    /// Identifier set of `path`, created empty on first sight.
    pub fn ensure_page(&mut self, path: &str) -> &mut FxHashSet<String> {
        self.pages.entry(path.to_string()).or_default()
    }

    /// Whether `path` was visited.
    pub fn contains_page(&self, path: &str) -> bool {
        self.pages.contains_key(path)
    }

    pub fn anchors(&self, path: &str) -> Option<&FxHashSet<String>> {
        self.pages.get(path)
    }

    /// Whether `fragment` names an anchor on `path`.
    ///
    /// Matches the stored identifier verbatim or with its provenance
    /// markers removed, so `#title` finds `title(heading)(include)`.
    pub fn has_anchor(&self, path: &str, fragment: &str) -> bool {
        self.pages.get(path).is_some_and(|ids| {
            ids.contains(fragment) || ids.iter().any(|id| TaggedId::parse(id).base == fragment)
        })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn anchor_count(&self) -> usize {
        self.pages.values().map(FxHashSet::len).sum()
    }

    /// Sorted view, for stable output.
    pub fn sorted(&self) -> BTreeMap<&str, BTreeSet<&str>> {
        self.pages
            .iter()
            .map(|(path, ids)| (path.as_str(), ids.iter().map(String::as_str).collect()))
            .collect()
    }

    /// `path:` header per page, then one indented line per identifier.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for (path, ids) in self.sorted() {
            // Writing to a String cannot fail
            let _ = writeln!(out, "{path}:");
            for id in ids {
                let _ = writeln!(out, "  {id}");
            }
        }
        out
    }
}
