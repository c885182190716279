//! Heading id generation.

use rustc_hash::FxHashMap;

use crate::config::SlugConfig;
use crate::dom::Element;
use crate::utils::path::slug::slugify_fragment;

/// Mints an `id` for a heading that has none.
///
/// Implementations write the id onto `node` in place. The value must be
/// free of provenance markers; tagging is the caller's business.
pub trait HeadingIdGenerator {
    fn set_heading_id(&mut self, node: &mut Element, is_include_context: bool);
}

/// Slug-based heading ids, unique per page.
///
/// Page headings and headings inside included content are de-duplicated
/// in separate scopes: whatever gets included, the page's own headings
/// keep the same ids. Duplicates get `-1`, `-2`, ... suffixes.
///
/// Create one per page.
#[derive(Debug, Default)]
pub struct SlugHeadingIds {
    config: SlugConfig,
    page: FxHashMap<String, usize>,
    include: FxHashMap<String, usize>,
}

impl SlugHeadingIds {
    pub fn new(config: SlugConfig) -> Self {
        Self {
            config,
            page: FxHashMap::default(),
            include: FxHashMap::default(),
        }
    }
}

impl HeadingIdGenerator for SlugHeadingIds {
    fn set_heading_id(&mut self, node: &mut Element, is_include_context: bool) {
        let mut base = slugify_fragment(&node.text_content(), &self.config);
        if base.is_empty() {
            // Headings without text still need an id
            base = node.tag.clone();
        }

        let seen = if is_include_context {
            &mut self.include
        } else {
            &mut self.page
        };
        node.set_attr("id", unique_slug(seen, base));
    }
}

/// Return `base`, or `base-N` with the smallest free `N`.
fn unique_slug(seen: &mut FxHashMap<String, usize>, base: String) -> String {
    let Some(&count) = seen.get(&base) else {
        seen.insert(base.clone(), 0);
        return base;
    };

    let mut n = count;
    let candidate = loop {
        n += 1;
        let candidate = format!("{base}-{n}");
        if !seen.contains_key(&candidate) {
            break candidate;
        }
    };

    seen.insert(base, n);
    seen.insert(candidate.clone(), 0);
    candidate
}
