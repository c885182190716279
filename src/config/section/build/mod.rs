//! `[build]` section configuration.
//!
//! Describes where pages come from and how their trees are assembled.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "docs"              # Page source directory (relative to site root)
//! extensions = ["md", "html"]   # Page source extensions
//! include_tag = "include"       # Element that embeds another file's content
//! layout = true                 # Page bodies are embedded into a site layout
//!
//! [build.slug]
//! fragment = "full"             # Heading id slugification: full | safe | ascii | no
//! separator = "dash"            # dash | underscore
//! case = "lower"                # lower | upper | capitalize | preserve
//! ```

pub mod slug;

pub use slug::{SlugCase, SlugConfig, SlugMode};

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Page source directory.
    pub content: PathBuf,

    /// File extensions treated as pages (without the dot).
    pub extensions: Vec<String>,

    /// Tag name of the content-inclusion element (`<include src="...">`).
    pub include_tag: String,

    /// Page bodies are rendered inside a site layout, so the whole body
    /// counts as included content. Off: pages stand alone and only
    /// `include_tag` subtrees are treated as included.
    pub layout: bool,

    /// Heading id slugification settings.
    pub slug: SlugConfig,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("."),
            extensions: vec!["md".to_string(), "html".to_string()],
            include_tag: "include".to_string(),
            layout: true,
            slug: SlugConfig::default(),
        }
    }
}

impl BuildSectionConfig {
    /// Whether `ext` (without the dot) names a page source.
    pub fn is_page_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Validate build settings.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.extensions.is_empty() {
            diag.error_with_hint(
                FieldPath::new("build.extensions"),
                "no page extensions configured",
                "set `extensions = [\"md\", \"html\"]`",
            );
        }

        if let Some(ext) = self.extensions.iter().find(|e| e.starts_with('.')) {
            diag.error_with_hint(
                FieldPath::new("build.extensions"),
                format!("extension `{ext}` must not start with a dot"),
                format!("use `{}`", ext.trim_start_matches('.')),
            );
        }

        let tag = &self.include_tag;
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            diag.error(
                FieldPath::new("build.include_tag"),
                format!("`{tag}` is not a valid tag name"),
            );
        }
    }
}
