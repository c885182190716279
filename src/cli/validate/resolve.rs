//! Link target resolution against the anchor index and the file system.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use super::report::ValidationReport;
use crate::config::SiteConfig;
use crate::debug;
use crate::link::provenance::TaggedId;
use crate::link::{AnchorIndex, IntraLinkResolver, LinkConfig, LinkKind};
use crate::utils::path::route::{parent_dir, resolve_relative, split_path_fragment, strip_query};

/// Result of resolving a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A visited page; the fragment, if any, exists on it.
    Page(String),
    /// A file that exists but was not indexed (unvisited page or asset).
    File(PathBuf),
    /// Target not found.
    NotFound {
        /// Page paths that were tried (for diagnostics)
        tried: Vec<String>,
    },
    /// Fragment not found on target page.
    MissingAnchor {
        page: String,
        fragment: String,
        /// Anchors on the page, markers stripped (for suggestions)
        available: Vec<String>,
    },
    /// Fragment on a file that is not a page.
    AssetFragment { file: PathBuf, fragment: String },
}

/// Resolves collected links and records failures in a report.
///
/// Link targets are mapped into page-path space (`/guide/x.md`), then
/// matched against the pages of the anchor index. Pages are tried under
/// a few spellings, see [`SiteResolver::candidates`].
pub struct SiteResolver {
    link: LinkConfig,
    /// Content directory, where `/`-rooted paths start.
    root: PathBuf,
    extensions: Vec<String>,
    report: ValidationReport,
}

impl SiteResolver {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            link: config.link_config(),
            root: config.build.content.clone(),
            extensions: config.build.extensions.clone(),
            report: ValidationReport::default(),
        }
    }

    pub fn into_report(self) -> ValidationReport {
        self.report
    }

    /// Resolve `target` found on page file `cwf`.
    pub fn resolve(&self, target: &str, cwf: &str, anchors: &AnchorIndex) -> Resolution {
        let current = self.link.page_path(cwf);

        let (path, fragment) = match LinkKind::parse(target) {
            LinkKind::Fragment(fragment) => (current.clone(), decode(fragment)),
            _ => {
                let (path, fragment) = split_path_fragment(target);
                let path = decode(strip_query(path));
                let path = if path.is_empty() {
                    current.clone()
                } else if path.starts_with('/') {
                    resolve_relative("/", &path)
                } else {
                    resolve_relative(parent_dir(&current), &path)
                };
                (path, decode(fragment))
            }
        };

        let candidates = self.candidates(&path);

        if let Some(page) = candidates.iter().find(|c| anchors.contains_page(c)) {
            if fragment.is_empty() || anchors.has_anchor(page, &fragment) {
                return Resolution::Page(page.clone());
            }
            return Resolution::MissingAnchor {
                page: page.clone(),
                fragment,
                available: available_anchors(anchors, page),
            };
        }

        if let Some(file) = candidates
            .iter()
            .map(|c| self.root.join(c.trim_start_matches('/')))
            .find(|file| file.is_file())
        {
            if !fragment.is_empty() && !self.is_page_file(&file) {
                return Resolution::AssetFragment { file, fragment };
            }
            return Resolution::File(file);
        }

        Resolution::NotFound { tried: candidates }
    }

    /// Page paths a link path may refer to, most specific first.
    ///
    /// - `/guide/` -> `/guide/`, `/guide/index.md`, `/guide/index.html`
    /// - `/guide/y.html` -> `/guide/y.html`, `/guide/y.md`
    /// - `/guide/y` -> `/guide/y`, `/guide/y.md`, `/guide/y/index.md`, ...
    pub fn candidates(&self, path: &str) -> Vec<String> {
        let mut out = vec![path.to_string()];

        if path.ends_with('/') {
            out.extend(self.extensions.iter().map(|ext| format!("{path}index.{ext}")));
            return out;
        }

        let name = path.rsplit('/').next().unwrap_or(path);
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => {
                if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") {
                    let base = &path[..path.len() - ext.len() - 1];
                    out.extend(
                        self.extensions
                            .iter()
                            .filter(|e| !e.eq_ignore_ascii_case(ext))
                            .map(|e| format!("{base}.{e}")),
                    );
                }
            }
            _ => {
                for ext in &self.extensions {
                    out.push(format!("{path}.{ext}"));
                }
                for ext in &self.extensions {
                    out.push(format!("{path}/index.{ext}"));
                }
            }
        }
        out
    }

    fn is_page_file(&self, file: &Path) -> bool {
        file.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn record(&mut self, target: &str, cwf: &str, resolution: Resolution) {
        let source = self.link.page_path(cwf).trim_start_matches('/').to_string();
        let link = format!("`{target}`");

        match resolution {
            Resolution::Page(page) => {
                debug!("validate"; "{} from {}: page {}", target, source, page);
            }
            Resolution::File(file) => {
                debug!("validate"; "{} from {}: file {}", target, source, file.display());
            }
            Resolution::NotFound { tried } => {
                debug!("validate"; "{} from {}: tried {}", target, source, tried.join(", "));
                self.report.add_link(source, link, "not found".to_string());
            }
            Resolution::MissingAnchor {
                page,
                fragment,
                available,
            } => {
                let reason = if available.is_empty() {
                    format!("anchor `#{fragment}` not found on `{page}`")
                } else {
                    format!(
                        "anchor `#{fragment}` not found on `{page}` (available: {})",
                        available.join(", ")
                    )
                };
                self.report.add_anchor(source, link, reason);
            }
            Resolution::AssetFragment { file, fragment } => {
                let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                self.report.add_warning(
                    source,
                    link,
                    format!("fragment `#{fragment}` on `{name}`, which is not a page"),
                );
            }
        }
    }
}

impl IntraLinkResolver for SiteResolver {
    fn validate_intra_link(&mut self, target: &str, cwf: &str, anchors: &AnchorIndex) {
        let resolution = self.resolve(target, cwf, anchors);
        self.record(target, cwf, resolution);
    }
}

/// Percent-decode, keeping the input when it is not UTF-8.
fn decode(s: &str) -> String {
    percent_decode_str(s)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Anchors of `page` as authors would write them.
fn available_anchors(anchors: &AnchorIndex, page: &str) -> Vec<String> {
    let mut out: Vec<String> = anchors
        .anchors(page)
        .into_iter()
        .flatten()
        .map(|id| TaggedId::parse(id).base.to_string())
        .collect();
    out.sort();
    out.dedup();
    out
}
