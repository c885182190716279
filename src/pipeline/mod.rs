//! Site traversal pipeline.
//!
//! Turns page files into trees and feeds them to the link manager.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │         Load Phase (rayon)               │
//! │  read -> parse -> expand <include>       │
//! └──────────────────────────────────────────┘
//!
//! ┌──────────────────────────────────────────┐
//! │         Index Phase (sequential)         │
//! │  normalize -> record ids -> collect links│
//! └──────────────────────────────────────────┘
//! ```
//!
//! Validation itself runs afterwards, see `cli/validate`.

pub mod include;

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

use anyhow::Result;
use jwalk::WalkDir;
use rayon::prelude::*;
use thiserror::Error;

use crate::config::SiteConfig;
use crate::dom::{Element, Node, parse_html, parse_markdown};
use crate::link::include::is_heading;
use crate::link::{HeadingIdGenerator, SiteLinkManager, SlugHeadingIds};
use crate::logger::ProgressLine;
use crate::utils::path::{normalize_path, to_slash};
use crate::{debug, log};

use include::IncludeExpander;

/// Files never treated as pages
const IGNORED_FILES: &[&str] = &[".DS_Store"];

// =============================================================================
// Types
// =============================================================================

/// Failures while loading a single page.
///
/// None of these abort a run: the page (or the include) is skipped and a
/// warning is printed.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read `{path}`")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`<{tag}>` without `src` in `{file}`")]
    IncludeWithoutSrc { tag: String, file: PathBuf },

    #[error("included file `{src}` not found (from `{file}`)")]
    MissingInclude {
        src: String,
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("include cycle: `{target}` is already being included (from `{file}`)")]
    IncludeCycle { target: PathBuf, file: PathBuf },

    #[error("no element with id `{id}` in `{src}` (from `{file}`)")]
    MissingSegment { id: String, src: String, file: PathBuf },
}

/// A parsed page ready for indexing.
#[derive(Debug, Clone)]
pub struct Page {
    /// Absolute source path with `/` separators, the key links are
    /// collected under.
    pub cwf: String,
    /// Page content wrapped in a `body` element.
    pub body: Element,
}

// =============================================================================
// File Collection
// =============================================================================

/// Collect page files from CLI paths, or the whole content directory.
///
/// A single `-` reads paths from stdin, one per line.
pub fn collect_page_files(paths: &[PathBuf], config: &SiteConfig) -> Result<Vec<PathBuf>> {
    let content_dir = &config.build.content;

    let paths: Vec<PathBuf> = if paths.len() == 1 && paths[0].as_os_str() == "-" {
        read_paths_from_stdin()?
    } else {
        paths.to_vec()
    };

    if paths.is_empty() {
        return Ok(filter_page_files(collect_all_files(content_dir), config));
    }

    let mut all_files = Vec::new();
    for path in &paths {
        let resolved = resolve_cli_path(path, content_dir);

        if resolved.is_file() {
            if is_page_file(&resolved, config) {
                all_files.push(normalize_path(&resolved));
            } else {
                anyhow::bail!("Not a page source: {}", path.display());
            }
        } else if resolved.is_dir() {
            all_files.extend(filter_page_files(collect_all_files(&resolved), config));
        } else {
            anyhow::bail!(
                "Path not found: {}\n  Tried:\n    - {}\n    - {}",
                path.display(),
                path.display(),
                content_dir.join(path).display()
            );
        }
    }

    all_files.sort();
    all_files.dedup();
    Ok(all_files)
}

/// Read file paths from stdin, one per line
fn read_paths_from_stdin() -> Result<Vec<PathBuf>> {
    let stdin = io::stdin();
    let mut paths = Vec::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

/// A CLI path as given, or relative to the content directory.
fn resolve_cli_path(path: &Path, content_dir: &Path) -> PathBuf {
    if path.exists() {
        path.to_path_buf()
    } else {
        content_dir.join(path)
    }
}

/// Collect all files from a directory recursively
fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            let name = e.file_name().to_str().unwrap_or_default();
            !IGNORED_FILES.contains(&name)
        })
        .map(|e| normalize_path(&e.path()))
        .collect()
}

fn filter_page_files(files: Vec<PathBuf>, config: &SiteConfig) -> Vec<PathBuf> {
    files
        .into_iter()
        .filter(|p| is_page_file(p, config))
        .collect()
}

fn is_page_file(path: &Path, config: &SiteConfig) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| config.build.is_page_extension(ext))
}

// =============================================================================
// Load Phase
// =============================================================================

/// Parse `source` according to the extension of `path`.
pub fn parse_source(path: &Path, source: &str) -> Vec<Node> {
    let is_markdown = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
    if is_markdown {
        parse_markdown(source)
    } else {
        parse_html(source)
    }
}

/// Read, parse and expand every page in parallel.
///
/// Unreadable pages are reported and left out. The result keeps the order
/// of `files`.
pub fn load_pages(files: &[PathBuf], config: &SiteConfig) -> Vec<Page> {
    let progress = ProgressLine::new("pages", &[("parsed", files.len())]);

    let results: Vec<_> = files
        .par_iter()
        .map(|file| {
            let result = load_page(file, config);
            progress.inc("parsed");
            result
        })
        .collect();

    progress.finish();

    results
        .into_iter()
        .filter_map(|(page, warnings)| {
            for warning in warnings {
                log!("warning"; "{}", warning);
            }
            page
        })
        .collect()
}

/// Load one page. Include failures come back as warnings next to the
/// page; only an unreadable page file yields no page.
pub fn load_page(file: &Path, config: &SiteConfig) -> (Option<Page>, Vec<PipelineError>) {
    let source = match fs::read_to_string(file) {
        Ok(source) => source,
        Err(source) => {
            let err = PipelineError::Read {
                path: file.to_path_buf(),
                source,
            };
            return (None, vec![err]);
        }
    };

    let mut nodes = parse_source(file, &source);

    let mut expander = IncludeExpander::new(&config.build.include_tag, &config.build.content);
    expander.expand_file(&mut nodes, file);

    let mut body = Element::new("body");
    body.children = nodes;

    let page = Page {
        cwf: to_slash(file),
        body,
    };
    (Some(page), expander.into_errors())
}

// =============================================================================
// Index Phase
// =============================================================================

/// Normalize every page and feed its nodes to `manager`.
///
/// Runs before `validate_all_intralinks`; every page must pass through
/// here first.
pub fn index_site(pages: &mut [Page], manager: &mut SiteLinkManager, config: &SiteConfig) {
    let progress = ProgressLine::new("pages", &[("indexed", pages.len())]);

    for page in pages.iter_mut() {
        index_page(page, manager, config);
        progress.inc("indexed");
    }

    progress.finish();

    debug!(
        "pages";
        "{} anchors on {} pages, {} links pending",
        manager.anchors().anchor_count(),
        manager.anchors().page_count(),
        manager.pending().len()
    );
}

/// Index a single page.
pub fn index_page(page: &mut Page, manager: &mut SiteLinkManager, config: &SiteConfig) {
    let mut ids = SlugHeadingIds::new(config.build.slug.clone());

    if config.build.layout {
        manager.maintain_include(&mut page.body, &page.cwf, &mut ids);
    } else {
        normalize_standalone(
            &mut page.body,
            &page.cwf,
            &config.build.include_tag,
            manager,
            &mut ids,
        );
    }

    let cwf = page.cwf.as_str();
    page.body.walk(&mut |node| {
        manager.record_identifier(node, cwf);
        manager.collect_intra_link(node, cwf);
    });
}

/// Mint ids for a stand-alone page's own headings and hand every include
/// subtree to the normalizer.
fn normalize_standalone(
    body: &mut Element,
    cwf: &str,
    include_tag: &str,
    manager: &mut SiteLinkManager,
    ids: &mut SlugHeadingIds,
) {
    if !manager.config().enabled {
        return;
    }

    let mut stack = vec![body];
    while let Some(elem) = stack.pop() {
        if elem.tag == include_tag {
            manager.maintain_include(elem, cwf, ids);
            continue;
        }
        if is_heading(&elem.tag) && elem.id().is_none() {
            ids.set_heading_id(elem, false);
        }
        stack.extend(
            elem.children
                .iter_mut()
                .rev()
                .filter_map(Node::as_element_mut),
        );
    }
}
