//! `<include src="...">` expansion.
//!
//! The included file is parsed and its nodes become the children of the
//! include element, so the element itself stays in the tree and marks
//! where included content starts.
//!
//! - `src="part.md"`: relative to the including file
//! - `src="/parts/a.md"`: relative to the content directory
//! - `src="part.md#usage"`: only the element with `id="usage"`

use std::fs;
use std::path::{Path, PathBuf};

use super::{PipelineError, parse_source};
use crate::dom::{Element, Node};
use crate::utils::path::normalize_path;
use crate::utils::path::route::split_path_fragment;

/// Expands include elements in one page, recursively.
pub struct IncludeExpander<'a> {
    tag: &'a str,
    root: &'a Path,
    /// Files currently being expanded, outermost first.
    stack: Vec<PathBuf>,
    errors: Vec<PipelineError>,
}

impl<'a> IncludeExpander<'a> {
    pub fn new(tag: &'a str, root: &'a Path) -> Self {
        Self {
            tag,
            root,
            stack: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Expand every include in `nodes`, which were parsed from `file`.
    pub fn expand_file(&mut self, nodes: &mut [Node], file: &Path) {
        self.stack.push(normalize_path(file));
        self.expand_nodes(nodes, file);
        self.stack.pop();
    }

    /// Failures collected so far.
    pub fn into_errors(self) -> Vec<PipelineError> {
        self.errors
    }

    fn expand_nodes(&mut self, nodes: &mut [Node], file: &Path) {
        for elem in nodes.iter_mut().filter_map(Node::as_element_mut) {
            if elem.tag == self.tag {
                match self.load(elem, file) {
                    Ok(children) => elem.children = children,
                    Err(err) => self.errors.push(err),
                }
            } else {
                self.expand_nodes(&mut elem.children, file);
            }
        }
    }

    fn load(&mut self, elem: &Element, file: &Path) -> Result<Vec<Node>, PipelineError> {
        let src = elem
            .attr("src")
            .filter(|src| !src.is_empty())
            .ok_or_else(|| PipelineError::IncludeWithoutSrc {
                tag: self.tag.to_string(),
                file: file.to_path_buf(),
            })?;

        let (path, segment) = split_path_fragment(src);
        let target = normalize_path(&self.resolve(path, file));

        if self.stack.contains(&target) {
            return Err(PipelineError::IncludeCycle {
                target,
                file: file.to_path_buf(),
            });
        }

        let source = fs::read_to_string(&target).map_err(|source| PipelineError::MissingInclude {
            src: src.to_string(),
            file: file.to_path_buf(),
            source,
        })?;

        let mut nodes = parse_source(&target, &source);
        self.expand_file(&mut nodes, &target);

        if segment.is_empty() {
            return Ok(nodes);
        }
        select_segment(&nodes, segment)
            .map(|elem| vec![Node::Element(elem)])
            .ok_or_else(|| PipelineError::MissingSegment {
                id: segment.to_string(),
                src: src.to_string(),
                file: file.to_path_buf(),
            })
    }

    fn resolve(&self, src: &str, file: &Path) -> PathBuf {
        match src.strip_prefix('/') {
            Some(rooted) => self.root.join(rooted),
            None => file.parent().unwrap_or(self.root).join(src),
        }
    }
}

/// First element in document order whose `id` is `id`.
fn select_segment(nodes: &[Node], id: &str) -> Option<Element> {
    let mut found = None;
    for root in nodes.iter().filter_map(Node::as_element) {
        root.walk(&mut |elem| {
            if found.is_none() && elem.id() == Some(id) {
                found = Some(elem.clone());
            }
        });
        if found.is_some() {
            break;
        }
    }
    found
}
