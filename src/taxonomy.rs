//! Per-segment taxonomy: the heading tree, labelled equations and key terms
//! of a single segment file, cached next to the segments as JSON.
//!
//! Line numbers in a taxonomy are 1-based and relative to the segment file,
//! so they can be handed straight to an editor.

use crate::detect::{clean_markup, find_sections};
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::numbering::link_hierarchy;
use crate::scan::extract_brace_content;
use crate::section::{Level, Section};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
/// What a taxonomy node stands for.
pub enum NodeType {
    /// `\part` heading.
    Part,
    /// `\chapter` heading.
    Chapter,
    /// `\section` heading.
    Section,
    /// `\subsection` heading.
    Subsection,
    /// `\subsubsection` heading.
    Subsubsection,
    /// `\paragraph` heading.
    Paragraph,
    /// Display equation environment.
    Equation,
    /// Emphasised or explicitly marked term.
    Term,
}

impl From<Level> for NodeType {
    fn from(level: Level) -> Self {
        match level {
            Level::Part => NodeType::Part,
            Level::Chapter => NodeType::Chapter,
            Level::Section => NodeType::Section,
            Level::Subsection => NodeType::Subsection,
            Level::Subsubsection => NodeType::Subsubsection,
            Level::Paragraph => NodeType::Paragraph,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// A heading, equation or term found in a segment.
pub struct TaxonomyNode {
    /// Kind of node.
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Heading text, equation label or placeholder, or the term itself.
    pub title: String,
    /// Cross-reference key, when the source gives one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// 1-based line in the segment file.
    pub line: usize,
    /// Nested headings (only populated for heading nodes).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaxonomyNode>,
}

impl TaxonomyNode {
    fn leaf(node_type: NodeType, title: String, label: Option<String>, line: usize) -> Self {
        Self {
            node_type,
            title,
            label,
            line,
            children: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
/// Node counts for a segment.
pub struct TaxonomyStats {
    /// Headings at every depth.
    pub sections: usize,
    /// Closed equation environments.
    pub equations: usize,
    /// Distinct key terms.
    pub key_terms: usize,
    /// Lines in the segment file.
    pub lines: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Structural and semantic outline of one segment file.
pub struct Taxonomy {
    /// Segment file name the taxonomy was built from.
    pub file: String,
    /// Root headings, each carrying its nested headings.
    pub hierarchy: Vec<TaxonomyNode>,
    /// Equation environments in order of appearance.
    pub equations: Vec<TaxonomyNode>,
    /// Key terms in order of first appearance.
    pub key_terms: Vec<TaxonomyNode>,
    /// Counts of the above.
    pub stats: TaxonomyStats,
}

fn heading_node(sections: &[Section], index: usize) -> TaxonomyNode {
    let section = &sections[index];
    TaxonomyNode {
        node_type: section.level.into(),
        title: section.title.clone(),
        label: section.label.clone(),
        line: section.line_start + 1,
        children: section
            .children_indices
            .iter()
            .map(|&child| heading_node(sections, child))
            .collect(),
    }
}

/// Heading tree of `content` and the number of headings in it.
fn extract_hierarchy<F: Format + ?Sized>(content: &str, format: &F) -> (Vec<TaxonomyNode>, usize) {
    let mut sections = find_sections(content, format);
    link_hierarchy(&mut sections);

    let roots = (0..sections.len())
        .filter(|&i| sections[i].parent_index.is_none())
        .map(|i| heading_node(&sections, i))
        .collect();
    (roots, sections.len())
}

/// An equation environment whose closing text has not been seen yet.
struct OpenEquation {
    line: usize,
    end: String,
    body: String,
}

impl OpenEquation {
    fn into_node<F: Format + ?Sized>(self, format: &F) -> TaxonomyNode {
        let label = format
            .label_pattern()
            .captures(&self.body)
            .map(|caps| caps[1].trim().to_string());
        let title = label
            .clone()
            .unwrap_or_else(|| format!("Equation at line {}", self.line));
        TaxonomyNode::leaf(NodeType::Equation, title, label, self.line)
    }
}

/// Equation environments of `content`, titled by label or by starting line.
///
/// An environment runs from its `\begin` to the `\end` of the same name, so
/// nested helpers such as `aligned` neither open nor close one. Scanning
/// resumes right after each `\end`. An environment left open at the end of
/// the segment is not reported.
fn extract_equations<F: Format + ?Sized>(content: &str, format: &F) -> Vec<TaxonomyNode> {
    let mut nodes = Vec::new();
    let mut open: Option<OpenEquation> = None;

    for (i, line) in content.split('\n').enumerate() {
        let mut pos = 0;
        loop {
            let rest = &line[pos..];
            if let Some(mut equation) = open.take() {
                let Some(found) = rest.find(&equation.end) else {
                    equation.body.push_str(rest);
                    equation.body.push('\n');
                    open = Some(equation);
                    break;
                };
                equation.body.push_str(&rest[..found]);
                pos += found + equation.end.len();
                nodes.push(equation.into_node(format));
            } else {
                let Some(caps) = format.equation_pattern().captures(rest) else {
                    break;
                };
                let (Some(begin), Some(name)) = (caps.get(0), caps.get(1)) else {
                    break;
                };
                open = Some(OpenEquation {
                    line: i + 1,
                    end: format.equation_end(name.as_str()),
                    body: String::new(),
                });
                pos += begin.end();
            }
        }
    }

    nodes
}

/// Distinct marked terms of `content` with the line each first appears on.
fn extract_terms<F: Format + ?Sized>(content: &str, format: &F) -> Vec<TaxonomyNode> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();

    for (i, line) in content.split('\n').enumerate() {
        for marker in format.term_pattern().find_iter(line) {
            let (raw, _) = extract_brace_content(line, marker.end() - 1);
            let term = clean_markup(raw);
            if term.chars().count() < 3 || !seen.insert(term.to_lowercase()) {
                continue;
            }
            nodes.push(TaxonomyNode::leaf(NodeType::Term, term, None, i + 1));
        }
    }

    nodes
}

#[must_use]
/// Builds the taxonomy of one segment's text.
pub fn build_taxonomy<F: Format + ?Sized>(file: &str, content: &str, format: &F) -> Taxonomy {
    let (hierarchy, sections) = extract_hierarchy(content, format);
    let equations = extract_equations(content, format);
    let key_terms = extract_terms(content, format);

    let stats = TaxonomyStats {
        sections,
        equations: equations.len(),
        key_terms: key_terms.len(),
        lines: content.split('\n').count(),
    };

    Taxonomy {
        file: file.to_string(),
        hierarchy,
        equations,
        key_terms,
        stats,
    }
}

/// On-disk cache of taxonomies for the segments of one paper.
pub struct TaxonomyCache {
    /// Directory holding the segment files.
    pub sections_dir: PathBuf,
    /// Directory holding `<stem>.taxonomy.json` files.
    pub taxonomy_dir: PathBuf,
}

impl TaxonomyCache {
    #[must_use]
    /// Cache for the segments and taxonomies under `paper_dir`.
    pub fn new(paper_dir: &Path, sections_dir: &str, taxonomy_dir: &str) -> Self {
        Self {
            sections_dir: paper_dir.join(sections_dir),
            taxonomy_dir: paper_dir.join(taxonomy_dir),
        }
    }

    /// Returns the cached taxonomy of `section_file`, building and caching it on a miss.
    ///
    /// `section_file` is a name inside the sections directory or an absolute
    /// path. With `force` the cache is ignored and overwritten. An unreadable
    /// cache entry is treated as a miss.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SegmentNotFound`] if the segment file does not exist,
    /// or an I/O or JSON error if reading the segment or writing the cache fails.
    pub fn get_or_build<F: Format + ?Sized>(&self, section_file: &str, force: bool, format: &F) -> Result<Taxonomy> {
        let requested = Path::new(section_file);
        let tex_path = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            self.sections_dir.join(requested)
        };
        if !tex_path.is_file() {
            return Err(Error::SegmentNotFound(tex_path));
        }

        let stem = tex_path
            .file_stem()
            .map_or_else(|| section_file.to_string(), |s| s.to_string_lossy().into_owned());
        let cache_path = self.taxonomy_dir.join(format!("{stem}.taxonomy.json"));

        if !force {
            if let Ok(json) = fs::read_to_string(&cache_path) {
                match serde_json::from_str(&json) {
                    Ok(taxonomy) => {
                        debug!("taxonomy cache hit: {}", cache_path.display());
                        return Ok(taxonomy);
                    }
                    Err(e) => warn!("ignoring unreadable cache {}: {e}", cache_path.display()),
                }
            }
        }

        let bytes = fs::read(&tex_path).map_err(|e| Error::io(&tex_path, e))?;
        let content = String::from_utf8_lossy(&bytes);
        let file = tex_path
            .file_name()
            .map_or_else(|| section_file.to_string(), |s| s.to_string_lossy().into_owned());
        let taxonomy = build_taxonomy(&file, &content, format);

        fs::create_dir_all(&self.taxonomy_dir).map_err(|e| Error::io(&self.taxonomy_dir, e))?;
        fs::write(&cache_path, serde_json::to_string_pretty(&taxonomy)?)
            .map_err(|e| Error::io(&cache_path, e))?;
        info!("built taxonomy {}", cache_path.display());

        Ok(taxonomy)
    }
}

#[cfg(test)]
#[path = "tests/taxonomy.rs"]
mod tests;
