//! Document-level index folded from the per-segment analyses.
//!
//! The index is written twice: `index.json` for tools and `index.md` for
//! people. Segments are analysed in parallel; the records keep manifest order.

use crate::analyze::{analyze, AnalyzerOptions};
use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::Level;
use crate::writer::Manifest;
use chrono::{DateTime, Utc};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the JSON index inside a paper directory.
pub const INDEX_JSON: &str = "index.json";

/// File name of the Markdown index inside a paper directory.
pub const INDEX_MARKDOWN: &str = "index.md";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Annotations of one written segment.
pub struct SectionSummary {
    /// Emission index of the segment (its file name prefix).
    pub number: usize,
    /// Rank of the segment's head section.
    pub level: Level,
    /// Title of the segment's head section.
    pub title: String,
    /// Segment file name.
    pub file: String,
    /// Lines in the segment file.
    pub lines: usize,
    /// Equation environments and display-math delimiters.
    pub equations: usize,
    /// Figure environments.
    pub figures: usize,
    /// Table environments.
    pub tables: usize,
    /// Estimated minutes to read.
    pub reading_time_min: usize,
    /// Candidate key terms.
    pub key_terms: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
/// Totals over every segment.
pub struct IndexSummary {
    /// Segments indexed.
    pub total_sections: usize,
    /// Lines across all segments.
    pub total_lines: usize,
    /// Equations across all segments.
    pub total_equations: usize,
    /// Figures across all segments.
    pub total_figures: usize,
    /// Tables across all segments.
    pub total_tables: usize,
    /// Sum of the per-segment reading times, in hours.
    pub estimated_reading_time_hours: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
/// Summary of a whole split paper.
pub struct DocumentIndex {
    /// Name of the paper directory.
    pub paper_id: String,
    /// When the index was generated.
    pub indexed_at: DateTime<Utc>,
    /// Document totals.
    pub summary: IndexSummary,
    /// Per-segment records in manifest order.
    pub sections: Vec<SectionSummary>,
}

/// Analyses every segment listed in `manifest` and folds the results.
///
/// # Errors
///
/// Returns an error if a listed segment file cannot be read.
pub fn build_index<F: Format + Sync + ?Sized>(
    paper_dir: &Path,
    sections_dir: &Path,
    manifest: &Manifest,
    format: &F,
    options: &AnalyzerOptions,
) -> Result<DocumentIndex> {
    let sections = manifest
        .sections
        .par_iter()
        .map(|entry| {
            let path = sections_dir.join(&entry.file);
            let bytes = fs::read(&path).map_err(|e| Error::io(&path, e))?;
            let content = String::from_utf8_lossy(&bytes);
            let stats = analyze(&content, format, options);

            Ok(SectionSummary {
                number: entry.index,
                level: entry.level,
                title: entry.title.clone(),
                file: entry.file.clone(),
                lines: content.matches('\n').count() + 1,
                equations: stats.equations,
                figures: stats.figures,
                tables: stats.tables,
                reading_time_min: stats.reading_time_min,
                key_terms: stats.key_terms,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let reading_minutes: usize = sections.iter().map(|s| s.reading_time_min).sum();
    #[allow(clippy::cast_precision_loss)]
    let estimated_reading_time_hours = reading_minutes as f64 / 60.0;

    let summary = IndexSummary {
        total_sections: sections.len(),
        total_lines: sections.iter().map(|s| s.lines).sum(),
        total_equations: sections.iter().map(|s| s.equations).sum(),
        total_figures: sections.iter().map(|s| s.figures).sum(),
        total_tables: sections.iter().map(|s| s.tables).sum(),
        estimated_reading_time_hours,
    };

    let paper_id = paper_dir
        .file_name()
        .map_or_else(|| paper_dir.display().to_string(), |n| n.to_string_lossy().into_owned());

    Ok(DocumentIndex {
        paper_id,
        indexed_at: Utc::now(),
        summary,
        sections,
    })
}

/// Formats an integer with `,` between groups of three digits.
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn shorten(title: &str, max: usize) -> String {
    if title.chars().count() > max {
        format!("{}...", title.chars().take(max).collect::<String>())
    } else {
        title.to_string()
    }
}

#[must_use]
/// Renders the index as a Markdown reading guide.
pub fn render_markdown(index: &DocumentIndex) -> String {
    let summary = &index.summary;
    let mut lines = vec![
        format!("# Index: {}", index.paper_id),
        String::new(),
        format!("*Indexed: {}*", index.indexed_at.format("%Y-%m-%d")),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        format!("- **Sections**: {}", summary.total_sections),
        format!("- **Lines**: {}", group_thousands(summary.total_lines)),
        format!("- **Equations**: {}", summary.total_equations),
        format!("- **Figures**: {}", summary.total_figures),
        format!("- **Tables**: {}", summary.total_tables),
        format!(
            "- **Est. reading time**: {:.1} hours",
            summary.estimated_reading_time_hours
        ),
        String::new(),
        "## Sections".to_string(),
        String::new(),
        "| # | Title | Lines | Eqs | Figs | Time |".to_string(),
        "|---|-------|-------|-----|------|------|".to_string(),
    ];

    lines.extend(index.sections.iter().map(|s| {
        format!(
            "| {:02} | {} | {} | {} | {} | {}m |",
            s.number,
            shorten(&s.title, 40),
            s.lines,
            s.equations,
            s.figures,
            s.reading_time_min
        )
    }));

    lines.extend([String::new(), "## Key Terms by Section".to_string(), String::new()]);
    lines.extend(
        index
            .sections
            .iter()
            .filter(|s| !s.key_terms.is_empty())
            .map(|s| {
                let terms: Vec<&str> = s.key_terms.iter().take(5).map(String::as_str).collect();
                let title: String = s.title.chars().take(30).collect();
                format!("**{:02}. {title}**: {}", s.number, terms.join(", "))
            }),
    );

    lines.extend(
        [
            "",
            "---",
            "",
            "## Reading Guide",
            "",
            "To read a section:",
            "```",
            "folio find <paper_dir> XX   (section number, label or title)",
            "```",
            "",
        ]
        .map(String::from),
    );

    lines.join("\n")
}

/// Writes `index.json` and `index.md` into `paper_dir`.
///
/// # Errors
///
/// Returns an error if serialisation or either write fails.
pub fn write_index(paper_dir: &Path, index: &DocumentIndex) -> Result<(PathBuf, PathBuf)> {
    let json_path = paper_dir.join(INDEX_JSON);
    fs::write(&json_path, serde_json::to_string_pretty(index)?)
        .map_err(|e| Error::io(&json_path, e))?;
    info!("wrote {}", json_path.display());

    let md_path = paper_dir.join(INDEX_MARKDOWN);
    fs::write(&md_path, render_markdown(index)).map_err(|e| Error::io(&md_path, e))?;
    info!("wrote {}", md_path.display());

    Ok((json_path, md_path))
}

#[cfg(test)]
#[path = "tests/index.rs"]
mod tests;
