//! Serialisation of combined units to segment files and the manifest listing them.
//!
//! Segment files are named `NN_rank_slug.ext`, where `NN` is the 1-based
//! emission index. The manifest (`sections.json` in the paper directory)
//! records the same order and is what the index and lookup passes read back.

use crate::error::{Error, Result};
use crate::formats::Format;
use crate::section::Level;
use crate::segment::Unit;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the manifest inside a paper directory.
pub const MANIFEST_FILE: &str = "sections.json";

static NON_WORD: Lazy<Regex> = Lazy::new(|| compile(r"[^\w\s-]"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));
static SEGMENT_NAME: Lazy<Regex> = Lazy::new(|| {
    let ranks: Vec<&str> = Level::ALL.iter().map(|level| level.name()).collect();
    compile(&format!(r"^\d{{2,}}_(?:{})_", ranks.join("|")))
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in file name pattern is valid")
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// What was written for one unit.
pub struct ManifestEntry {
    /// 1-based emission index, also the file name prefix.
    pub index: usize,
    /// Segment file name, relative to the sections directory.
    pub file: String,
    /// Cleaned title of the unit's head section.
    pub title: String,
    /// Rank of the unit's head section.
    pub level: Level,
    /// Hierarchical number of the head section within its rank.
    pub number: usize,
    /// Cross-reference key of the head section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Number of lines in the written file.
    pub lines: usize,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Record of a split run, in emission order.
pub struct Manifest {
    /// Paper directory the run wrote into.
    pub paper_dir: String,
    /// Root document, relative to the paper directory when possible.
    pub main_tex: String,
    /// Sections detected in the flattened stream, at every rank.
    pub total_sections: usize,
    /// One entry per written segment file.
    pub sections: Vec<ManifestEntry>,
}

impl Manifest {
    /// Writes the manifest as pretty JSON into `paper_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the write fails.
    pub fn save(&self, paper_dir: &Path) -> Result<PathBuf> {
        let path = paper_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&path, json).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    /// Reads the manifest written by a previous split of `paper_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or not a valid manifest.
    pub fn load(paper_dir: &Path) -> Result<Self> {
        let path = paper_dir.join(MANIFEST_FILE);
        let json = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[must_use]
/// Converts a section title into a file-name-safe slug.
///
/// Characters that are neither word characters, whitespace nor `-` are
/// dropped, whitespace runs become `_`, the result is cut to `max_length`
/// characters and lower-cased. An empty slug becomes `untitled`.
pub fn sanitize_filename(title: &str, max_length: usize) -> String {
    let kept = NON_WORD.replace_all(title, "");
    let joined = WHITESPACE.replace_all(&kept, "_");
    let truncated: String = joined.chars().take(max_length).collect();
    let name = truncated.trim_end_matches('_').to_lowercase();
    if name.is_empty() {
        "untitled".to_string()
    } else {
        name
    }
}

/// Deletes numbered segment files left in `output_dir` by an earlier run.
fn remove_stale_segments(output_dir: &Path, extension: &str) -> Result<()> {
    let entries = fs::read_dir(output_dir).map_err(|e| Error::io(output_dir, e))?;
    for entry in entries.filter_map(std::result::Result::ok) {
        let path = entry.path();
        let is_segment = path.is_file()
            && path.extension().is_some_and(|ext| ext == extension)
            && path
                .file_name()
                .is_some_and(|name| SEGMENT_NAME.is_match(&name.to_string_lossy()));
        if is_segment {
            debug!("removing stale segment {}", path.display());
            fs::remove_file(&path).map_err(|e| Error::io(&path, e))?;
        }
    }
    Ok(())
}

/// Writes one file per unit into `output_dir` and returns their manifest entries.
///
/// Numbered segment files from a previous run are removed first so the
/// directory always mirrors the latest split.
///
/// # Errors
///
/// Returns an error if the directory cannot be prepared or a file cannot be written.
pub fn write_units<F: Format + ?Sized>(
    units: &[Unit<'_>],
    output_dir: &Path,
    format: &F,
    slug_max_length: usize,
) -> Result<Vec<ManifestEntry>> {
    fs::create_dir_all(output_dir).map_err(|e| Error::io(output_dir, e))?;
    remove_stale_segments(output_dir, format.extension())?;

    let mut written = Vec::with_capacity(units.len());
    for (i, unit) in units.iter().enumerate() {
        let head = unit.head;
        let index = i + 1;
        let file = format!(
            "{index:02}_{}_{}.{}",
            head.level.name(),
            sanitize_filename(&head.title, slug_max_length),
            format.extension()
        );
        let content = unit.content();
        let path = output_dir.join(&file);
        fs::write(&path, &content).map_err(|e| Error::io(&path, e))?;
        info!("  {file}");

        written.push(ManifestEntry {
            index,
            file,
            title: head.title.clone(),
            level: head.level,
            number: head.number,
            label: head.label.clone(),
            lines: content.matches('\n').count() + 1,
        });
    }

    Ok(written)
}

#[cfg(test)]
#[path = "tests/writer.rs"]
mod tests;
