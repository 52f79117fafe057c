//! Document discovery and inclusion expansion.
//!
//! A paper source tree is usually a main file that pulls chapters in with
//! `\input` or `\include`. Expansion splices every included file in place,
//! bracketed by comment markers naming it, and keeps going past anything it
//! cannot splice: a missing or circular inclusion leaves a one-line marker
//! rather than aborting the run.

use crate::error::{Error, Result};
use crate::formats::Format;
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Main-file names tried before any content sniffing, highest priority first.
const MAIN_NAMES: [&str; 7] = [
    "main.tex",
    "main_v2.tex",
    "main_v1.tex",
    "paper.tex",
    "article.tex",
    "manuscript.tex",
    "book.tex",
];

fn read_lossy(path: &Path) -> io::Result<String> {
    fs::read(path).map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Stable identity of a file for cycle detection.
fn identity(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

/// Expands every inclusion directive reachable from `root` into one stream.
///
/// Targets resolve against the including file's directory first, then
/// against `base_dir`, with the format's extension appended when absent.
///
/// # Errors
///
/// Returns [`Error::RootNotFound`] if `root` does not exist and
/// [`Error::Io`] if it cannot be read. Problems with included files never
/// fail the expansion.
pub fn expand_inputs<F: Format + ?Sized>(root: &Path, base_dir: &Path, format: &F) -> Result<String> {
    let text = read_lossy(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::RootNotFound(root.to_path_buf()),
        _ => Error::io(root, e),
    })?;

    let mut chain = HashSet::from([identity(root)]);
    Ok(expand_text(&text, root, base_dir, format, &mut chain))
}

/// Replaces the directives in `text`, which was read from `file`.
///
/// `chain` holds the identities of every file currently being expanded,
/// from the root down to `file`.
fn expand_text<F: Format + ?Sized>(
    text: &str,
    file: &Path,
    base_dir: &Path,
    format: &F,
    chain: &mut HashSet<PathBuf>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in format.inclusion_pattern().captures_iter(text) {
        let Some(directive) = caps.get(0) else {
            continue;
        };
        out.push_str(&text[last..directive.start()]);

        let mut name = caps[1].trim().to_string();
        let suffix = format!(".{}", format.extension());
        if !name.ends_with(&suffix) {
            name.push_str(&suffix);
        }

        out.push_str(&format!("\n% === INPUT: {name} ===\n"));
        out.push_str(&expand_included(&name, file, base_dir, format, chain));
        out.push_str(&format!("\n% === END INPUT: {name} ===\n"));
        last = directive.end();
    }

    out.push_str(&text[last..]);
    out
}

fn expand_included<F: Format + ?Sized>(
    name: &str,
    including: &Path,
    base_dir: &Path,
    format: &F,
    chain: &mut HashSet<PathBuf>,
) -> String {
    let local = including
        .parent()
        .map_or_else(|| PathBuf::from(name), |dir| dir.join(name));
    let path = if local.exists() {
        local
    } else {
        base_dir.join(name)
    };

    let id = identity(&path);
    if chain.contains(&id) {
        warn!("circular inclusion of {} from {}", path.display(), including.display());
        return format!("% [CIRCULAR: {}]\n", display_name(&path));
    }

    let text = match read_lossy(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("included file not found: {}", path.display());
            return format!("% [FILE NOT FOUND: {name}]\n");
        }
        Err(e) => {
            warn!("cannot read included file {}: {e}", path.display());
            return format!("% [UNREADABLE: {name}]\n");
        }
    };

    debug!("expanding {}", path.display());
    chain.insert(id.clone());
    let expanded = expand_text(&text, &path, base_dir, format, chain);
    chain.remove(&id);
    expanded
}

/// Collects files with `extension` under `dir`, skipping directories named in `skip`.
fn find_documents(dir: &Path, extension: &str, skip: &[&str], found: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            let skipped = path
                .file_name()
                .is_some_and(|name| skip.iter().any(|s| name == *s));
            if !skipped {
                find_documents(&path, extension, skip, found)?;
            }
        } else if path.extension().is_some_and(|ext| ext == extension) {
            found.push(path);
        }
    }
    Ok(())
}

/// Locates the root document of a paper directory.
///
/// A `main_tex: <relative path>` line in `metadata.txt` wins. Otherwise the
/// source files under `src/` (or the paper directory itself) are searched:
/// conventional main-file names first, then files declaring
/// `\documentclass` (preferring the one with the most `\input` directives),
/// then the first file found. Directories named in `skip` are not searched.
///
/// # Errors
///
/// Returns [`Error::RootNotFound`] when no source file exists, or
/// [`Error::Io`] if a directory cannot be listed.
pub fn find_main_tex<F: Format + ?Sized>(paper_dir: &Path, format: &F, skip: &[&str]) -> Result<PathBuf> {
    if let Ok(metadata) = fs::read_to_string(paper_dir.join("metadata.txt")) {
        if let Some(rel) = metadata
            .lines()
            .find_map(|line| line.strip_prefix("main_tex:"))
        {
            return Ok(paper_dir.join(rel.trim()));
        }
    }

    let src_dir = paper_dir.join("src");
    let search_dir = if src_dir.is_dir() {
        src_dir
    } else {
        paper_dir.to_path_buf()
    };
    if !search_dir.is_dir() {
        return Err(Error::RootNotFound(search_dir));
    }

    let mut candidates = Vec::new();
    find_documents(&search_dir, format.extension(), skip, &mut candidates)?;

    for main_name in MAIN_NAMES {
        if let Some(found) = candidates.iter().find(|path| {
            path.file_name()
                .is_some_and(|name| name.to_string_lossy().eq_ignore_ascii_case(main_name))
        }) {
            return Ok(found.clone());
        }
    }

    let mut best: Option<(&PathBuf, usize)> = None;
    for path in &candidates {
        let Ok(content) = read_lossy(path) else {
            continue;
        };
        if !content.contains(r"\documentclass") {
            continue;
        }
        let inputs = content.matches(r"\input").count();
        if best.is_none_or(|(_, most)| inputs > most) {
            best = Some((path, inputs));
        }
    }

    if let Some((path, _)) = best {
        return Ok(path.clone());
    }

    candidates
        .into_iter()
        .next()
        .ok_or(Error::RootNotFound(search_dir))
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
