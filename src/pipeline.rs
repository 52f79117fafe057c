//! End-to-end runs over one paper directory.
//!
//! These are the entry points the binary calls. Each takes the configuration
//! explicitly and reports progress through the `log` facade.

use crate::config::Config;
use crate::detect::find_sections;
use crate::error::Result;
use crate::formats::latex::LatexFormat;
use crate::formats::Format;
use crate::index::{build_index, write_index, DocumentIndex};
use crate::input::{expand_inputs, find_main_tex};
use crate::numbering::{assign_numbers, link_hierarchy};
use crate::segment::{combine_to_level, extract_section_content};
use crate::writer::{write_units, Manifest};
use log::{info, warn};
use std::path::{Path, PathBuf};

/// Root document to split: `root` resolved against `paper_dir`, or the discovered main file.
fn locate_root<F: Format + ?Sized>(config: &Config, paper_dir: &Path, root: Option<&Path>, format: &F) -> Result<PathBuf> {
    match root {
        Some(root) if root.is_absolute() => Ok(root.to_path_buf()),
        Some(root) => Ok(paper_dir.join(root)),
        None => find_main_tex(
            paper_dir,
            format,
            &[config.sections_dir.as_str(), config.taxonomy_dir.as_str()],
        ),
    }
}

/// Splits the paper in `paper_dir` into segment files and saves the manifest.
///
/// `root` names the document to start from; without it the main file is
/// discovered. Segments are cut at `config.split_level`.
///
/// # Errors
///
/// Returns an error if the root document is missing or unreadable, or if a
/// segment or the manifest cannot be written.
pub fn split_paper(config: &Config, paper_dir: &Path, root: Option<&Path>) -> Result<Manifest> {
    let format = LatexFormat;
    let root = locate_root(config, paper_dir, root, &format)?;
    info!("processing {}", root.display());

    let base_dir = root.parent().unwrap_or(paper_dir);
    let content = expand_inputs(&root, base_dir, &format)?;
    info!("expanded document: {} lines", content.split('\n').count());

    let mut sections = find_sections(&content, &format);
    if sections.is_empty() {
        warn!("no sections found in {}", root.display());
    } else {
        info!("found {} sections", sections.len());
    }

    assign_numbers(&mut sections);
    link_hierarchy(&mut sections);
    extract_section_content(&content, &mut sections);

    let level = config.split_rank();
    let units = combine_to_level(&sections, level);
    info!("writing {} segments at {level} level", units.len());

    let sections_dir = paper_dir.join(&config.sections_dir);
    let entries = write_units(&units, &sections_dir, &format, config.slug_max_length)?;

    let main_tex = root
        .strip_prefix(paper_dir)
        .unwrap_or(&root)
        .display()
        .to_string();
    let manifest = Manifest {
        paper_dir: paper_dir.display().to_string(),
        main_tex,
        total_sections: sections.len(),
        sections: entries,
    };
    let path = manifest.save(paper_dir)?;
    info!("manifest saved to {}", path.display());

    Ok(manifest)
}

/// Builds and writes the index of a paper split earlier.
///
/// # Errors
///
/// Returns an error if the manifest is missing or invalid, a segment cannot
/// be read, or the index files cannot be written.
pub fn index_paper(config: &Config, paper_dir: &Path) -> Result<DocumentIndex> {
    let manifest = Manifest::load(paper_dir)?;
    let sections_dir = paper_dir.join(&config.sections_dir);
    info!("indexing {} segments", manifest.sections.len());

    let index = build_index(
        paper_dir,
        &sections_dir,
        &manifest,
        &LatexFormat,
        &config.analyzer_options(),
    )?;
    write_index(paper_dir, &index)?;

    let summary = &index.summary;
    info!(
        "indexed {} sections, {} lines, {} equations, {:.1} hours",
        summary.total_sections,
        summary.total_lines,
        summary.total_equations,
        summary.estimated_reading_time_hours
    );
    Ok(index)
}

/// Splits then indexes the paper in `paper_dir`.
///
/// # Errors
///
/// Returns the first error of either step.
pub fn process_paper(config: &Config, paper_dir: &Path, root: Option<&Path>) -> Result<(Manifest, DocumentIndex)> {
    let manifest = split_paper(config, paper_dir, root)?;
    let index = index_paper(config, paper_dir)?;
    Ok((manifest, index))
}
