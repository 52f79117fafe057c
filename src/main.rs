//! folio: split LaTeX papers into an indexed hierarchy of sections.
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use folio::config::Config;
use folio::formats::latex::LatexFormat;
use folio::lookup;
use folio::pipeline;
use folio::taxonomy::TaxonomyCache;
use folio::writer::Manifest;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Structural decomposition of LaTeX papers", long_about = None)]
struct Args {
    /// Configuration file (defaults to folio.toml in the working directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a paper into one file per section
    Split {
        /// Paper directory
        paper_dir: PathBuf,
        /// Sectioning depth to split at (1 chapter, 2 section, 3 subsection)
        #[arg(long, short = 'l')]
        level: Option<usize>,
        /// Root document, relative to the paper directory
        #[arg(long, short = 'r')]
        root: Option<PathBuf>,
    },
    /// Build index.json and index.md for a split paper
    Index {
        /// Paper directory
        paper_dir: PathBuf,
    },
    /// Split then index a paper
    Process {
        /// Paper directory
        paper_dir: PathBuf,
        /// Sectioning depth to split at (1 chapter, 2 section, 3 subsection)
        #[arg(long, short = 'l')]
        level: Option<usize>,
        /// Root document, relative to the paper directory
        #[arg(long, short = 'r')]
        root: Option<PathBuf>,
    },
    /// Print the taxonomy of one section file as JSON
    Taxonomy {
        /// Paper directory
        paper_dir: PathBuf,
        /// Section file name inside the sections directory
        section_file: String,
        /// Rebuild even if a cached taxonomy exists
        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Print the manifest entry for a section number, label or title
    Find {
        /// Paper directory
        paper_dir: PathBuf,
        /// Section number, label, or part of a title
        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref()).context("loading configuration")?;

    match args.command {
        Command::Split {
            paper_dir,
            level,
            root,
        } => {
            // Override config with command line args
            if let Some(level) = level {
                cfg.split_level = level;
            }
            let manifest = pipeline::split_paper(&cfg, &paper_dir, root.as_deref())?;
            println!(
                "Split {} into {} files",
                paper_dir.display(),
                manifest.sections.len()
            );
        }
        Command::Index { paper_dir } => {
            let index = pipeline::index_paper(&cfg, &paper_dir)
                .with_context(|| format!("indexing {} (run `folio split` first)", paper_dir.display()))?;
            println!(
                "Indexed {} sections, {:.1} hours of reading",
                index.summary.total_sections, index.summary.estimated_reading_time_hours
            );
        }
        Command::Process {
            paper_dir,
            level,
            root,
        } => {
            if let Some(level) = level {
                cfg.split_level = level;
            }
            let (manifest, index) = pipeline::process_paper(&cfg, &paper_dir, root.as_deref())?;
            println!(
                "Processed {}: {} files, {:.1} hours of reading",
                paper_dir.display(),
                manifest.sections.len(),
                index.summary.estimated_reading_time_hours
            );
        }
        Command::Taxonomy {
            paper_dir,
            section_file,
            force,
        } => {
            let cache = TaxonomyCache::new(&paper_dir, &cfg.sections_dir, &cfg.taxonomy_dir);
            let taxonomy = cache.get_or_build(&section_file, force, &LatexFormat)?;
            println!("{}", serde_json::to_string_pretty(&taxonomy)?);
        }
        Command::Find { paper_dir, query } => {
            let manifest = Manifest::load(&paper_dir)?;
            let entry = lookup::resolve(&manifest, &query)?;
            println!("{}", serde_json::to_string_pretty(entry)?);
        }
    }

    Ok(())
}
