//! folio: structural decomposition of LaTeX papers.
//!
//! A paper's root document is flattened by splicing in every `\input` and
//! `\include`, its sectioning commands are detected and numbered, and the
//! stream is cut into one file per section. Each file can then be annotated
//! (equations, figures, tables, key terms, reading time) into a paper index,
//! or outlined into a cached per-segment taxonomy.

/// Content statistics for a span of text.
pub mod analyze;
/// User configuration loaded from folio.toml.
pub mod config;
/// Sectioning command detection and title cleaning.
pub mod detect;
/// Crate-wide error type.
pub mod error;
/// Source markup formats.
pub mod formats;
/// Paper-level index over the written segments.
pub mod index;
/// Main document discovery and inclusion expansion.
pub mod input;
/// Query resolution over the manifest.
pub mod lookup;
/// Hierarchical numbering and parent/child linking.
pub mod numbering;
/// End-to-end runs over a paper directory.
pub mod pipeline;
/// Balanced brace scanning.
pub mod scan;
/// Section records and sectioning ranks.
pub mod section;
/// Partitioning of the flattened stream into section spans and units.
pub mod segment;
/// Per-segment taxonomies and their cache.
pub mod taxonomy;
/// Segment files and the manifest.
pub mod writer;

pub use error::{Error, Result};
