//! Format trait and implementations for different markup dialects.
//!
//! This module defines the `Format` trait which abstracts over the concrete
//! command syntax (sectioning commands, labels, inclusion directives, term
//! markers, math environments) so the detection and analysis passes only
//! deal in compiled patterns.

pub mod latex;

use crate::section::Level;
use regex::Regex;

/// Patterns describing how a markup dialect spells its structure.
pub trait Format {
    /// File suffix (without the dot) of source documents and written segments.
    fn extension(&self) -> &'static str;

    /// Sectioning patterns in precedence order, top rank first. Each match
    /// must end on the opening brace of the title argument.
    fn heading_patterns(&self) -> &[(Level, Regex)];

    /// Pattern whose first group is a cross-reference key.
    fn label_pattern(&self) -> &Regex;

    /// Pattern whose first group is the target of an inclusion directive.
    fn inclusion_pattern(&self) -> &Regex;

    /// Pattern matching a term-marking command up to its opening brace.
    fn term_pattern(&self) -> &Regex;

    /// Pattern matching the opening of any equation environment. The first
    /// group is the environment name as written, including any `*`.
    fn equation_pattern(&self) -> &Regex;

    /// Text that closes the equation environment named `environment`.
    fn equation_end(&self, environment: &str) -> String;

    /// Pattern matching a single display-math delimiter.
    fn display_math_pattern(&self) -> &Regex;

    /// Pattern matching the opening of a figure.
    fn figure_pattern(&self) -> &Regex;

    /// Pattern matching the opening of a table.
    fn table_pattern(&self) -> &Regex;
}
