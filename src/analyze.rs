//! Per-segment content statistics.
//!
//! Everything here is a pure function of a text span. The counts are raw
//! pattern occurrences rather than logical objects: a `$$ ... $$` pair adds
//! two to the equation count, one per delimiter.

use crate::detect::clean_markup;
use crate::formats::Format;
use crate::scan::extract_brace_content;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Key terms kept per segment unless configured otherwise.
pub const DEFAULT_MAX_TERMS: usize = 10;

/// Reading speed used for time estimates unless configured otherwise.
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

static DEFINED_TERM: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?:called|denoted|defined as|known as)\s+(?:the\s+)?([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)")
});
static ARGUMENT_COMMAND: Lazy<Regex> = Lazy::new(|| compile(r"\\[a-zA-Z]+\{[^}]*\}"));
static BARE_COMMAND: Lazy<Regex> = Lazy::new(|| compile(r"\\[a-zA-Z]+"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in analysis pattern is valid")
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Tunables for [`analyze`].
pub struct AnalyzerOptions {
    /// Upper bound on the key terms reported per segment.
    pub max_terms: usize,
    /// Reading speed for the time estimate.
    pub words_per_minute: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            max_terms: DEFAULT_MAX_TERMS,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
/// Semantic annotations for one span of text.
pub struct ContentStats {
    /// Equation environment openings plus display-math delimiters.
    pub equations: usize,
    /// Figure environment openings.
    pub figures: usize,
    /// Table environment openings.
    pub tables: usize,
    /// Candidate key terms, first-seen casing, de-duplicated.
    pub key_terms: Vec<String>,
    /// Estimated minutes to read, at least 1.
    pub reading_time_min: usize,
}

#[must_use]
/// Counts equation environment openings and display-math delimiters.
pub fn count_equations<F: Format + ?Sized>(text: &str, format: &F) -> usize {
    format.equation_pattern().find_iter(text).count()
        + format.display_math_pattern().find_iter(text).count()
}

#[must_use]
/// Counts figure environment openings.
pub fn count_figures<F: Format + ?Sized>(text: &str, format: &F) -> usize {
    format.figure_pattern().find_iter(text).count()
}

#[must_use]
/// Counts table environment openings.
pub fn count_tables<F: Format + ?Sized>(text: &str, format: &F) -> usize {
    format.table_pattern().find_iter(text).count()
}

#[must_use]
/// Collects up to `max_terms` candidate key terms.
///
/// Arguments of term-marking commands come first, in order of appearance,
/// followed by capitalised phrases introduced by "called", "denoted",
/// "defined as" or "known as". Terms shorter than three characters are
/// skipped and duplicates are detected case-insensitively.
pub fn extract_key_terms<F: Format + ?Sized>(text: &str, format: &F, max_terms: usize) -> Vec<String> {
    let marked = format.term_pattern().find_iter(text).map(|m| {
        let (raw, _) = extract_brace_content(text, m.end() - 1);
        clean_markup(raw)
    });
    let defined = DEFINED_TERM
        .captures_iter(text)
        .map(|caps| caps[1].to_string());

    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for term in marked.chain(defined) {
        if terms.len() >= max_terms {
            break;
        }
        let term = term.trim();
        if term.chars().count() > 2 && seen.insert(term.to_lowercase()) {
            terms.push(term.to_string());
        }
    }
    terms
}

#[must_use]
/// Estimates reading time in whole minutes, never less than 1.
///
/// Commands and their brace arguments are dropped before counting
/// whitespace-separated words.
pub fn estimate_reading_time(text: &str, words_per_minute: usize) -> usize {
    let without_arguments = ARGUMENT_COMMAND.replace_all(text, "");
    let prose = BARE_COMMAND.replace_all(&without_arguments, "");
    let words = prose.split_whitespace().count();
    words.checked_div(words_per_minute).unwrap_or(0).max(1)
}

#[must_use]
/// Computes every annotation for `text`.
pub fn analyze<F: Format + ?Sized>(text: &str, format: &F, options: &AnalyzerOptions) -> ContentStats {
    ContentStats {
        equations: count_equations(text, format),
        figures: count_figures(text, format),
        tables: count_tables(text, format),
        key_terms: extract_key_terms(text, format, options.max_terms),
        reading_time_min: estimate_reading_time(text, options.words_per_minute),
    }
}

#[cfg(test)]
#[path = "tests/analyze.rs"]
mod tests;
