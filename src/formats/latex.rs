//! LaTeX format implementation.
//!
//! Recognises the six standard sectioning commands (starred or not), `\label`,
//! `\input`/`\include`, the emphasis commands used to mark key terms and the
//! usual display-math environments.

use crate::formats::Format;
use crate::section::Level;
use once_cell::sync::Lazy;
use regex::Regex;

static HEADINGS: Lazy<Vec<(Level, Regex)>> = Lazy::new(|| {
    Level::ALL
        .iter()
        .map(|&level| {
            let pattern = format!(r"\\{}\*?\s*\{{", level.name());
            (level, compile(&pattern))
        })
        .collect()
});

static LABEL: Lazy<Regex> = Lazy::new(|| compile(r"\\label\{([^}]+)\}"));

static INCLUSION: Lazy<Regex> = Lazy::new(|| compile(r"\\(?:input|include)\s*\{([^}]+)\}"));

static TERM: Lazy<Regex> = Lazy::new(|| compile(r"\\(?:textbf|emph|textit|term)\s*\{"));

const EQUATION_ENVIRONMENTS: [&str; 5] = ["equation", "align", "gather", "multline", "eqnarray"];

static EQUATION: Lazy<Regex> = Lazy::new(|| {
    compile(&format!(
        r"\\begin\{{((?:{})\*?)\}}",
        EQUATION_ENVIRONMENTS.join("|")
    ))
});

static DISPLAY_MATH: Lazy<Regex> = Lazy::new(|| compile(r"\$\$|\\\["));

static FIGURE: Lazy<Regex> = Lazy::new(|| compile(r"\\begin\{figure\*?\}"));

static TABLE: Lazy<Regex> = Lazy::new(|| compile(r"\\begin\{table\*?\}"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in LaTeX pattern is valid")
}

/// Patterns for standard LaTeX article, report and book classes.
pub struct LatexFormat;

impl Format for LatexFormat {
    fn extension(&self) -> &'static str {
        "tex"
    }

    fn heading_patterns(&self) -> &[(Level, Regex)] {
        &HEADINGS
    }

    fn label_pattern(&self) -> &Regex {
        &LABEL
    }

    fn inclusion_pattern(&self) -> &Regex {
        &INCLUSION
    }

    fn term_pattern(&self) -> &Regex {
        &TERM
    }

    fn equation_pattern(&self) -> &Regex {
        &EQUATION
    }

    fn equation_end(&self, environment: &str) -> String {
        format!(r"\end{{{environment}}}")
    }

    fn display_math_pattern(&self) -> &Regex {
        &DISPLAY_MATH
    }

    fn figure_pattern(&self) -> &Regex {
        &FIGURE
    }

    fn table_pattern(&self) -> &Regex {
        &TABLE
    }
}
