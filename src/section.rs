//! Section representation for LaTeX documents split on sectioning commands.
//!
//! A section represents one heading occurrence in the flattened document. The
//! tree is stored flat: sections sit in document order and point at their
//! parent and children by index, so that a contiguous slice of the vector is
//! always a contiguous span of the source.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Structural rank of a sectioning command, ordered from outermost to innermost.
pub enum Level {
    /// `\part`
    Part,
    /// `\chapter`
    Chapter,
    /// `\section`
    Section,
    /// `\subsection`
    Subsection,
    /// `\subsubsection`
    Subsubsection,
    /// `\paragraph`
    Paragraph,
}

impl Level {
    /// Every rank in precedence order (top rank first).
    pub const ALL: [Level; 6] = [
        Level::Part,
        Level::Chapter,
        Level::Section,
        Level::Subsection,
        Level::Subsubsection,
        Level::Paragraph,
    ];

    #[must_use]
    /// Nesting depth, 0 for `\part`.
    pub fn depth(self) -> usize {
        self as usize
    }

    #[must_use]
    /// Rank for a depth, if one of the six exists.
    pub fn from_depth(depth: usize) -> Option<Self> {
        Self::ALL.get(depth).copied()
    }

    #[must_use]
    /// Command name, also used in segment file names.
    pub fn name(self) -> &'static str {
        match self {
            Level::Part => "part",
            Level::Chapter => "chapter",
            Level::Section => "section",
            Level::Subsection => "subsection",
            Level::Subsubsection => "subsubsection",
            Level::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// One heading in the flattened stream, with the span of text it owns.
pub struct Section {
    /// Structural rank of the command that opened this section.
    pub level: Level,
    /// Position among siblings of the same rank under the same ancestor (from 1).
    pub number: usize,
    /// Heading text without markup commands.
    pub title: String,
    /// `\label` key found on the heading line or the line after it.
    pub label: Option<String>,
    /// Line holding the sectioning command (0-indexed, inclusive).
    pub line_start: usize,
    /// Line where the next section begins or the stream ends (exclusive).
    pub line_end: usize,
    /// Exact text of `[line_start, line_end)`, line terminators included.
    pub content: String,
    /// Index of the nearest preceding section of a shallower rank.
    pub parent_index: Option<usize>,
    /// Indices of directly nested sections.
    pub children_indices: Vec<usize>,
}

impl Section {
    #[must_use]
    /// Creates an unnumbered section starting at `line_start` with no content yet.
    pub fn new(level: Level, title: impl Into<String>, label: Option<String>, line_start: usize) -> Self {
        Self {
            level,
            number: 0,
            title: title.into(),
            label,
            line_start,
            line_end: line_start,
            content: String::new(),
            parent_index: None,
            children_indices: Vec::new(),
        }
    }
}
