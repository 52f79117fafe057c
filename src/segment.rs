//! Partitioning of the flattened stream into per-section spans.
//!
//! Spans are measured in lines but cut as exact byte slices, so the preamble
//! followed by every section's content reproduces the stream byte for byte.

use crate::section::{Level, Section};
use std::ops::Range;

/// Byte offset at which each `\n`-separated line starts.
fn line_starts(content: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(content.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Byte offset of line `line`, or the end of the stream past the last line.
fn byte_at(starts: &[usize], content: &str, line: usize) -> usize {
    starts.get(line).copied().unwrap_or(content.len())
}

/// Sets `line_end` and `content` on every section.
///
/// Section i spans `[line_start_i, line_start_(i+1))`; the last one runs to
/// the end of the stream. Sections must be in document order.
pub fn extract_section_content(content: &str, sections: &mut [Section]) {
    let starts = line_starts(content);
    let total_lines = starts.len();

    for i in 0..sections.len() {
        let end = sections
            .get(i + 1)
            .map_or(total_lines, |next| next.line_start);
        let section = &mut sections[i];
        section.line_end = end;
        let bytes = byte_at(&starts, content, section.line_start)..byte_at(&starts, content, end);
        section.content = content[bytes].to_string();
    }
}

#[must_use]
/// Byte range of the text before the first section (the whole stream if there is none).
pub fn preamble_range(content: &str, sections: &[Section]) -> Range<usize> {
    match sections.first() {
        Some(first) => 0..byte_at(&line_starts(content), content, first.line_start),
        None => 0..content.len(),
    }
}

#[derive(Debug, Clone, Copy)]
/// Sections written together as one artifact: a head and the deeper sections after it.
pub struct Unit<'a> {
    /// Section whose title and rank name the artifact.
    pub head: &'a Section,
    /// The head followed by every section it absorbed, in document order.
    pub sections: &'a [Section],
}

impl Unit<'_> {
    #[must_use]
    /// Concatenated text of every absorbed section.
    pub fn content(&self) -> String {
        self.sections.iter().map(|s| s.content.as_str()).collect()
    }
}

#[must_use]
/// Groups sections into units cut at every section of rank `level` or above.
///
/// Each section whose rank is at or above `level` opens a unit that absorbs
/// the following deeper sections, up to the next section at or above
/// `level`. Deeper sections that precede the first such head form a unit of
/// their own, headed by the first of them, so no text is dropped.
pub fn combine_to_level(sections: &[Section], level: Level) -> Vec<Unit<'_>> {
    let mut units = Vec::new();
    if sections.is_empty() {
        return units;
    }

    let mut start = 0;
    for i in 1..=sections.len() {
        if i == sections.len() || sections[i].level <= level {
            units.push(Unit {
                head: &sections[start],
                sections: &sections[start..i],
            });
            start = i;
        }
    }

    units
}

#[cfg(test)]
#[path = "tests/segment.rs"]
mod tests;
