//! Sectioning-command detection over a flattened document.
//!
//! Detection is strictly per line: each line is tested against the format's
//! heading patterns in rank order and the first match wins, so a line yields
//! at most one section. A command whose title or label wraps onto another
//! physical line is not recognised.

use crate::formats::Format;
use crate::scan::extract_brace_content;
use crate::section::Section;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static WRAPPED_COMMAND: Lazy<Regex> = Lazy::new(|| compile(r"\\[a-zA-Z]+\*?\s*\{([^{}]*)\}"));
static BARE_COMMAND: Lazy<Regex> = Lazy::new(|| compile(r"\\[a-zA-Z]+\*?"));
static ESCAPED_CHAR: Lazy<Regex> = Lazy::new(|| compile(r"\\([&%$#_~^])"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in markup pattern is valid")
}

#[must_use]
/// Reduces a markup fragment to display text.
///
/// Commands with an argument collapse to that argument, innermost first,
/// until none are left; remaining bare commands are dropped, escaped
/// characters unescaped, stray braces removed and whitespace collapsed.
pub fn clean_markup(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = WRAPPED_COMMAND.replace_all(&current, "$1").into_owned();
        if next == current {
            break;
        }
        current = next;
    }

    let unescaped = ESCAPED_CHAR.replace_all(&current, "$1");
    let stripped = BARE_COMMAND.replace_all(&unescaped, "");
    stripped
        .chars()
        .filter(|c| *c != '{' && *c != '}')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First cross-reference key on a line, if any.
fn find_label<F: Format + ?Sized>(format: &F, line: &str) -> Option<String> {
    format
        .label_pattern()
        .captures(line)
        .map(|caps| caps[1].trim().to_string())
}

#[must_use]
/// Scans `content` line by line for sectioning commands.
///
/// The returned sections are in document order with `line_start` set; they
/// are not yet numbered and carry no content. A label is taken from the
/// heading line itself, or failing that from the line immediately after it.
pub fn find_sections<F: Format + ?Sized>(content: &str, format: &F) -> Vec<Section> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut sections = Vec::new();

    for (line_no, line) in lines.iter().enumerate() {
        let Some((level, heading)) = format
            .heading_patterns()
            .iter()
            .find_map(|(level, pattern)| pattern.find(line).map(|m| (*level, m)))
        else {
            continue;
        };

        let (raw_title, _) = extract_brace_content(line, heading.end() - 1);
        let title = clean_markup(raw_title);

        let label = find_label(format, line).or_else(|| {
            lines
                .get(line_no + 1)
                .and_then(|next| find_label(format, next))
        });

        debug!("line {line_no}: {level} {title:?} label={label:?}");
        sections.push(Section::new(level, title, label, line_no));
    }

    sections
}

#[cfg(test)]
#[path = "tests/detect.rs"]
mod tests;
