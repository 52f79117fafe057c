//! Balanced brace extraction.
//!
//! LaTeX arguments nest freely (`\section{A \textbf{B} C}`), so a regex that
//! stops at the first `}` truncates them. Scanning with a depth counter gives
//! the exact argument instead.

/// Returns the content of the first `{...}` group at or after `start`, and
/// the byte offset just past its closing brace.
///
/// Nested groups are skipped by depth counting. When the group is never
/// closed the remainder of `text` after the opening brace is returned along
/// with `text.len()`: a truncated title is preferred over a failed run. When
/// there is no opening brace at all the content is empty.
#[must_use]
pub fn extract_brace_content(text: &str, start: usize) -> (&str, usize) {
    let Some(tail) = text.get(start..) else {
        return ("", text.len());
    };

    let mut depth = 0usize;
    let mut content_start = None;

    for (i, c) in tail.char_indices() {
        let pos = start + i;
        match c {
            '{' => {
                if depth == 0 {
                    content_start = Some(pos + 1);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(begin) = content_start {
                        return (&text[begin..pos], pos + 1);
                    }
                }
            }
            _ => {}
        }
    }

    match content_start {
        Some(begin) => (&text[begin..], text.len()),
        None => ("", text.len()),
    }
}

#[cfg(test)]
#[path = "tests/scan.rs"]
mod tests;
