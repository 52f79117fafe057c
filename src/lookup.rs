//! Resolving a reader's query to one written segment.

use crate::writer::{Manifest, ManifestEntry};
use thiserror::Error;

/// Maximum number of file names listed when a query matches nothing.
const AVAILABLE_SHOWN: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
/// A query that did not pick out exactly one segment.
pub enum LookupError {
    /// Nothing in the manifest matched.
    #[error("no section matches '{query}' (available: {})", available.join(", "))]
    NotFound {
        /// The query as given.
        query: String,
        /// The first few segment file names, for the error message.
        available: Vec<String>,
    },
    /// More than one title or file name matched.
    #[error("'{query}' matches several sections: {}", matches.join(", "))]
    Ambiguous {
        /// The query as given.
        query: String,
        /// File names of every match.
        matches: Vec<String>,
    },
}

/// Finds the manifest entry `query` refers to.
///
/// A query of only digits selects the segment with that emission index.
/// Anything else is tried as an exact label first, then as a
/// case-insensitive substring of the title or file name.
///
/// # Errors
///
/// Returns [`LookupError::NotFound`] when nothing matches and
/// [`LookupError::Ambiguous`] when a substring query matches several segments.
pub fn resolve<'m>(manifest: &'m Manifest, query: &str) -> Result<&'m ManifestEntry, LookupError> {
    let query = query.trim();
    let not_found = || LookupError::NotFound {
        query: query.to_string(),
        available: manifest
            .sections
            .iter()
            .take(AVAILABLE_SHOWN)
            .map(|e| e.file.clone())
            .collect(),
    };

    if !query.is_empty() && query.bytes().all(|b| b.is_ascii_digit()) {
        let index: usize = query.parse().map_err(|_| not_found())?;
        return manifest
            .sections
            .iter()
            .find(|e| e.index == index)
            .ok_or_else(not_found);
    }

    if let Some(entry) = manifest
        .sections
        .iter()
        .find(|e| e.label.as_deref() == Some(query))
    {
        return Ok(entry);
    }

    let needle = query.to_lowercase();
    let matches: Vec<&ManifestEntry> = manifest
        .sections
        .iter()
        .filter(|e| {
            e.title.to_lowercase().contains(&needle) || e.file.to_lowercase().contains(&needle)
        })
        .collect();

    match matches.as_slice() {
        [] => Err(not_found()),
        [entry] => Ok(*entry),
        _ => Err(LookupError::Ambiguous {
            query: query.to_string(),
            matches: matches.iter().map(|e| e.file.clone()).collect(),
        }),
    }
}

#[cfg(test)]
#[path = "tests/lookup.rs"]
mod tests;
