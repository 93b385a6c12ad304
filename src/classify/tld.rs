//! Standard TLD allow-list.
//!
//! The list is built once and shared immutably; there is no API to add or
//! remove labels after construction.

use super::url::ParsedUrl;
use std::collections::HashSet;

/// Compiled-in table of delegated root-zone labels, one per line.
const STANDARD_TLDS: &str = include_str!("standard_tlds.txt");

/// Immutable set of TLD labels that resolve through conventional DNS.
///
/// Lookups are exact and case-sensitive: labels are matched byte-for-byte
/// against the table as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldAllowList {
    labels: HashSet<Box<str>>,
}

impl TldAllowList {
    /// Build the list from the compiled-in root-zone table.
    pub fn standard() -> Self {
        Self::from_lines(STANDARD_TLDS)
    }

    /// Build a list from text with one label per line.
    ///
    /// Surrounding whitespace is trimmed; blank lines and lines starting
    /// with `#` are skipped.
    pub fn from_lines(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Exact membership test for a single label.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Whether the URL's TLD is a standard one.
    pub fn is_standard(&self, parsed: &ParsedUrl) -> bool {
        self.contains(parsed.tld())
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<S: Into<Box<str>>> FromIterator<S> for TldAllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}
