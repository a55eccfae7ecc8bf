//! Heading hierarchy tracking for a single top-to-bottom document scan.

use std::collections::BTreeMap;

/// The headings currently in scope, keyed by depth (1 for `#`, 2 for `##`, ...).
///
/// Observing a heading at depth `L` drops every stored depth deeper than `L` and
/// leaves shallower ones alone. Missing intermediate depths are never synthesised:
/// with depths `{1, 3}` stored, the tag path simply joins those two labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingPath {
    levels: BTreeMap<usize, String>,
}

impl HeadingPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path after a heading of `depth` with text `label` was read.
    pub fn observe(mut self, depth: usize, label: &str) -> Self {
        self.levels.retain(|&d, _| d <= depth);
        self.levels.insert(depth, normalize_label(label));
        self
    }

    /// One cumulative `parent/child` tag per stored depth, shallowest first.
    pub fn tag_path(&self) -> Vec<String> {
        let mut tags = Vec::with_capacity(self.levels.len());
        let mut current = String::new();
        for label in self.levels.values() {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(label);
            tags.push(current.clone());
        }
        tags
    }
}

/// Lowercases and collapses every whitespace run to `_`.
pub fn normalize_label(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
