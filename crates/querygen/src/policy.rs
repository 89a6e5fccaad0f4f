//! Field selection policy.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default bound on nested selection depth.
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Controls which fields the generator emits and how deep it descends.
///
/// - `ignore`: field names never emitted, at any level.
/// - `only`: field names emitted even when they are also in `ignore`.
///   This is an override, not an allow-list: fields in neither set are
///   emitted too.
/// - `max_depth`: object fields are not expanded once this many levels of
///   nesting have been opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionPolicy {
    pub ignore: HashSet<String>,
    pub only: HashSet<String>,
    pub max_depth: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            ignore: HashSet::new(),
            only: HashSet::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SelectionPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ignore<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_only<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only.extend(fields.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether `field` is kept out of generated selections.
    #[must_use]
    pub fn is_excluded(&self, field: &str) -> bool {
        self.ignore.contains(field) && !self.only.contains(field)
    }

    /// Whether object fields at `depth` may still be expanded.
    #[must_use]
    pub const fn can_descend(&self, depth: usize) -> bool {
        depth < self.max_depth
    }
}
