//! Skip filter
//!
//! A [`SkipFilter`] is built once from the expanded skip patterns and then
//! consulted for every candidate path. A candidate is skipped when its full
//! path or its basename appears in the skip set, or when its basename follows
//! the hidden/generated naming convention (leading `.` or `_`).

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path};

/// Exclusion predicate over candidate paths
#[derive(Debug, Clone, Default)]
pub struct SkipFilter {
    skipped: HashSet<OsString>,
}

impl SkipFilter {
    /// Build a filter from concrete skip paths
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            skipped: paths
                .into_iter()
                .map(|p| p.as_ref().as_os_str().to_os_string())
                .collect(),
        }
    }

    /// A filter that only applies the hidden-entry convention
    pub fn hidden_only() -> Self {
        Self::default()
    }

    /// Number of distinct skip paths
    pub fn len(&self) -> usize {
        self.skipped.len()
    }

    /// Whether the explicit skip set is empty
    pub fn is_empty(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Whether `path` or its basename is in the explicit skip set
    pub fn is_listed(&self, path: &Path) -> bool {
        self.skipped.contains(base_name(path)) || self.skipped.contains(path.as_os_str())
    }

    /// Decide whether `path` must be excluded
    pub fn should_skip(&self, path: &Path) -> bool {
        self.is_listed(path) || is_hidden(base_name(path))
    }
}

/// Last element of `path`, with the conventions of `filepath.Base`-style helpers:
/// trailing separators are ignored and an empty path yields `.`
pub fn base_name(path: &Path) -> &OsStr {
    match path.components().next_back() {
        Some(Component::Normal(name)) => name,
        Some(Component::ParentDir) => OsStr::new(".."),
        Some(Component::RootDir) => OsStr::new("/"),
        Some(Component::Prefix(prefix)) => prefix.as_os_str(),
        Some(Component::CurDir) | None => OsStr::new("."),
    }
}

/// Whether a basename marks a hidden or generated entry
pub fn is_hidden(base: &OsStr) -> bool {
    if base == "." || base == ".." {
        return false;
    }
    base.to_string_lossy().starts_with(['.', '_'])
}
