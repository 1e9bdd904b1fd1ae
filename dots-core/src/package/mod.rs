//! Package resolution
//!
//! Patterns that are neither an existing directory nor an existing file are
//! treated as package identifiers. A [`PackageResolver`] maps an identifier
//! to the package's directory, its source file lists and its imports.

pub mod constraint;
pub mod go;
pub mod source;

use crate::error::PackageError;
use std::path::PathBuf;

pub use go::GoPackageResolver;

/// A resolved package and its source manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    /// Identifier the package was resolved from
    pub id: String,
    /// Directory containing the package sources
    pub dir: PathBuf,
    /// Buildable source files, relative to `dir`
    pub go_files: Vec<String>,
    /// Source files that need the native preprocessing step, relative to `dir`
    pub cgo_files: Vec<String>,
    /// In-package test files, relative to `dir`
    pub test_go_files: Vec<String>,
    /// Identifiers imported by the buildable files, sorted and unique
    pub imports: Vec<String>,
}

impl Package {
    /// Buildable, cgo and test files joined with the package directory
    pub fn source_paths(&self) -> Vec<PathBuf> {
        self.go_files
            .iter()
            .chain(&self.cgo_files)
            .chain(&self.test_go_files)
            .map(|name| self.dir.join(name))
            .collect()
    }

    /// Whether the package has no buildable source at all
    pub fn is_empty(&self) -> bool {
        self.go_files.is_empty() && self.cgo_files.is_empty() && self.test_go_files.is_empty()
    }
}

/// Maps package identifiers to on-disk packages
pub trait PackageResolver {
    /// Resolve `id` to a package
    ///
    /// A package directory without buildable sources is returned as an empty
    /// [`Package`], not as an error.
    fn import(&self, id: &str) -> Result<Package, PackageError>;
}

/// Whether `id` lies under the identifier `root`
pub fn is_within(root: &str, id: &str) -> bool {
    id.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
