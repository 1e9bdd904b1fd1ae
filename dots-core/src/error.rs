//! Layered error types
//!
//! Package lookup failures ([`PackageError`]) are wrapped by expansion
//! failures ([`ExpandError`]), which are in turn attributed to the pattern
//! that produced them ([`ResolveError`]).

use std::path::PathBuf;
use thiserror::Error;

/// Package resolution errors
#[derive(Error, Debug)]
pub enum PackageError {
    /// No directory matched the identifier
    #[error("cannot find package \"{id}\"")]
    NotFound {
        /// The package identifier that was looked up
        id: String,
    },

    /// The package directory or one of its files could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The directory or file being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A package reached through the import graph failed to resolve
    #[error("imported package \"{id}\": {source}")]
    Transitive {
        /// The imported package identifier
        id: String,
        /// Why the imported package failed
        #[source]
        source: Box<PackageError>,
    },
}

/// Errors raised while expanding a single pattern
#[derive(Error, Debug)]
pub enum ExpandError {
    /// Directory traversal failed part way through
    #[error("walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    /// Listing a directory failed
    #[error("cannot list {}: {source}", path.display())]
    Io {
        /// Directory being listed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Package lookup failed
    #[error(transparent)]
    Package(#[from] PackageError),
}

/// A pattern that could not be resolved
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Expansion of the pattern failed
    #[error("unable to resolve \"{pattern}\": {source}")]
    Unresolvable {
        /// The offending pattern, as supplied
        pattern: String,
        /// Why expansion failed
        #[source]
        source: ExpandError,
    },
}

impl ResolveError {
    /// The pattern this error is attributed to
    pub fn pattern(&self) -> &str {
        match self {
            ResolveError::Unresolvable { pattern, .. } => pattern,
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("cannot read configuration {}: {source}", path.display())]
    Io {
        /// Configuration file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema
    #[error("invalid configuration {}: {source}", path.display())]
    Parse {
        /// Configuration file path
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },
}

/// Result type for expansion
pub type Result<T> = std::result::Result<T, ExpandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolvable_display_names_pattern() {
        let error = ResolveError::Unresolvable {
            pattern: "./missing-dir".to_string(),
            source: ExpandError::Package(PackageError::NotFound {
                id: "./missing-dir".to_string(),
            }),
        };

        assert_eq!(
            error.to_string(),
            "unable to resolve \"./missing-dir\": cannot find package \"./missing-dir\""
        );
        assert_eq!(error.pattern(), "./missing-dir");
    }

    #[test]
    fn test_transitive_display_chains_ids() {
        let error = PackageError::Transitive {
            id: "example.com/m/a".to_string(),
            source: Box::new(PackageError::NotFound {
                id: "example.com/m/a".to_string(),
            }),
        };

        assert!(error.to_string().starts_with("imported package \"example.com/m/a\""));
        assert!(error.to_string().contains("cannot find package"));
    }

    #[test]
    fn test_io_error_display() {
        let error = ExpandError::Io {
            path: PathBuf::from("some/dir"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(error.to_string(), "cannot list some/dir: denied");
    }
}
