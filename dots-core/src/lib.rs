//! Source file discovery for analysis tools
//!
//! This crate turns user-supplied patterns into the exact list of source
//! files an analyzer should look at. A pattern may be:
//!
//! - a single file, returned as-is;
//! - a directory, contributing its immediate source files;
//! - a directory followed by `/...`, contributing every source file below it;
//! - a package identifier such as `example.com/project/cmd`, resolved through
//!   a [`PackageResolver`]; with `/...` its in-tree imports are followed too.
//!
//! Directory and package results are clean absolute paths; an explicitly
//! named file keeps the spelling it was given.
//!
//! Skip patterns go through the same expansion and then exclude candidates by
//! full path or by basename. Entries whose name starts with `.` or `_` are
//! hidden unless named explicitly.
//!
//! # Example
//!
//! ```rust
//! use dots_core::{Resolver, ResolverConfig};
//! use std::fs;
//!
//! let dir = tempfile::tempdir().unwrap();
//! fs::create_dir_all(dir.path().join("pkg/internal")).unwrap();
//! fs::write(dir.path().join("pkg/a.go"), "package pkg\n").unwrap();
//! fs::write(dir.path().join("pkg/internal/b.go"), "package internal\n").unwrap();
//! fs::write(dir.path().join("pkg/_gen.go"), "package pkg\n").unwrap();
//!
//! let pattern = format!("{}/pkg/...", dir.path().display());
//! let resolver = Resolver::new(ResolverConfig::default());
//! let resolution = resolver.resolve(&[pattern.as_str()], &[]);
//!
//! assert_eq!(resolution.files.len(), 2);
//! assert!(resolution.errors.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod expand;
pub mod filter;
pub mod package;
pub mod paths;
pub mod pattern;
pub mod resolver;

pub use config::{BuildContext, ResolverConfig};
pub use error::{ConfigError, ExpandError, PackageError, ResolveError};
pub use expand::Expander;
pub use filter::SkipFilter;
pub use package::{GoPackageResolver, Package, PackageResolver};
pub use pattern::{Pattern, RECURSIVE_MARKER};
pub use resolver::{
    resolve, resolve_packages, PackageFiles, PackageResolution, Resolution, Resolver,
};
