//! Include/skip pattern resolution
//!
//! Skip patterns are expanded first, exactly like include patterns, and the
//! resulting paths seed a [`SkipFilter`]. Include patterns are then expanded
//! in the order given; each candidate is kept once, the first time it is seen,
//! unless the filter rejects it. A pattern that fails to expand contributes an
//! error and no files, and never stops the remaining patterns.
//!
//! Skip patterns are walked without pruning, so `dir/...` also covers hidden
//! subtrees. Explicitly named files are compared both as spelled and as
//! located under the working directory, which lets `a/b.go` and a directory
//! pattern reaching the same file agree.

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use crate::expand::{Expander, Expansion};
use crate::filter::SkipFilter;
use crate::package::{GoPackageResolver, PackageResolver};
use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Flat resolution result
#[derive(Debug, Default)]
pub struct Resolution {
    /// Unique files in discovery order
    pub files: Vec<PathBuf>,
    /// One entry per pattern that failed to resolve
    pub errors: Vec<ResolveError>,
}

impl Resolution {
    /// Whether every pattern resolved
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Files contributed by one package directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageFiles {
    /// Directory the files live in
    pub dir: PathBuf,
    /// Unique files in discovery order
    pub files: Vec<PathBuf>,
}

/// Resolution result grouped by package directory
#[derive(Debug, Default)]
pub struct PackageResolution {
    /// Groups in the order their directories were first seen
    pub packages: Vec<PackageFiles>,
    /// One entry per pattern that failed to resolve
    pub errors: Vec<ResolveError>,
}

impl PackageResolution {
    /// Whether every pattern resolved
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Resolves include and skip patterns into source files
pub struct Resolver {
    config: ResolverConfig,
    packages: Box<dyn PackageResolver>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl Resolver {
    /// Create a resolver backed by Go-style package lookup
    pub fn new(config: ResolverConfig) -> Self {
        let packages = GoPackageResolver::new(&config);
        Self::with_package_resolver(config, packages)
    }

    /// Create a resolver with a custom package lookup
    pub fn with_package_resolver(
        config: ResolverConfig,
        packages: impl PackageResolver + 'static,
    ) -> Self {
        Self {
            config,
            packages: Box::new(packages),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve patterns into a flat list of unique files
    pub fn resolve<S: AsRef<str>>(&self, include: &[S], skip: &[S]) -> Resolution {
        let (files, errors) = self.select(include, skip);
        Resolution { files, errors }
    }

    /// Resolve patterns into files grouped by the directory that holds them
    pub fn resolve_packages<S: AsRef<str>>(&self, include: &[S], skip: &[S]) -> PackageResolution {
        let (files, errors) = self.select(include, skip);

        let mut packages: Vec<PackageFiles> = Vec::new();
        let mut index: HashMap<PathBuf, usize> = HashMap::new();
        for file in files {
            let dir = package_dir(&file);
            let slot = *index.entry(dir.clone()).or_insert_with(|| {
                packages.push(PackageFiles {
                    dir,
                    files: Vec::new(),
                });
                packages.len() - 1
            });
            packages[slot].files.push(file);
        }

        PackageResolution { packages, errors }
    }

    fn select<S: AsRef<str>>(
        &self,
        include: &[S],
        skip: &[S],
    ) -> (Vec<PathBuf>, Vec<ResolveError>) {
        let expander = Expander::new(&self.config, self.packages.as_ref());
        let mut errors = Vec::new();

        let mut skip_paths = Vec::new();
        for expansion in expand_all(&expander, skip, None, &mut errors) {
            for path in expansion.paths {
                if expansion.explicit {
                    skip_paths.push(expander.locate(&path));
                }
                skip_paths.push(path);
            }
        }
        let filter = SkipFilter::new(skip_paths);
        log::debug!("skip set holds {} path(s)", filter.len());

        let mut seen: HashSet<OsString> = HashSet::new();
        let mut files = Vec::new();
        for expansion in expand_all(&expander, include, Some(&filter), &mut errors) {
            for candidate in expansion.paths {
                if seen.contains(candidate.as_os_str()) {
                    continue;
                }
                // Named files may be spelled relative to the working directory
                let rejected = if expansion.explicit {
                    filter.is_listed(&candidate) || filter.is_listed(&expander.locate(&candidate))
                } else {
                    filter.should_skip(&candidate)
                };
                if rejected {
                    log::trace!("skipping {}", candidate.display());
                    continue;
                }
                seen.insert(candidate.as_os_str().to_os_string());
                files.push(candidate);
            }
        }

        (files, errors)
    }
}

fn expand_all<S: AsRef<str>>(
    expander: &Expander<'_>,
    patterns: &[S],
    prune: Option<&SkipFilter>,
    errors: &mut Vec<ResolveError>,
) -> Vec<Expansion> {
    let mut expansions = Vec::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        let expanded = match prune {
            Some(filter) => expander.expand(pattern, filter),
            None => expander.expand_unpruned(pattern),
        };
        match expanded {
            Ok(expansion) => expansions.push(expansion),
            Err(source) => {
                log::debug!("cannot resolve {pattern:?}: {source}");
                errors.push(ResolveError::Unresolvable {
                    pattern: pattern.to_string(),
                    source,
                });
            }
        }
    }
    expansions
}

fn package_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Resolve patterns with the default configuration
///
/// ```no_run
/// let resolution = dots_core::resolve(&["./...", "cmd/tool/main.go"], &["vendor/..."]);
/// for file in &resolution.files {
///     println!("{}", file.display());
/// }
/// for error in &resolution.errors {
///     eprintln!("{error}");
/// }
/// ```
pub fn resolve<S: AsRef<str>>(include: &[S], skip: &[S]) -> Resolution {
    Resolver::default().resolve(include, skip)
}

/// Resolve patterns with the default configuration, grouped by package directory
pub fn resolve_packages<S: AsRef<str>>(include: &[S], skip: &[S]) -> PackageResolution {
    Resolver::default().resolve_packages(include, skip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PackageError;
    use crate::package::Package;

    struct NoPackages;

    impl PackageResolver for NoPackages {
        fn import(&self, id: &str) -> Result<Package, PackageError> {
            Err(PackageError::NotFound { id: id.to_string() })
        }
    }

    #[test]
    fn test_empty_input() {
        let resolver = Resolver::with_package_resolver(ResolverConfig::default(), NoPackages);
        let resolution = resolver.resolve::<&str>(&[], &[]);

        assert!(resolution.files.is_empty());
        assert!(resolution.is_complete());
    }

    #[test]
    fn test_errors_from_both_lists() {
        let resolver = Resolver::with_package_resolver(ResolverConfig::default(), NoPackages);
        let resolution = resolver.resolve(&["./no-such-include"], &["./no-such-skip"]);

        let patterns: Vec<&str> = resolution.errors.iter().map(|e| e.pattern()).collect();
        assert_eq!(patterns, vec!["./no-such-skip", "./no-such-include"]);
    }

    #[test]
    fn test_package_dir() {
        assert_eq!(package_dir(Path::new("a/b/c.go")), PathBuf::from("a/b"));
        assert_eq!(package_dir(Path::new("c.go")), PathBuf::from("."));
    }
}
