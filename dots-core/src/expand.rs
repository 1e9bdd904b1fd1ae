//! Pattern expansion
//!
//! Turns one pattern into the concrete file paths it names. Directories are
//! listed (or walked when the pattern carries the recursive marker), existing
//! files are returned verbatim, and anything else is resolved as a package.
//! Relative bases are located under the configured working directory, and
//! directory results are always clean absolute paths.

use crate::config::ResolverConfig;
use crate::error::{ExpandError, PackageError, Result};
use crate::filter::SkipFilter;
use crate::package::{is_within, Package, PackageResolver};
use crate::paths;
use crate::pattern::Pattern;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Paths produced by one pattern
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Concrete paths in discovery order
    pub paths: Vec<PathBuf>,
    /// Whether the pattern named a single existing file
    ///
    /// Explicitly named files are exempt from the hidden-entry convention.
    pub explicit: bool,
}

/// Expands patterns against the filesystem and a package resolver
pub struct Expander<'a> {
    config: &'a ResolverConfig,
    packages: &'a dyn PackageResolver,
    working_dir: PathBuf,
}

impl<'a> Expander<'a> {
    /// Create an expander
    pub fn new(config: &'a ResolverConfig, packages: &'a dyn PackageResolver) -> Self {
        Self {
            config,
            packages,
            working_dir: config.working_dir(),
        }
    }

    /// Expand one pattern
    ///
    /// `filter` is only used to prune directories during recursive walks;
    /// candidates are not filtered here.
    pub fn expand(&self, raw: &str, filter: &SkipFilter) -> Result<Expansion> {
        self.expand_with(raw, Some(filter))
    }

    /// Expand one pattern without pruning any directory
    ///
    /// Used for skip patterns: `dir/...` must cover hidden subtrees too.
    pub fn expand_unpruned(&self, raw: &str) -> Result<Expansion> {
        self.expand_with(raw, None)
    }

    /// `path` as a clean absolute path under the working directory
    pub fn locate(&self, path: &Path) -> PathBuf {
        paths::absolute(path, &self.working_dir)
    }

    fn expand_with(&self, raw: &str, prune: Option<&SkipFilter>) -> Result<Expansion> {
        let pattern = Pattern::parse(raw);
        let base = Path::new(pattern.base);
        let located = self.locate(base);

        let expansion = match fs::metadata(&located) {
            Ok(meta) if meta.is_dir() => Expansion {
                paths: if pattern.recursive {
                    self.walk_tree(&located, prune)?
                } else {
                    self.list_dir(&located)?
                },
                explicit: false,
            },
            Ok(_) => Expansion {
                paths: vec![base.to_path_buf()],
                explicit: true,
            },
            Err(_) => Expansion {
                paths: self.expand_package(pattern.base, pattern.recursive)?,
                explicit: false,
            },
        };

        log::debug!(
            "pattern {raw:?} expanded to {} file(s)",
            expansion.paths.len()
        );
        Ok(expansion)
    }

    fn is_source(&self, path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().ends_with(&self.config.source_suffix))
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let io_error = |source| ExpandError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut entries = fs::read_dir(dir)
            .map_err(io_error)?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(io_error)?;
        entries.sort_by_key(|entry| entry.file_name());

        Ok(entries
            .into_iter()
            .map(|entry| dir.join(entry.file_name()))
            .filter(|path| path.is_file() && self.is_source(path))
            .collect())
    }

    fn walk_tree(&self, root: &Path, prune: Option<&SkipFilter>) -> Result<Vec<PathBuf>> {
        let keep = |entry: &DirEntry| {
            let Some(filter) = prune else {
                return true;
            };
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let pruned = filter.should_skip(entry.path());
            if pruned {
                log::trace!("pruning {}", entry.path().display());
            }
            !pruned
        };

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(keep)
        {
            let entry = entry?;
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if is_file && self.is_source(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn expand_package(&self, id: &str, recursive: bool) -> Result<Vec<PathBuf>> {
        let root = self.packages.import(id)?;
        let mut files = self.package_paths(&root);

        if recursive {
            let mut visited = HashSet::from([id.to_string()]);
            self.collect_imports(id, &root, &mut visited, &mut files)?;
        }
        Ok(files)
    }

    fn package_paths(&self, package: &Package) -> Vec<PathBuf> {
        package
            .source_paths()
            .iter()
            .map(|path| self.locate(path))
            .collect()
    }

    /// Depth-first walk of the imports of `package` that lie under `root_id`
    fn collect_imports(
        &self,
        root_id: &str,
        package: &Package,
        visited: &mut HashSet<String>,
        files: &mut Vec<PathBuf>,
    ) -> std::result::Result<(), PackageError> {
        for import in &package.imports {
            if !is_within(root_id, import) || !visited.insert(import.clone()) {
                continue;
            }
            let dependency =
                self.packages
                    .import(import)
                    .map_err(|source| PackageError::Transitive {
                        id: import.clone(),
                        source: Box::new(source),
                    })?;
            files.extend(self.package_paths(&dependency));
            self.collect_imports(root_id, &dependency, visited, files)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    /// In-memory package graph
    #[derive(Default)]
    struct Graph {
        packages: HashMap<String, Package>,
    }

    impl Graph {
        fn add(&mut self, id: &str, files: &[&str], imports: &[&str]) {
            self.packages.insert(
                id.to_string(),
                Package {
                    id: id.to_string(),
                    dir: PathBuf::from("/src").join(id),
                    go_files: files.iter().map(|f| f.to_string()).collect(),
                    imports: imports.iter().map(|i| i.to_string()).collect(),
                    ..Package::default()
                },
            );
        }
    }

    impl PackageResolver for Graph {
        fn import(&self, id: &str) -> std::result::Result<Package, PackageError> {
            self.packages
                .get(id)
                .cloned()
                .ok_or_else(|| PackageError::NotFound { id: id.to_string() })
        }
    }

    fn tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for file in [
            "top.go",
            "notes.txt",
            "a/a.go",
            "a/deep/d.go",
            "b/b.go",
            ".git/hooks.go",
            "_build/gen.go",
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "package x\n").unwrap();
        }
        fs::create_dir_all(root.join("dir.go")).unwrap();
        temp_dir
    }

    #[test]
    fn test_non_recursive_directory() {
        let temp_dir = tree();
        let config = ResolverConfig::default();
        let graph = Graph::default();
        let expander = Expander::new(&config, &graph);

        let files = expander
            .expand(temp_dir.path().to_str().unwrap(), &SkipFilter::hidden_only())
            .unwrap()
            .paths;
        assert_eq!(files, vec![temp_dir.path().join("top.go")]);
    }

    #[test]
    fn test_recursive_directory_prunes_hidden() {
        let temp_dir = tree();
        let config = ResolverConfig::default();
        let graph = Graph::default();
        let expander = Expander::new(&config, &graph);

        let pattern = format!("{}/...", temp_dir.path().display());
        let files = expander
            .expand(&pattern, &SkipFilter::hidden_only())
            .unwrap()
            .paths;
        let root = temp_dir.path();
        assert_eq!(
            files,
            vec![
                root.join("a/a.go"),
                root.join("a/deep/d.go"),
                root.join("b/b.go"),
                root.join("top.go"),
            ]
        );
    }

    #[test]
    fn test_recursive_directory_prunes_skipped_dir_name() {
        let temp_dir = tree();
        let config = ResolverConfig::default();
        let graph = Graph::default();
        let expander = Expander::new(&config, &graph);

        let pattern = format!("{}/...", temp_dir.path().display());
        let files = expander
            .expand(&pattern, &SkipFilter::new(["a"]))
            .unwrap()
            .paths;
        assert!(files.iter().all(|f| !f.starts_with(temp_dir.path().join("a"))));
        assert!(files.contains(&temp_dir.path().join("b/b.go")));
    }

    #[test]
    fn test_relative_bases_are_located_under_working_dir() {
        let temp_dir = tree();
        let config = ResolverConfig {
            working_dir: Some(temp_dir.path().to_path_buf()),
            ..ResolverConfig::default()
        };
        let graph = Graph::default();
        let expander = Expander::new(&config, &graph);
        let root = temp_dir.path();

        for spelling in ["a/...", "./a/...", "a//...", "a/./...", "b/../a/..."] {
            let files = expander
                .expand(spelling, &SkipFilter::hidden_only())
                .unwrap()
                .paths;
            assert_eq!(files, vec![root.join("a/a.go"), root.join("a/deep/d.go")], "{spelling}");
        }
        for spelling in [".", "./"] {
            let files = expander
                .expand(spelling, &SkipFilter::hidden_only())
                .unwrap()
                .paths;
            assert_eq!(files, vec![root.join("top.go")], "{spelling:?}");
        }
    }

    #[test]
    fn test_unpruned_walk_enters_hidden_directories() {
        let temp_dir = tree();
        let config = ResolverConfig::default();
        let graph = Graph::default();
        let expander = Expander::new(&config, &graph);
        let root = temp_dir.path();

        let pattern = format!("{}/...", root.display());
        let files = expander.expand_unpruned(&pattern).unwrap().paths;
        assert!(files.contains(&root.join(".git/hooks.go")));
        assert!(files.contains(&root.join("_build/gen.go")));
        assert!(files.contains(&root.join("top.go")));
    }

    #[test]
    fn test_package_paths_are_clean() {
        let mut graph = Graph::default();
        graph.packages.insert(
            "example.com/m".to_string(),
            Package {
                id: "example.com/m".to_string(),
                dir: PathBuf::from("/src/./example.com//m/"),
                go_files: vec!["m.go".to_string()],
                ..Package::default()
            },
        );
        let config = ResolverConfig::default();
        let expander = Expander::new(&config, &graph);

        let files = expander
            .expand("example.com/m", &SkipFilter::hidden_only())
            .unwrap()
            .paths;
        assert_eq!(files, vec![PathBuf::from("/src/example.com/m/m.go")]);
    }

    #[test]
    fn test_explicit_file_is_verbatim() {
        let temp_dir = tree();
        let config = ResolverConfig::default();
        let graph = Graph::default();
        let expander = Expander::new(&config, &graph);

        let hidden = temp_dir.path().join(".git/hooks.go");
        let expansion = expander
            .expand(hidden.to_str().unwrap(), &SkipFilter::hidden_only())
            .unwrap();
        assert!(expansion.explicit);
        assert_eq!(expansion.paths, vec![hidden]);

        let text = temp_dir.path().join("notes.txt");
        let files = expander
            .expand(text.to_str().unwrap(), &SkipFilter::hidden_only())
            .unwrap()
            .paths;
        assert_eq!(files, vec![text]);
    }

    #[test]
    fn test_custom_suffix() {
        let temp_dir = tree();
        let config = ResolverConfig {
            source_suffix: ".txt".to_string(),
            ..ResolverConfig::default()
        };
        let graph = Graph::default();
        let expander = Expander::new(&config, &graph);

        let files = expander
            .expand(temp_dir.path().to_str().unwrap(), &SkipFilter::hidden_only())
            .unwrap()
            .paths;
        assert_eq!(files, vec![temp_dir.path().join("notes.txt")]);
    }

    #[test]
    fn test_package_without_recursion() {
        let mut graph = Graph::default();
        graph.add("example.com/m", &["m.go"], &["example.com/m/sub"]);
        graph.add("example.com/m/sub", &["sub.go"], &[]);
        let config = ResolverConfig::default();
        let expander = Expander::new(&config, &graph);

        let files = expander
            .expand("example.com/m", &SkipFilter::hidden_only())
            .unwrap()
            .paths;
        assert_eq!(files, vec![PathBuf::from("/src/example.com/m/m.go")]);
    }

    #[test]
    fn test_package_transitive_imports_visited_once() {
        let mut graph = Graph::default();
        graph.add(
            "example.com/m",
            &["m.go"],
            &["example.com/m/a", "example.com/m/b", "fmt"],
        );
        graph.add("example.com/m/a", &["a.go"], &["example.com/m/shared"]);
        graph.add("example.com/m/b", &["b.go"], &["example.com/m/shared", "example.com/m"]);
        graph.add("example.com/m/shared", &["shared.go"], &[]);
        let config = ResolverConfig::default();
        let expander = Expander::new(&config, &graph);

        let files = expander
            .expand("example.com/m/...", &SkipFilter::hidden_only())
            .unwrap()
            .paths;
        assert_eq!(
            files,
            vec![
                PathBuf::from("/src/example.com/m/m.go"),
                PathBuf::from("/src/example.com/m/a/a.go"),
                PathBuf::from("/src/example.com/m/shared/shared.go"),
                PathBuf::from("/src/example.com/m/b/b.go"),
            ]
        );
    }

    #[test]
    fn test_transitive_failure_propagates() {
        let mut graph = Graph::default();
        graph.add("example.com/m", &["m.go"], &["example.com/m/gone"]);
        let config = ResolverConfig::default();
        let expander = Expander::new(&config, &graph);

        let err = expander
            .expand("example.com/m/...", &SkipFilter::hidden_only())
            .unwrap_err();
        assert!(err.to_string().contains("example.com/m/gone"));
    }

    #[test]
    fn test_unknown_package() {
        let graph = Graph::default();
        let config = ResolverConfig::default();
        let expander = Expander::new(&config, &graph);

        let err = expander
            .expand("./missing-dir", &SkipFilter::hidden_only())
            .unwrap_err();
        assert!(err.to_string().contains("./missing-dir"));
    }
}
