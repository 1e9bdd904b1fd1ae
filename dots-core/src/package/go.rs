//! Go-style package lookup
//!
//! Identifiers are looked up, in order, as a local path, inside the enclosing
//! module (and its `vendor/` tree), in every GOPATH entry, and in GOROOT.

use super::source::scan_header;
use super::{Package, PackageResolver};
use crate::config::{BuildContext, ResolverConfig};
use crate::error::PackageError;
use crate::filter::is_hidden;
use crate::paths;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Module declared by the nearest `go.mod`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Module path from the `module` directive
    pub path: String,
    /// Directory holding `go.mod`
    pub root: PathBuf,
}

impl Module {
    /// Find the module enclosing `dir`, searching upwards
    pub fn find(dir: &Path) -> Option<Self> {
        dir.ancestors().find_map(|candidate| {
            let content = fs::read_to_string(candidate.join("go.mod")).ok()?;
            let path = parse_module_path(&content)?;
            Some(Self {
                path,
                root: candidate.to_path_buf(),
            })
        })
    }
}

fn parse_module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with([' ', '\t', '"']) {
            return None;
        }
        let rest = rest.split("//").next().unwrap_or(rest);
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Package resolver following Go workspace conventions
#[derive(Debug, Clone)]
pub struct GoPackageResolver {
    working_dir: PathBuf,
    build: BuildContext,
    module: Option<Module>,
    gopath: Vec<PathBuf>,
    goroot: Option<PathBuf>,
}

impl GoPackageResolver {
    /// Create a resolver from configuration and the `GOPATH`/`GOROOT` environment
    pub fn new(config: &ResolverConfig) -> Self {
        let working_dir = config.working_dir();
        Self {
            module: Module::find(&working_dir),
            working_dir,
            build: config.build.clone(),
            gopath: gopath_from_env(),
            goroot: std::env::var_os("GOROOT")
                .filter(|root| !root.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Replace the GOPATH entries
    pub fn with_gopath(mut self, gopath: Vec<PathBuf>) -> Self {
        self.gopath = gopath;
        self
    }

    /// Replace the GOROOT directory
    pub fn with_goroot(mut self, goroot: Option<PathBuf>) -> Self {
        self.goroot = goroot;
        self
    }

    /// The enclosing module, if any
    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    /// Locate the directory for a package identifier, as a clean absolute path
    pub fn find_dir(&self, id: &str) -> Option<PathBuf> {
        if is_local(id) {
            let dir = paths::absolute(Path::new(id), &self.working_dir);
            return dir.is_dir().then_some(dir);
        }

        let mut candidates = Vec::new();
        if let Some(module) = &self.module {
            if id == module.path {
                candidates.push(module.root.clone());
            } else if let Some(rest) = id.strip_prefix(&format!("{}/", module.path)) {
                candidates.push(module.root.join(rest));
            }
            candidates.push(module.root.join("vendor").join(id));
        }
        candidates.extend(self.gopath.iter().map(|entry| entry.join("src").join(id)));
        candidates.extend(self.goroot.iter().map(|root| root.join("src").join(id)));

        candidates
            .into_iter()
            .map(|dir| paths::absolute(&dir, &self.working_dir))
            .find(|dir| dir.is_dir())
    }

    fn load(&self, id: &str, dir: PathBuf) -> Result<Package, PackageError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&dir).map_err(io_error(&dir))? {
            let entry = entry.map_err(io_error(&dir))?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.ends_with(".go") && !is_hidden(OsStr::new(&name)) && entry.path().is_file() {
                names.push(name);
            }
        }
        names.sort();

        let mut package = Package {
            id: id.to_string(),
            dir,
            ..Package::default()
        };
        let mut imports = BTreeSet::new();

        for name in names {
            if !self.build.matches_file_name(&name) {
                log::trace!("{id}: {name} excluded by file name");
                continue;
            }
            let path = package.dir.join(&name);
            let src = fs::read_to_string(&path).map_err(io_error(&path))?;
            let header = scan_header(&src);
            if let Some(expr) = &header.build_constraint {
                if !self.build.matches_expr(expr) {
                    log::trace!("{id}: {name} excluded by constraint {expr:?}");
                    continue;
                }
            }

            if name.ends_with("_test.go") {
                if !header.package.ends_with("_test") {
                    package.test_go_files.push(name);
                }
                continue;
            }

            let uses_cgo = header.imports.iter().any(|import| import == "C");
            if uses_cgo && !self.build.cgo_enabled {
                continue;
            }
            imports.extend(header.imports.into_iter().filter(|import| import != "C"));
            if uses_cgo {
                package.cgo_files.push(name);
            } else {
                package.go_files.push(name);
            }
        }

        package.imports = imports.into_iter().collect();
        if package.is_empty() {
            log::debug!("package {id} has no buildable source files");
        }
        Ok(package)
    }
}

impl PackageResolver for GoPackageResolver {
    fn import(&self, id: &str) -> Result<Package, PackageError> {
        let dir = self.find_dir(id).ok_or_else(|| PackageError::NotFound {
            id: id.to_string(),
        })?;
        log::debug!("package {id} found in {}", dir.display());
        self.load(id, dir)
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PackageError {
    let path = path.to_path_buf();
    move |source| PackageError::Io { path, source }
}

fn is_local(id: &str) -> bool {
    id == "."
        || id == ".."
        || id.starts_with("./")
        || id.starts_with("../")
        || Path::new(id).is_absolute()
}

fn gopath_from_env() -> Vec<PathBuf> {
    match std::env::var_os("GOPATH") {
        Some(gopath) if !gopath.is_empty() => std::env::split_paths(&gopath)
            .filter(|entry| entry.is_absolute())
            .collect(),
        _ => std::env::var_os("HOME")
            .map(|home| vec![PathBuf::from(home).join("go")])
            .unwrap_or_default(),
    }
}
