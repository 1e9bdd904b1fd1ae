//! Resolver configuration
//!
//! Every field has a default, so an empty TOML file is a valid configuration.

use crate::error::ConfigError;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix identifying source files during directory traversal
pub const DEFAULT_SOURCE_SUFFIX: &str = ".go";

/// Top-level resolver configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// File name suffix collected when walking directories
    pub source_suffix: String,

    /// Directory relative patterns and package identifiers are resolved from
    /// (None = process cwd)
    pub working_dir: Option<PathBuf>,

    /// Build context used to select package files
    pub build: BuildContext,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
            working_dir: None,
            build: BuildContext::default(),
        }
    }
}

impl ResolverConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The absolute directory relative patterns and package lookups start from
    pub fn working_dir(&self) -> PathBuf {
        let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match &self.working_dir {
            Some(dir) if dir.is_absolute() => paths::clean(dir),
            Some(dir) => paths::absolute(dir, &cwd()),
            None => cwd(),
        }
    }
}

/// Target platform and tags for evaluating build constraints
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildContext {
    /// Target operating system, in Go naming (`linux`, `darwin`, ...)
    pub goos: String,
    /// Target architecture, in Go naming (`amd64`, `arm64`, ...)
    pub goarch: String,
    /// Whether files importing "C" are part of the build
    pub cgo_enabled: bool,
    /// Additional satisfied build tags
    pub tags: Vec<String>,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self {
            goos: host_goos().to_string(),
            goarch: host_goarch().to_string(),
            cgo_enabled: true,
            tags: Vec::new(),
        }
    }
}

/// Operating systems the `unix` build tag applies to
pub const UNIX_GOOS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Every GOOS value recognized in file name suffixes
pub const KNOWN_GOOS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

/// Every GOARCH value recognized in file name suffixes
pub const KNOWN_GOARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" if cfg!(target_endian = "little") => "ppc64le",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
