//! Lexical path normalization
//!
//! Directory patterns and package directories are all expressed as clean
//! absolute paths, so one file has one spelling no matter which pattern
//! reached it. Nothing here touches the filesystem; symlinks are kept.

use std::path::{Component, Path, PathBuf};

/// Remove `.` components and redundant or trailing separators, and fold `..`
/// into the preceding normal component
pub fn clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir if depth > 0 => {
                cleaned.pop();
                depth -= 1;
            }
            // `/..` is `/`
            Component::ParentDir if cleaned.has_root() => {}
            Component::ParentDir => cleaned.push(".."),
            Component::Normal(name) => {
                cleaned.push(name);
                depth += 1;
            }
            Component::RootDir | Component::Prefix(_) => cleaned.push(component.as_os_str()),
        }
    }

    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

/// `path` joined onto `base` when relative, then cleaned
pub fn absolute(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        clean(path)
    } else {
        clean(&base.join(path))
    }
}
