//! Pattern parsing

/// Trailing marker meaning "this and everything beneath it"
pub const RECURSIVE_MARKER: &str = "/...";

/// An include or skip pattern split into its base and recursion flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern<'a> {
    /// The pattern exactly as supplied
    pub raw: &'a str,
    /// Path or package identifier with the marker removed
    pub base: &'a str,
    /// Whether the marker was present
    pub recursive: bool,
}

impl<'a> Pattern<'a> {
    /// Split a raw pattern into base and recursion flag
    pub fn parse(raw: &'a str) -> Self {
        match raw.strip_suffix(RECURSIVE_MARKER) {
            // A bare marker has no base to recurse from
            Some(base) if !base.is_empty() => Self {
                raw,
                base,
                recursive: true,
            },
            _ => Self {
                raw,
                base: raw,
                recursive: false,
            },
        }
    }
}
