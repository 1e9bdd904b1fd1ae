//! Output formatting module

use anyhow::Result;
use dots_core::{PackageFiles, ResolveError};
use std::io;
use std::path::Path;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Output a single resolved file
    fn format_file(&mut self, path: &Path) -> Result<()>;

    /// Output the files of one package directory
    fn format_package(&mut self, package: &PackageFiles) -> Result<()>;

    /// Record a pattern that failed to resolve
    fn format_error(&mut self, _error: &ResolveError) -> Result<()> {
        Ok(())
    }

    /// Finalize output (e.g., write the JSON document)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One path per line
    Text,
    /// A single JSON object with results and errors
    Json,
}

/// Shape of the result being printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Flat file list
    Files,
    /// Files grouped by package directory
    Packages,
}

/// Create a formatter writing to stdout
pub fn stdout_formatter(
    format: OutputFormat,
    listing: Listing,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::stdout()),
        OutputFormat::Json => {
            Box::new(JsonFormatter::new(io::stdout(), listing).pretty(pretty_json))
        }
    }
}
