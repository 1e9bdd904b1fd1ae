//! JSON output formatter

use super::{Listing, OutputFormatter};
use anyhow::Result;
use dots_core::{PackageFiles, ResolveError};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

/// JSON formatter - collects results and writes one document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    document: Document,
}

/// Top-level JSON document
///
/// Exactly one of `files` and `packages` is present, depending on the listing.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Document {
    /// Resolved files, for flat listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<PathBuf>>,
    /// Resolved packages, for grouped listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<PackageData>>,
    /// Patterns that failed to resolve
    pub errors: Vec<ErrorData>,
}

/// One package group in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct PackageData {
    /// Package directory
    pub dir: PathBuf,
    /// Files of the package
    pub files: Vec<PathBuf>,
}

/// One unresolvable pattern in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorData {
    /// The pattern as given
    pub pattern: String,
    /// Full error message
    pub message: String,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter for the given listing
    pub fn new(writer: W, listing: Listing) -> Self {
        let document = match listing {
            Listing::Files => Document {
                files: Some(Vec::new()),
                ..Document::default()
            },
            Listing::Packages => Document {
                packages: Some(Vec::new()),
                ..Document::default()
            },
        };
        Self {
            writer,
            pretty: true,
            document,
        }
    }

    /// Toggle pretty printing
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_file(&mut self, path: &Path) -> Result<()> {
        self.document
            .files
            .get_or_insert_with(Vec::new)
            .push(path.to_path_buf());
        Ok(())
    }

    fn format_package(&mut self, package: &PackageFiles) -> Result<()> {
        self.document
            .packages
            .get_or_insert_with(Vec::new)
            .push(PackageData {
                dir: package.dir.clone(),
                files: package.files.clone(),
            });
        Ok(())
    }

    fn format_error(&mut self, error: &ResolveError) -> Result<()> {
        self.document.errors.push(ErrorData {
            pattern: error.pattern().to_string(),
            message: error.to_string(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.document)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.document)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
