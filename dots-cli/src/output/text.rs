//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use dots_core::PackageFiles;
use std::io::{self, Write};
use std::path::Path;

/// Plain text formatter - outputs one path per line
///
/// Packages are printed as their directory followed by the package files,
/// each indented by two spaces.
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the formatter and return the writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_file(&mut self, path: &Path) -> Result<()> {
        writeln!(self.writer, "{}", path.display())?;
        Ok(())
    }

    fn format_package(&mut self, package: &PackageFiles) -> Result<()> {
        writeln!(self.writer, "{}", package.dir.display())?;
        for file in &package.files {
            writeln!(self.writer, "  {}", file.display())?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_files_one_per_line() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter.format_file(Path::new("a/one.go")).unwrap();
        formatter.format_file(Path::new("b/two.go")).unwrap();
        formatter.finish().unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(output, "a/one.go\nb/two.go\n");
    }

    #[test]
    fn test_package_header_and_indented_files() {
        let mut formatter = TextFormatter::new(Vec::new());
        formatter
            .format_package(&PackageFiles {
                dir: PathBuf::from("pkg"),
                files: vec![PathBuf::from("pkg/a.go"), PathBuf::from("pkg/b.go")],
            })
            .unwrap();
        formatter.finish().unwrap();

        let output = String::from_utf8(formatter.into_inner()).unwrap();
        assert_eq!(output, "pkg\n  pkg/a.go\n  pkg/b.go\n");
    }
}
