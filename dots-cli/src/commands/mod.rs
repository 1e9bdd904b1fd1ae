//! CLI command implementations

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{self, Listing, OutputFormat, OutputFormatter};
use clap::{Args, Subcommand, ValueEnum};
use dots_core::{ResolveError, Resolver};
use std::path::PathBuf;

pub mod files;
pub mod packages;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the source files matched by the patterns
    Files(files::FilesArgs),

    /// List the matched source files grouped by package directory
    Packages(packages::PackagesArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> CliResult<()> {
        match self {
            Commands::Files(args) => args.execute(),
            Commands::Packages(args) => args.execute(),
        }
    }
}

/// Arguments shared by every resolving command
#[derive(Debug, Args)]
pub struct PatternArgs {
    /// Files, directories, `dir/...` trees, or package identifiers
    #[arg(value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Pattern whose files are excluded from the result (repeatable)
    #[arg(short, long, value_name = "PATTERN")]
    pub skip: Vec<String>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Configuration file (default: ./dots.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Source file suffix collected from directories
    #[arg(long, value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// Extra build tags, comma separated
    #[arg(long, value_name = "TAGS", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Target operating system for build constraints
    #[arg(long, value_name = "GOOS", env = "GOOS")]
    pub goos: Option<String>,

    /// Target architecture for build constraints
    #[arg(long, value_name = "GOARCH", env = "GOARCH")]
    pub goarch: Option<String>,

    /// Suppress log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Everything a command needs to run
pub struct Session {
    /// Resolver built from config file and flags
    pub resolver: Resolver,
    /// Where results go
    pub formatter: Box<dyn OutputFormatter>,
}

impl PatternArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }

    /// Load the configuration and apply command-line overrides
    pub fn load_config(&self) -> CliResult<CliConfig> {
        let mut config = CliConfig::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut CliConfig) {
        let resolver = &mut config.resolver;
        if let Some(suffix) = &self.suffix {
            resolver.source_suffix = suffix.clone();
        }
        if let Some(goos) = &self.goos {
            resolver.build.goos = goos.clone();
        }
        if let Some(goarch) = &self.goarch {
            resolver.build.goarch = goarch.clone();
        }
        for tag in &self.tags {
            if !tag.is_empty() && !resolver.build.tags.contains(tag) {
                resolver.build.tags.push(tag.clone());
            }
        }
    }

    /// The output format from the flag, falling back to the config file
    pub fn output_format(&self, config: &CliConfig) -> CliResult<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        OutputFormat::from_str(&config.output.default_format, true).map_err(|_| {
            CliError::ConfigError(format!(
                "unknown output format '{}'",
                config.output.default_format
            ))
            .into()
        })
    }

    /// Build the resolver and formatter for a command
    pub fn session(&self, listing: Listing) -> CliResult<Session> {
        let config = self.load_config()?;
        let format = self.output_format(&config)?;
        log::debug!("Resolver configuration: {:?}", config.resolver);

        Ok(Session {
            formatter: output::stdout_formatter(format, listing, config.output.pretty_json),
            resolver: Resolver::new(config.resolver),
        })
    }
}

/// Print errors to stderr, hand them to the formatter and finish output
///
/// Fails with [`CliError::Unresolved`] when any pattern failed.
pub fn finish(formatter: &mut dyn OutputFormatter, errors: &[ResolveError]) -> CliResult<()> {
    for error in errors {
        eprintln!("error: {error}");
        formatter.format_error(error)?;
    }
    formatter.finish()?;

    if errors.is_empty() {
        Ok(())
    } else {
        Err(CliError::Unresolved(errors.len()).into())
    }
}
