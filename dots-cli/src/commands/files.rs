//! Files command implementation

use super::PatternArgs;
use crate::error::CliResult;
use crate::output::Listing;
use clap::Args;

/// Arguments for the files command
#[derive(Debug, Args)]
pub struct FilesArgs {
    #[command(flatten)]
    pub common: PatternArgs,
}

impl FilesArgs {
    /// Execute the files command
    pub fn execute(&self) -> CliResult<()> {
        self.common.init_logging();

        log::info!("Resolving {} pattern(s)", self.common.patterns.len());
        log::debug!("Arguments: {:?}", self);

        let mut session = self.common.session(Listing::Files)?;
        let resolution = session
            .resolver
            .resolve(&self.common.patterns, &self.common.skip);

        log::info!(
            "Resolved {} file(s), {} error(s)",
            resolution.files.len(),
            resolution.errors.len()
        );
        for file in &resolution.files {
            session.formatter.format_file(file)?;
        }

        super::finish(session.formatter.as_mut(), &resolution.errors)
    }
}
