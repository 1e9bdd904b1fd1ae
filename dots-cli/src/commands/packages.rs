//! Packages command implementation

use super::PatternArgs;
use crate::error::CliResult;
use crate::output::Listing;
use clap::Args;

/// Arguments for the packages command
#[derive(Debug, Args)]
pub struct PackagesArgs {
    #[command(flatten)]
    pub common: PatternArgs,
}

impl PackagesArgs {
    /// Execute the packages command
    pub fn execute(&self) -> CliResult<()> {
        self.common.init_logging();

        log::info!("Resolving {} pattern(s)", self.common.patterns.len());
        log::debug!("Arguments: {:?}", self);

        let mut session = self.common.session(Listing::Packages)?;
        let resolution = session
            .resolver
            .resolve_packages(&self.common.patterns, &self.common.skip);

        log::info!(
            "Resolved {} package(s), {} error(s)",
            resolution.packages.len(),
            resolution.errors.len()
        );
        for package in &resolution.packages {
            session.formatter.format_package(package)?;
        }

        super::finish(session.formatter.as_mut(), &resolution.errors)
    }
}
