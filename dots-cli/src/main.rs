//! dots - resolve file, directory and package patterns into source files

use clap::Parser;
use dots_cli::commands::Commands;

/// Resolve include and skip patterns into a deduplicated list of source files
#[derive(Debug, Parser)]
#[command(name = "dots", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.command.execute() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
