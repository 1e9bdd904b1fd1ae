//! dots CLI library
//!
//! This library provides the command-line interface for resolving include
//! and skip patterns into source files.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, CliResult};
