//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Some patterns could not be resolved
    Unresolved(usize),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Unresolved(1) => write!(f, "1 pattern could not be resolved"),
            CliError::Unresolved(count) => write!(f, "{count} patterns could not be resolved"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_error_display() {
        assert_eq!(
            CliError::Unresolved(1).to_string(),
            "1 pattern could not be resolved"
        );
        assert_eq!(
            CliError::Unresolved(3).to_string(),
            "3 patterns could not be resolved"
        );
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = CliError::Unresolved(2);
        let _: &dyn std::error::Error = &error;

        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("Unresolved"));
    }

    #[test]
    fn test_cli_result_type_alias() {
        let success: CliResult<String> = Ok("test".to_string());
        assert_eq!(success.as_ref().unwrap(), "test");

        let failure: CliResult<String> = Err(CliError::Unresolved(1).into());
        assert!(failure
            .unwrap_err()
            .downcast_ref::<CliError>()
            .is_some_and(|e| matches!(e, CliError::Unresolved(1))));
    }
}
