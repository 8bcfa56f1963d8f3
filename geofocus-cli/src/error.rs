//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use geofocus::config::ConfigFileError;
use geofocus::provider::{DataUnavailable, SourceError};
use geofocus::server::ServerError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(std::io::Error),
    /// Configuration file or flag error
    Config(ConfigFileError),
    /// Failed to start the async runtime
    Runtime(std::io::Error),
    /// Failed to build the HTTP client
    HttpClient(SourceError),
    /// No source delivered the feature collection
    DataUnavailable(DataUnavailable),
    /// The HTTP server stopped with an error
    Serve(ServerError),
    /// The query matched no country
    NoMatch(String),
    /// Writing command output failed
    Output(std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// A query without a match exits with 2 so scripts can tell it apart
    /// from a failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NoMatch(_) => 2,
            _ => 1,
        }
    }

    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::DataUnavailable(_) => {
                eprintln!();
                eprintln!("Every configured source failed. Check that:");
                eprintln!("  1. This machine can reach the source URLs");
                eprintln!("  2. [sources] urls in the config file point at GeoJSON documents");
                eprintln!("  3. [download] timeout is long enough for a large document");
            }
            CliError::Serve(ServerError::Bind { .. }) => {
                eprintln!();
                eprintln!("Another process may be using the address. Try --bind with a different port.");
            }
            _ => {}
        }

        process::exit(self.exit_code())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(e) => write!(f, "Failed to initialize logging: {}", e),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::DataUnavailable(e) => write!(f, "Country data unavailable: {}", e),
            CliError::Serve(e) => write!(f, "{}", e),
            CliError::NoMatch(query) => write!(f, "No country matches '{}'", query),
            CliError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::LoggingInit(e) => Some(e),
            CliError::Config(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            CliError::HttpClient(e) => Some(e),
            CliError::DataUnavailable(e) => Some(e),
            CliError::Serve(e) => Some(e),
            CliError::NoMatch(_) => None,
            CliError::Output(e) => Some(e),
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<DataUnavailable> for CliError {
    fn from(e: DataUnavailable) -> Self {
        CliError::DataUnavailable(e)
    }
}

impl From<ServerError> for CliError {
    fn from(e: ServerError) -> Self {
        CliError::Serve(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_exit_code() {
        assert_eq!(CliError::NoMatch("atlantis".to_string()).exit_code(), 2);
        assert_eq!(
            CliError::DataUnavailable(DataUnavailable::NoSources).exit_code(),
            1
        );
    }

    #[test]
    fn test_display_includes_cause() {
        let err = CliError::from(DataUnavailable::NoSources);
        assert!(err.to_string().starts_with("Country data unavailable: "));
        assert!(std::error::Error::source(&err).is_some());
    }
}
