/*!
 * Error types for the nametrans application.
 *
 * Provider errors cover every transport-level failure when talking to the
 * NER, dictionary and generative services. Configuration errors are raised
 * when a client is constructed. A name that no dictionary knows is not an
 * error: it ends up in `TranslationResult::not_found`.
 */

use thiserror::Error;

/// Errors that can occur when talking to a remote service
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

impl ProviderError {
    /// Map a reqwest failure to the matching provider error
    pub fn from_reqwest(service: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() {
            Self::ConnectionError(format!("{} request failed: {}", service, error))
        } else if error.is_decode() {
            Self::ParseError(format!("{} response could not be decoded: {}", service, error))
        } else {
            Self::RequestFailed(format!("{} request failed: {}", service, error))
        }
    }
}

/// Errors raised while building clients from configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required credential is missing
    #[error("Missing credential: {0} is required")]
    MissingCredential(String),

    /// A configuration value is malformed
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error while writing or reading the TSV glossary
    #[error("Export error: {0}")]
    Export(String),

    /// Error from the tool registry or a tool's input
    #[error("Tool error: {0}")]
    Tool(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(error: csv::Error) -> Self {
        Self::Export(error.to_string())
    }
}
