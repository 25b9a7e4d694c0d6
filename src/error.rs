//! Error types for gridsource
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! Transport, status, and decode failures are distinct variants here but all
//! collapse into a single rejected fetch at the request-cache boundary.

use snafu::Snafu;

/// Main error type for the data layer
#[derive(Debug, Snafu)]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Request URL could not be assembled
    #[snafu(display("Invalid request URL {url}: {source}"))]
    Url {
        url: String,
        source: url::ParseError,
    },

    /// Transport-level failure (connect, DNS, TLS, body read)
    #[snafu(display("HTTP request failed: {source}"))]
    Http { source: reqwest::Error },

    /// Server answered with a non-success status
    #[snafu(display("Server returned {status} for {url}"))]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Response body did not decode as the expected envelope
    #[snafu(display("Malformed response body: {source}"))]
    Body { source: reqwest::Error },

    /// IO error (config file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
