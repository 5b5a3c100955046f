//! Error types for course catalog scraping.

use thiserror::Error;

/// Errors that can occur while fetching or extracting the course catalog.
///
/// Only structural failures are represented here: transport problems,
/// unparseable input, or a page layout that no longer carries the expected
/// anchors. Malformed individual table rows are tolerated by the extractor
/// and never surface as errors.
#[derive(Error, Debug)]
pub enum ScraperError {
    /// Network error while fetching the catalog page.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success HTTP status.
    #[error("HTTP error {status}: {url}")]
    Http {
        /// Status code returned by the server.
        status: reqwest::StatusCode,
        /// URL that was requested.
        url: String,
    },

    /// The response body could not be decoded or parsed as markup.
    #[error("HTML parsing error: {message}")]
    Parse {
        /// Error message describing the parsing issue.
        message: String,
    },

    /// No table carrying the marker class exists in the document.
    #[error("Table with class '{marker}' not found")]
    TableNotFound {
        /// The marker class that was searched for.
        marker: String,
    },

    /// The marker table has no `tbody` among its direct children.
    #[error("No tbody in table with class '{marker}'")]
    BodyNotFound {
        /// The marker class of the table that was located.
        marker: String,
    },

    /// Configuration error (invalid URL, client construction failure).
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },
}

/// Result type alias for scraping operations.
pub type Result<T> = std::result::Result<T, ScraperError>;

impl ScraperError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
