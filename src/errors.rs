/*!
 * Error types for the mdsegment application.
 *
 * The extraction core itself never fails; these errors cover the I/O
 * surfaces around it (discovery, export, the translation-memory store,
 * configuration) and translated-text restoration. Defined with the
 * thiserror crate.
 */

use thiserror::Error;

/// Main error type for everything outside the pure extraction core
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error while walking the input tree
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Error while writing an export
    #[error("Export error: {0}")]
    Export(String),

    /// Error from the translation-memory store
    #[error("Store error: {0}")]
    Store(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A translation lost or invented placeholder tokens
    #[error("Placeholder mismatch in {identifier}: missing [{}], unexpected [{}]", .missing.join(", "), .unexpected.join(", "))]
    PlaceholderMismatch {
        /// Identifier of the segment being restored
        identifier: String,
        /// Tokens the translation dropped
        missing: Vec<String>,
        /// Tokens the translation invented
        unexpected: Vec<String>,
    },

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for ExtractError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for ExtractError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(error: serde_json::Error) -> Self {
        Self::Export(error.to_string())
    }
}

impl From<rusqlite::Error> for ExtractError {
    fn from(error: rusqlite::Error) -> Self {
        Self::Store(error.to_string())
    }
}

impl From<walkdir::Error> for ExtractError {
    fn from(error: walkdir::Error) -> Self {
        Self::Discovery(error.to_string())
    }
}
