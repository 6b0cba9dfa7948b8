//! Result and error types for Cribar.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for Cribar operations
pub type CribarResult<T> = Result<T, CribarError>;

/// Errors that can occur in Cribar
#[derive(Debug, Error)]
pub enum CribarError {
    /// Required configuration absent or blank; collects every missing key
    #[error("missing required configuration: {}", .missing.join(", "))]
    Configuration {
        /// Keys that were absent or blank
        missing: Vec<String>,
    },

    /// Caller-supplied values rejected by whitelist validation
    #[error("invalid status values [{}]; allowed values are [{}]", .offending.join(", "), .allowed.join(", "))]
    Validation {
        /// Every value that failed the membership check
        offending: Vec<String>,
        /// The full whitelist
        allowed: Vec<String>,
    },

    /// A workflow was handed an empty selection
    #[error("empty status selection: at least one status is required")]
    EmptySelection,

    /// A referenced element or option never resolved
    #[error("element not found: {locator}")]
    NotFound {
        /// Description of what was looked up
        locator: String,
    },

    /// A wait exceeded its timeout policy entry
    #[error("{operation} timed out after {ms}ms")]
    Timeout {
        /// Operation that was waiting
        operation: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Authentication was never confirmed by the post-login URL pattern
    #[error("authentication not confirmed within {ms}ms (waiting for URL matching {pattern})")]
    AuthTimeout {
        /// URL pattern that never matched
        pattern: String,
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Session artifact missing after an otherwise-successful login
    #[error("session artifact was not persisted at {}", .path.display())]
    Persistence {
        /// Expected artifact path
        path: PathBuf,
    },

    /// A confirmation target was required but never configured
    #[error("{component}: target not set")]
    TargetNotSet {
        /// Component that needed the target
        component: String,
    },

    /// Table row index past the end of the result set
    #[error("row index {index} out of range for table with {count} rows")]
    RowOutOfRange {
        /// Requested index
        index: usize,
        /// Actual row count
        count: usize,
    },

    /// A table cell held a value outside the expected set
    #[error("unexpected value {value:?}; expected one of [{}]", .expected.join(", "))]
    UnexpectedValue {
        /// The offending cell text
        value: String,
        /// The full expected set
        expected: Vec<String>,
    },

    /// Element resolved but is in a state that forbids interaction
    #[error("invalid state: {message}")]
    InvalidState {
        /// Which check failed and for which element
        message: String,
    },

    /// Failure inside the browser engine
    #[error("driver error: {message}")]
    Driver {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
