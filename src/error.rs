//! Error types for the Tessera library.
//!
//! Every fallible operation returns [`Result`], whose error side is the
//! [`TesseraError`] enum. Configuration mistakes (bad n-gram ranges, bad
//! trimming thresholds, unknown stemmer languages) and malformed regular
//! expressions are reported as typed variants so callers can react to each
//! category separately.
//!
//! # Examples
//!
//! ```
//! use tessera::error::{Result, TesseraError};
//!
//! fn check_order(min: usize, max: usize) -> Result<()> {
//!     if min > max {
//!         return Err(TesseraError::invalid_range(format!("{min} > {max}")));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_order(2, 1).is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Tessera operations.
#[derive(Error, Debug)]
pub enum TesseraError {
    /// A regular expression failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// A stemmer was requested for a language code outside the supported set.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// An n-gram order range was empty or contained zero.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// A trimming threshold was below one.
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Texts and metadata rows disagree in length.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),

    /// I/O errors while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with TesseraError.
pub type Result<T> = std::result::Result<T, TesseraError>;

impl TesseraError {
    /// Create a new pattern error.
    pub fn pattern<S: Into<String>>(msg: S) -> Self {
        TesseraError::Pattern(msg.into())
    }

    /// Create a new unsupported language error.
    pub fn unsupported_language<S: Into<String>>(code: S) -> Self {
        TesseraError::UnsupportedLanguage(code.into())
    }

    /// Create a new invalid range error.
    pub fn invalid_range<S: Into<String>>(msg: S) -> Self {
        TesseraError::InvalidRange(msg.into())
    }

    /// Create a new invalid threshold error.
    pub fn invalid_threshold<S: Into<String>>(msg: S) -> Self {
        TesseraError::InvalidThreshold(msg.into())
    }

    /// Create a new schema mismatch error.
    pub fn schema_mismatch<S: Into<String>>(msg: S) -> Self {
        TesseraError::SchemaMismatch(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TesseraError::Other(msg.into())
    }

    /// Create a new internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        TesseraError::Other(format!("Internal error: {}", msg.into()))
    }
}
