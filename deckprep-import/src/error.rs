//! Error types for deckprep-import
//!
//! Lookup failures never surface here: the enricher degrades the affected
//! entry instead. These errors cover setup (configuration, HTTP client,
//! logging).

use crate::types::LookupError;
use thiserror::Error;

/// Import setup error
#[derive(Debug, Error)]
pub enum ImportError {
    /// deckprep-common error (configuration, I/O)
    #[error("Common error: {0}")]
    Common(#[from] deckprep_common::Error),

    /// Metadata service client could not be built
    #[error("Client error: {0}")]
    Client(#[from] LookupError),

    /// Tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for import setup
pub type ImportResult<T> = Result<T, ImportError>;
