//! Errors raised by the incident collaborator layer
//!
//! The pricing engine never fails; everything here is about rejecting bad
//! form input and reading or writing the ledger file.

use crate::timestamp::TimestampError;
use thiserror::Error;

/// Errors that can occur while recording incidents
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid {field}: {source}")]
    InvalidTimestamp {
        field: &'static str,
        #[source]
        source: TimestampError,
    },

    #[error("Invalid ledger file: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
