//! Error types for reaction export runs.
//!
//! Every variant is fatal: the exporter never downgrades or retries a
//! failure, it stops and hands the error to the caller. `ErrorKind` groups
//! the variants into the categories an operator cares about.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Broad failure category of an [`ExportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad user input, detected before any remote I/O.
    Configuration,
    /// The chat server (or the transport to it) failed.
    RemoteService,
    /// The server returned data that contradicts itself.
    DataIntegrity,
    /// Writing records to the sink failed.
    Output,
}

/// Errors from loading credentials, talking to the server or writing output.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to read credentials from {path:?}: {reason}")]
    Credentials { path: PathBuf, reason: String },

    #[error("Invalid narrow term '{term}': expected operator:operand")]
    InvalidNarrow { term: String },

    #[error("Request to {endpoint} failed: {source}")]
    Remote {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Server rejected {endpoint} (HTTP {status}): {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("Message {message_id} references unknown channel {channel_id}")]
    UnknownChannel { message_id: u64, channel_id: u64 },

    #[error("Message {message_id} does not belong to a channel")]
    MissingChannel { message_id: u64 },

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExportError::Config(_)
            | ExportError::Credentials { .. }
            | ExportError::InvalidNarrow { .. } => ErrorKind::Configuration,
            ExportError::Remote { .. } | ExportError::Api { .. } | ExportError::Decode { .. } => {
                ErrorKind::RemoteService
            }
            ExportError::UnknownChannel { .. } | ExportError::MissingChannel { .. } => {
                ErrorKind::DataIntegrity
            }
            ExportError::Io(_) => ErrorKind::Output,
        }
    }
}
