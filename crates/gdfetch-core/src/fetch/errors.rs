//! Error types for retrieval and archive handling.
//!
//! Serializable by design: I/O failures are captured as kind/message strings
//! rather than wrapping `std::io::Error`, so outcomes survive serialization
//! across process boundaries (logs, machine-readable reports).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Error produced by a retrieval strategy or by archive handling.
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum FetchError {
    /// I/O error during file or directory operations.
    #[error("I/O error ({kind}): {message}")]
    Io {
        /// The kind of I/O error (e.g., "entity not found", "permission denied").
        kind: String,
        /// Detailed error message.
        message: String,
    },

    /// Network/HTTP error while talking to the host.
    #[error("network error: {message}")]
    Network {
        /// Detailed error message.
        message: String,
        /// HTTP status code if one was received.
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },

    /// The supplied identifier is not recognizable in any supported form.
    #[error("unrecognizable file identifier: {input:?}")]
    InvalidIdentifier {
        /// The offending input.
        input: String,
    },

    /// The host answered with a warning page instead of file content.
    #[error("warning page returned instead of content: {message}")]
    WarningPage {
        /// What identified the response as a warning page.
        message: String,
    },

    /// A strategy reported success but no archive exists on disk.
    #[error("no archive file was written to {path}")]
    MissingFile {
        /// Expected archive location.
        path: PathBuf,
    },

    /// The downloaded bytes do not form a readable archive, or extraction failed.
    #[error("archive error: {message}")]
    Archive {
        /// Detailed error message.
        message: String,
    },
}

impl FetchError {
    /// Create an I/O error from kind and message strings.
    pub fn io(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create an I/O error from a `std::io::Error`, capturing kind and message.
    #[must_use]
    pub fn from_io_error(err: &std::io::Error) -> Self {
        Self::Io {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }

    /// Create a network error with no status code.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a network error carrying the HTTP status that was received.
    pub fn status(message: impl Into<String>, status_code: u16) -> Self {
        Self::Network {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create an invalid-identifier error.
    pub fn invalid_identifier(input: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            input: input.into(),
        }
    }

    /// Create a warning-page error.
    pub fn warning_page(message: impl Into<String>) -> Self {
        Self::WarningPage {
            message: message.into(),
        }
    }

    /// Create an archive error.
    pub fn archive(message: impl Into<String>) -> Self {
        Self::Archive {
            message: message.into(),
        }
    }
}

/// Result alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_io_error_captures_kind_and_message() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "locked");
        let err = FetchError::from_io_error(&io);
        match err {
            FetchError::Io { kind, message } => {
                assert_eq!(kind, "permission denied");
                assert!(message.contains("locked"));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn status_code_is_attached() {
        let err = FetchError::status("rejected", 403);
        assert_eq!(
            err,
            FetchError::Network {
                message: "rejected".to_string(),
                status_code: Some(403),
            }
        );
    }

    #[test]
    fn display_is_human_readable() {
        let err = FetchError::warning_page("text/html response");
        assert_eq!(
            err.to_string(),
            "warning page returned instead of content: text/html response"
        );
    }
}
