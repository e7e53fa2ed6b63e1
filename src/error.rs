use std::time::Duration;
use thiserror::Error;

use crate::imaging::ImageSource;

#[derive(Debug, Error)]
pub enum StudyError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level failure: DNS, refused connection, unreadable body.
    /// `context` is the feature prefix, e.g. "Failed to get summary".
    #[error("{context}: {message}")]
    Transport {
        context: &'static str,
        message: String,
    },

    #[error("{context}: request timed out after {}ms", .after.as_millis())]
    Timeout {
        context: &'static str,
        after: Duration,
    },

    #[error("{context}: request cancelled")]
    Cancelled { context: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("{0} permission not granted")]
    PermissionDenied(ImageSource),

    #[error("{context}: {message}")]
    ImageAcquisition {
        context: &'static str,
        message: String,
    },

    #[error("Image error: {0}")]
    Image(String),
}

impl StudyError {
    /// True for failures of the transport channel, as opposed to
    /// application errors reported inside a response body.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            StudyError::Transport { .. } | StudyError::Timeout { .. } | StudyError::Cancelled { .. }
        )
    }
}

impl From<serde_json::Error> for StudyError {
    fn from(e: serde_json::Error) -> Self {
        StudyError::Serialization(e.to_string())
    }
}

impl From<image::ImageError> for StudyError {
    fn from(e: image::ImageError) -> Self {
        StudyError::Image(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudyError>;
