use shared::error::{ApiError, ApiException};
use thiserror::Error;

/// A store operation failed on the way to, at, or back from the service.
/// Never retried internally.
#[derive(Debug, Error)]
pub enum RemoteFailure {
    #[error("invalid service url for {endpoint}: {source}")]
    InvalidUrl {
        endpoint: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned HTTP {status}: {source}")]
    Status {
        endpoint: &'static str,
        status: u16,
        #[source]
        source: ApiException,
    },
    #[error("unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl RemoteFailure {
    pub fn status(endpoint: &'static str, status: u16, body: &[u8]) -> Self {
        Self::Status {
            endpoint,
            status,
            source: ApiError::from_response(status, body).into(),
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::InvalidUrl { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Decode { endpoint, .. } => endpoint,
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Upload rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected a {expected} file, got {actual}")]
    UnexpectedType {
        expected: &'static str,
        actual: String,
    },
    #[error("file name must not be empty")]
    MissingFileName,
    #[error("{file_name} is empty")]
    EmptyFile { file_name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("no tutorial is being edited")]
    NotEditing,
}

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("tutorial {0} has no video attached")]
    NoVideo(shared::domain::TutorialId),
    #[error(transparent)]
    Remote(#[from] RemoteFailure),
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("tutorial {0} is not in the current list")]
    UnknownTutorial(shared::domain::TutorialId),
    #[error(transparent)]
    Edit(#[from] EditError),
}
