//! Error taxonomy for building and delivering notifications.

use std::path::PathBuf;

/// Errors that can occur while building or delivering a notification.
///
/// Every variant keeps its underlying cause reachable through
/// [`std::error::Error::source`].
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error decoding {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    #[error("error encoding DingTalk request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("error building DingTalk request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("error sending notification to DingTalk: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("unacceptable response code {code}")]
    UnacceptableStatus { code: u16 },
}

/// Discriminant of a [`NotifyError`], for callers that branch on the
/// failure class without inspecting the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyErrorKind {
    Io,
    Decode,
    Template,
    Encode,
    Request,
    Transport,
    UnacceptableStatus,
}

impl NotifyError {
    pub fn kind(&self) -> NotifyErrorKind {
        match self {
            NotifyError::Io { .. } => NotifyErrorKind::Io,
            NotifyError::Decode { .. } => NotifyErrorKind::Decode,
            NotifyError::Template(_) => NotifyErrorKind::Template,
            NotifyError::Encode(_) => NotifyErrorKind::Encode,
            NotifyError::Request(_) => NotifyErrorKind::Request,
            NotifyError::Transport(_) => NotifyErrorKind::Transport,
            NotifyError::UnacceptableStatus { .. } => NotifyErrorKind::UnacceptableStatus,
        }
    }
}
