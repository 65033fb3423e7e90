use thiserror::Error;

/// Failure writing to the system clipboard.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The environment refused access (permissions, insecure context).
    #[error("clipboard access denied: {0}")]
    Denied(String),

    /// No clipboard is available at all.
    #[error("clipboard unavailable")]
    Unavailable,
}
