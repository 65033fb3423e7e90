use thiserror::Error;

/// Errors returned while fetching the feedback feed.
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// Network or TLS failure, or a non-2xx status from the feed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured feed URL could not be parsed.
    #[error("invalid feed URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The response body was not a `{status, records}` envelope.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
