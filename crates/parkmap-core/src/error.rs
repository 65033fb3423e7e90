use thiserror::Error;

/// Errors raised while building [`crate::AppConfig`] from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Errors raised when parsing domain values from their wire spellings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid facility kind: {0}")]
    InvalidFacilityKind(String),

    #[error("invalid feedback schema: {0}")]
    InvalidFeedSchema(String),
}
