//! Feedback feed client, schema-drift normalizer, freshness cache and the
//! per-facility association index.

pub mod cache;
pub mod client;
pub mod error;
pub mod index;
pub mod normalize;
pub(crate) mod retry;
pub mod types;

pub use cache::FeedbackCache;
pub use client::FeedbackClient;
pub use error::FeedbackError;
pub use index::FeedbackIndex;
pub use normalize::{detect_schema, normalize_envelope, normalize_record};
pub use types::FeedEnvelope;
