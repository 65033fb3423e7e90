//! HTTP client for the feedback feed.
//!
//! The feed is a single unauthenticated GET returning a `{status, records}`
//! envelope. [`FeedbackClient::try_fetch_envelope`] surfaces every failure;
//! [`FeedbackClient::fetch_envelope`] is the soft boundary the page uses and
//! turns any failure into [`FeedEnvelope::error`].

use std::time::Duration;

use parkmap_core::{AppConfig, FeedSchema, Feedback};
use reqwest::{Client, Url};

use crate::error::FeedbackError;
use crate::normalize::normalize_envelope;
use crate::retry::RetryPolicy;
use crate::types::FeedEnvelope;

const DEFAULT_USER_AGENT: &str = "parkmap/0.1 (facility-map)";
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

pub struct FeedbackClient {
    client: Client,
    url: Url,
    retry: RetryPolicy,
}

impl FeedbackClient {
    /// Creates a client for the feed at `url` with no retries.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackError::InvalidUrl`] if `url` is not an absolute
    /// http(s) URL, or [`FeedbackError::Http`] if the `reqwest::Client`
    /// cannot be constructed.
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, FeedbackError> {
        Self::with_user_agent(url, timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Same as [`FeedbackClient::new`] with an explicit `User-Agent`.
    ///
    /// # Errors
    ///
    /// See [`FeedbackClient::new`].
    pub fn with_user_agent(
        url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, FeedbackError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        let parsed = Url::parse(url).map_err(|e| FeedbackError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FeedbackError::InvalidUrl {
                url: url.to_owned(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            client,
            url: parsed,
            retry: RetryPolicy::NONE,
        })
    }

    /// Builds a client from the feed settings in `config`.
    ///
    /// # Errors
    ///
    /// See [`FeedbackClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedbackError> {
        Ok(Self::with_user_agent(
            &config.feedback_api_url,
            config.feedback_timeout_secs,
            &config.user_agent,
        )?
        .with_retries(config.feedback_max_retries, DEFAULT_BACKOFF_BASE_MS))
    }

    #[must_use]
    pub fn with_retries(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.retry = RetryPolicy::new(max_retries, backoff_base_ms);
        self
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the raw envelope, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`FeedbackError::Http`] on network failure or non-2xx status once
    ///   retries are exhausted.
    /// - [`FeedbackError::Deserialize`] if the body is not an envelope.
    pub async fn try_fetch_envelope(&self) -> Result<FeedEnvelope, FeedbackError> {
        self.retry.run(|| self.request_envelope()).await
    }

    /// Fetches the raw envelope, returning [`FeedEnvelope::error`] on any
    /// failure.
    pub async fn fetch_envelope(&self) -> FeedEnvelope {
        match self.try_fetch_envelope().await {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(url = %redacted(&self.url), error = %e, "failed to fetch feedback feed");
                FeedEnvelope::error()
            }
        }
    }

    /// Fetches and normalizes the feed.
    ///
    /// # Errors
    ///
    /// See [`FeedbackClient::try_fetch_envelope`].
    pub async fn fetch_feedback(&self, schema: FeedSchema) -> Result<Vec<Feedback>, FeedbackError> {
        let envelope = self.try_fetch_envelope().await?;
        let feedback = normalize_envelope(&envelope, schema);
        tracing::info!(
            status = %envelope.status,
            records = envelope.records.len(),
            kept = feedback.len(),
            "fetched feedback feed"
        );
        Ok(feedback)
    }

    async fn request_envelope(&self) -> Result<FeedEnvelope, FeedbackError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| FeedbackError::Deserialize {
            context: redacted(&self.url),
            source: e,
        })
    }
}

/// The feed URL without its query string, which may carry a deployment key.
fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}
