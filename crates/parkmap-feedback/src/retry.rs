//! Bounded retry for the feed request.

use std::future::Future;
use std::time::Duration;

use crate::error::FeedbackError;

const MAX_DELAY: Duration = Duration::from_secs(10);

/// How many extra attempts a feed request gets, and how long to wait
/// between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub base: Duration,
}

impl RetryPolicy {
    pub(crate) const NONE: Self = Self {
        max_retries: 0,
        base: Duration::from_millis(500),
    };

    pub(crate) fn new(max_retries: u32, base_ms: u64) -> Self {
        Self {
            max_retries,
            base: Duration::from_millis(base_ms),
        }
    }

    /// Nominal wait before retry number `retry` (1-based): `base * 2^(retry-1)`,
    /// never above ten seconds.
    pub(crate) fn nominal_delay(self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.base.saturating_mul(factor).min(MAX_DELAY)
    }

    /// [`RetryPolicy::nominal_delay`] scaled by a random factor in `[0.75, 1.25)`.
    fn jittered_delay(self, retry: u32) -> Duration {
        self.nominal_delay(retry)
            .mul_f64(0.75 + rand::random::<f64>() * 0.5)
    }

    /// Runs `request` until it succeeds, fails permanently, or the retry
    /// budget is spent. The last error is returned.
    pub(crate) async fn run<T, F, Fut>(self, mut request: F) -> Result<T, FeedbackError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, FeedbackError>>,
    {
        let mut retry = 0;
        loop {
            let err = match request().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if retry == self.max_retries || !is_transient(&err) {
                return Err(err);
            }
            retry += 1;
            let delay = self.jittered_delay(retry);
            tracing::warn!(
                retry,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "feedback feed request failed, retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

/// Timeouts, refused connections and 5xx responses.
fn is_transient(err: &FeedbackError) -> bool {
    let FeedbackError::Http(e) = err else {
        return false;
    };
    e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
}
