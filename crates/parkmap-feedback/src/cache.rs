//! Freshness-window cache in front of [`FeedbackClient`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parkmap_core::FeedSchema;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use crate::client::FeedbackClient;
use crate::index::FeedbackIndex;

struct Snapshot {
    index: Arc<FeedbackIndex>,
    fresh_until: Instant,
}

impl Snapshot {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.fresh_until
    }
}

/// Serves the last normalized feed until the revalidation window elapses.
///
/// A failed refetch keeps the previous snapshot and restarts the window, so
/// an unreachable feed costs one request per window rather than one per
/// caller. A failure before any successful fetch yields an empty index.
///
/// The snapshot lock is only held to read or swap the snapshot, never across
/// the network request; readers such as [`FeedbackCache::peek`] and
/// [`FeedbackCache::current`] do not wait for a slow feed.
pub struct FeedbackCache {
    client: FeedbackClient,
    schema: FeedSchema,
    revalidate: Duration,
    snapshot: RwLock<Option<Snapshot>>,
    /// Held for the duration of one fetch; serializes refreshes.
    refresh: Mutex<()>,
    /// Set while a background refresh task is queued or running.
    refresh_scheduled: AtomicBool,
}

impl FeedbackCache {
    #[must_use]
    pub fn new(client: FeedbackClient, schema: FeedSchema, revalidate: Duration) -> Self {
        Self {
            client,
            schema,
            revalidate,
            snapshot: RwLock::new(None),
            refresh: Mutex::new(()),
            refresh_scheduled: AtomicBool::new(false),
        }
    }

    async fn fresh(&self) -> Option<Arc<FeedbackIndex>> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .filter(|s| s.is_fresh())
            .map(|s| Arc::clone(&s.index))
    }

    /// Returns the cached index, refetching first if it is stale.
    ///
    /// Waits for the feed. Concurrent callers share one refetch.
    pub async fn get(&self) -> Arc<FeedbackIndex> {
        if let Some(index) = self.fresh().await {
            return index;
        }
        let _refreshing = self.refresh.lock().await;
        // Another caller may have refreshed while this one waited.
        if let Some(index) = self.fresh().await {
            return index;
        }

        let fetched = self.client.fetch_feedback(self.schema).await;

        let mut snapshot = self.snapshot.write().await;
        let index = match fetched {
            Ok(feedback) => Arc::new(FeedbackIndex::new(feedback)),
            Err(e) => {
                let previous = snapshot.as_ref().map(|s| Arc::clone(&s.index));
                tracing::warn!(
                    error = %e,
                    keeping_previous = previous.is_some(),
                    "feedback refresh failed"
                );
                previous.unwrap_or_default()
            }
        };
        *snapshot = Some(Snapshot {
            index: Arc::clone(&index),
            fresh_until: Instant::now() + self.revalidate,
        });
        index
    }

    /// Returns the cached index immediately, stale or not, and schedules a
    /// background refresh when it is stale. Empty until the first fetch
    /// completes.
    pub async fn current(self: &Arc<Self>) -> Arc<FeedbackIndex> {
        let (index, stale) = match self.snapshot.read().await.as_ref() {
            Some(s) => (Arc::clone(&s.index), !s.is_fresh()),
            None => (Arc::default(), true),
        };
        if stale {
            self.spawn_refresh();
        }
        index
    }

    /// Starts a refresh on the runtime unless one is already scheduled.
    /// `on_done` runs with the resulting index.
    pub fn spawn_refresh_then<F>(self: &Arc<Self>, on_done: F)
    where
        F: FnOnce(&FeedbackIndex) + Send + 'static,
    {
        if self.refresh_scheduled.swap(true, Ordering::AcqRel) {
            return;
        }
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let index = cache.get().await;
            cache.refresh_scheduled.store(false, Ordering::Release);
            on_done(&index);
        });
    }

    /// Starts a refresh on the runtime unless one is already scheduled.
    pub fn spawn_refresh(self: &Arc<Self>) {
        self.spawn_refresh_then(|_| {});
    }

    /// Returns whatever is cached without touching the network.
    pub async fn peek(&self) -> Option<Arc<FeedbackIndex>> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|s| Arc::clone(&s.index))
    }

    /// Marks the snapshot stale so the next [`FeedbackCache::get`] refetches.
    pub async fn invalidate(&self) {
        if let Some(snapshot) = self.snapshot.write().await.as_mut() {
            snapshot.fresh_until = Instant::now();
        }
    }
}
