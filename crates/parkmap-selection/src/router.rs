use url::Url;

/// The page location the selection is projected into.
pub trait Router {
    /// The current location.
    fn current(&self) -> &Url;

    /// Navigates to `url`, adding a history entry without scrolling.
    fn push(&mut self, url: Url);
}

/// In-memory browser history.
///
/// Used by the HTTP host to compute page models and by tests to observe
/// what a browser would have navigated to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRouter {
    entries: Vec<Url>,
}

impl HistoryRouter {
    #[must_use]
    pub fn new(start: Url) -> Self {
        Self {
            entries: vec![start],
        }
    }

    /// Starts at `start`.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if `start` is not an absolute URL.
    pub fn parse(start: &str) -> Result<Self, url::ParseError> {
        Url::parse(start).map(Self::new)
    }

    /// Every location visited, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[Url] {
        &self.entries
    }

    /// Number of navigations since the start page.
    #[must_use]
    pub fn push_count(&self) -> usize {
        self.entries.len() - 1
    }
}

impl Router for HistoryRouter {
    fn current(&self) -> &Url {
        // `entries` is never empty: `new` seeds it and nothing removes.
        &self.entries[self.entries.len() - 1]
    }

    fn push(&mut self, url: Url) {
        tracing::trace!(url = %url, "router push");
        self.entries.push(url);
    }
}
