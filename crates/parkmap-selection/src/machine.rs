use parkmap_core::{FacilityCatalog, FacilityKind, FacilityRef};

use crate::map::MapHandle;
use crate::router::Router;
use crate::url_state::{resolve_deep_link, with_selection, without_selection};

/// What the detail drawer is showing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    #[default]
    Closed,
    Open(FacilityRef),
}

impl Selection {
    #[must_use]
    pub fn facility(&self) -> Option<&FacilityRef> {
        match self {
            Selection::Closed => None,
            Selection::Open(facility) => Some(facility),
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Open(_))
    }
}

/// Owns the selected facility and projects it into the URL and the map.
///
/// Transitions run synchronously on the caller's thread; there is no
/// in-flight state. The URL is only read by [`hydrate_from_url`], which
/// takes a loaded [`FacilityCatalog`] and runs at most once.
///
/// [`hydrate_from_url`]: SelectionMachine::hydrate_from_url
#[derive(Debug)]
pub struct SelectionMachine<R, M> {
    state: Selection,
    router: R,
    map: M,
    zoom: u8,
    hydrated: bool,
}

impl<R: Router, M: MapHandle> SelectionMachine<R, M> {
    /// Starts `Closed`. `zoom` is used every time a selection recentres.
    #[must_use]
    pub fn new(router: R, map: M, zoom: u8) -> Self {
        Self {
            state: Selection::Closed,
            router,
            map,
            zoom,
            hydrated: false,
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.state
    }

    #[must_use]
    pub fn selected(&self) -> Option<&FacilityRef> {
        self.state.facility()
    }

    #[must_use]
    pub fn drawer_open(&self) -> bool {
        self.state.is_open()
    }

    /// Type and id of the open facility, for outbound links.
    #[must_use]
    pub fn selected_key(&self) -> Option<(FacilityKind, &str)> {
        self.selected().map(|f| (f.kind(), f.id()))
    }

    #[must_use]
    pub fn router(&self) -> &R {
        &self.router
    }

    #[must_use]
    pub fn map(&self) -> &M {
        &self.map
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Opens `facility` from any state, writes `type`/`id` into the URL and
    /// recentres the map on it.
    ///
    /// Re-selecting the open facility repeats both side effects.
    pub fn select(&mut self, facility: FacilityRef) {
        let next = with_selection(self.router.current(), facility.kind(), facility.id());
        self.router.push(next);
        self.map.set_view(facility.position(), self.zoom);
        tracing::debug!(kind = %facility.kind(), id = facility.id(), "facility selected");
        self.state = Selection::Open(facility);
    }

    /// Closes the drawer and strips `type`/`id` from the URL, keeping every
    /// other parameter. Does nothing when already closed.
    pub fn close(&mut self) {
        if !self.state.is_open() {
            return;
        }
        let next = without_selection(self.router.current());
        self.router.push(next);
        self.state = Selection::Closed;
        tracing::debug!("selection closed");
    }

    /// Seeds the selection from the URL the page was opened with.
    ///
    /// Only the first call has any effect. A link that resolves behaves
    /// exactly like [`select`](Self::select); one that does not leaves the
    /// machine `Closed` and the URL untouched. Returns whether a facility
    /// was opened.
    pub fn hydrate_from_url(&mut self, catalog: &FacilityCatalog) -> bool {
        if self.hydrated {
            return false;
        }
        self.hydrated = true;

        match resolve_deep_link(catalog, self.router.current()) {
            Some(facility) => {
                self.select(facility);
                true
            }
            None => {
                if let Some(query) = self.router.current().query() {
                    tracing::debug!(query, "deep link did not resolve to a facility");
                }
                false
            }
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (Selection, R, M) {
        (self.state, self.router, self.map)
    }
}
