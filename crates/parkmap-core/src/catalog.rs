//! Read-only collection of loaded facilities and the tagged reference type
//! used to point at one of them.

use std::sync::Arc;

use serde::Serialize;

use crate::coords::{Coordinates, LatLng};
use crate::facility::{Facility, FacilityKind, Park, Toilet};

/// A reference to one loaded facility.
///
/// The variant is the type tag, so the tag and the payload cannot disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum FacilityRef {
    Park(Arc<Park>),
    Toilet(Arc<Toilet>),
}

impl FacilityRef {
    #[must_use]
    pub fn kind(&self) -> FacilityKind {
        match self {
            FacilityRef::Park(_) => FacilityKind::Park,
            FacilityRef::Toilet(_) => FacilityKind::Toilet,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            FacilityRef::Park(p) => p.id(),
            FacilityRef::Toilet(t) => t.id(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            FacilityRef::Park(p) => p.name(),
            FacilityRef::Toilet(t) => t.name(),
        }
    }

    #[must_use]
    pub fn address(&self) -> &str {
        match self {
            FacilityRef::Park(p) => p.address(),
            FacilityRef::Toilet(t) => t.address(),
        }
    }

    #[must_use]
    pub fn coordinates(&self) -> &Coordinates {
        match self {
            FacilityRef::Park(p) => p.coordinates(),
            FacilityRef::Toilet(t) => t.coordinates(),
        }
    }

    #[must_use]
    pub fn position(&self) -> LatLng {
        match self {
            FacilityRef::Park(p) => p.position(),
            FacilityRef::Toilet(t) => t.position(),
        }
    }

    /// Returns `true` when both references point at the same kind and id.
    #[must_use]
    pub fn same_facility(&self, other: &FacilityRef) -> bool {
        self.kind() == other.kind() && self.id() == other.id()
    }
}

impl From<Arc<Park>> for FacilityRef {
    fn from(park: Arc<Park>) -> Self {
        FacilityRef::Park(park)
    }
}

impl From<Arc<Toilet>> for FacilityRef {
    fn from(toilet: Arc<Toilet>) -> Self {
        FacilityRef::Toilet(toilet)
    }
}

/// Every facility loaded for the current page, immutable once built.
///
/// Cloning is cheap; the entries are shared behind `Arc`.
#[derive(Debug, Clone, Default)]
pub struct FacilityCatalog {
    parks: Arc<[Arc<Park>]>,
    toilets: Arc<[Arc<Toilet>]>,
}

impl FacilityCatalog {
    #[must_use]
    pub fn new(parks: Vec<Park>, toilets: Vec<Toilet>) -> Self {
        Self {
            parks: parks.into_iter().map(Arc::new).collect(),
            toilets: toilets.into_iter().map(Arc::new).collect(),
        }
    }

    #[must_use]
    pub fn parks(&self) -> &[Arc<Park>] {
        &self.parks
    }

    #[must_use]
    pub fn toilets(&self) -> &[Arc<Toilet>] {
        &self.toilets
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parks.len() + self.toilets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parks.is_empty() && self.toilets.is_empty()
    }

    /// Looks up a facility by kind and exact id. The first match wins when
    /// a source extract repeats an id.
    #[must_use]
    pub fn find(&self, kind: FacilityKind, id: &str) -> Option<FacilityRef> {
        match kind {
            FacilityKind::Park => self
                .parks
                .iter()
                .find(|p| p.id == id)
                .map(|p| FacilityRef::Park(Arc::clone(p))),
            FacilityKind::Toilet => self
                .toilets
                .iter()
                .find(|t| t.id == id)
                .map(|t| FacilityRef::Toilet(Arc::clone(t))),
        }
    }

    /// Returns `true` when any facility of either kind carries `id`.
    #[must_use]
    pub fn contains_id(&self, id: &str) -> bool {
        self.parks.iter().any(|p| p.id == id) || self.toilets.iter().any(|t| t.id == id)
    }

    /// Iterates every facility, parks first.
    pub fn iter(&self) -> impl Iterator<Item = FacilityRef> + '_ {
        self.parks
            .iter()
            .map(|p| FacilityRef::Park(Arc::clone(p)))
            .chain(self.toilets.iter().map(|t| FacilityRef::Toilet(Arc::clone(t))))
    }
}
