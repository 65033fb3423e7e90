//! Facility entities: parks and public toilets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coords::{to_numeric_position, Coordinates, LatLng};
use crate::error::CoreError;

/// Which of the two facility variants a record or URL refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacilityKind {
    Park,
    Toilet,
}

impl FacilityKind {
    pub const ALL: [FacilityKind; 2] = [FacilityKind::Park, FacilityKind::Toilet];

    /// Tag used in the `type` URL parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FacilityKind::Park => "park",
            FacilityKind::Toilet => "toilet",
        }
    }

    /// Localized label used by the feedback form and its responses.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FacilityKind::Park => "公園",
            FacilityKind::Toilet => "トイレ",
        }
    }

    /// Resolves either the URL tag or the localized label.
    #[must_use]
    pub fn from_any(raw: &str) -> Option<Self> {
        match raw.trim() {
            "park" | "公園" => Some(FacilityKind::Park),
            "toilet" | "トイレ" => Some(FacilityKind::Toilet),
            _ => None,
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FacilityKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "park" => Ok(FacilityKind::Park),
            "toilet" => Ok(FacilityKind::Toilet),
            other => Err(CoreError::InvalidFacilityKind(other.to_string())),
        }
    }
}

/// Common capability of every facility shown on the map.
pub trait Facility {
    const KIND: FacilityKind;

    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn address(&self) -> &str;
    fn coordinates(&self) -> &Coordinates;

    /// Numeric position parsed from the stored coordinate strings.
    fn position(&self) -> LatLng {
        to_numeric_position(self.coordinates())
    }
}

/// A municipal park.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Park {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
}

impl Facility for Park {
    const KIND: FacilityKind = FacilityKind::Park;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }
}

/// Presence of an accessibility feature.
///
/// Source extracts spell this `有` (present) or `無` (absent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    /// Strict parse of the source spelling.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "有" => Some(Availability::Available),
            "無" => Some(Availability::Unavailable),
            _ => None,
        }
    }

    /// Parse used by the loaders: anything not explicitly `有` is
    /// reported as unavailable.
    #[must_use]
    pub fn from_source(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Availability::Unavailable)
    }

    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Availability::Available)
    }

    /// Display label (`あり` / `なし`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Availability::Available => "あり",
            Availability::Unavailable => "なし",
        }
    }
}

/// Stall counts for one section of a toilet block.
///
/// `None` means the source cell was empty or not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StallCounts {
    pub total: Option<u32>,
    /// Urinals; only recorded for the men's section.
    pub urinal: Option<u32>,
    /// Squat-style (Japanese) stalls.
    pub squat: Option<u32>,
    /// Western-style stalls.
    pub western: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToiletFixtures {
    pub men: StallCounts,
    pub women: StallCounts,
    pub unisex: StallCounts,
    pub multifunction: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToiletAccessibility {
    pub wheelchair: Availability,
    pub baby_room: Availability,
    pub ostomy: Availability,
}

/// A public toilet block with its fixture counts and accessibility flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Toilet {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    pub fixtures: ToiletFixtures,
    pub accessibility: ToiletAccessibility,
}

impl Facility for Toilet {
    const KIND: FacilityKind = FacilityKind::Toilet;

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }
}
