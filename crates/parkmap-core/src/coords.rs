//! Coordinate parsing and validity checks for source rows.
//!
//! Facility extracts store latitude and longitude as text. An unset
//! spreadsheet cell exports as `0` (or nothing at all), so a zero coordinate
//! is treated as missing data.

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair exactly as it appeared in the source extract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Self {
        Self {
            latitude: latitude.into(),
            longitude: longitude.into(),
        }
    }
}

/// Numeric map position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

fn parse_component(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Converts source coordinate strings into a numeric position.
///
/// Performs no validation: unparseable components come back as `NaN`.
/// Callers are expected to have filtered rows through
/// [`is_valid_coordinates`] first.
#[must_use]
pub fn to_numeric_position(coords: &Coordinates) -> LatLng {
    LatLng::new(
        parse_component(&coords.latitude),
        parse_component(&coords.longitude),
    )
}

/// Returns `true` when both components parse to finite, non-zero numbers.
#[must_use]
pub fn is_valid_coordinates(coords: &Coordinates) -> bool {
    let LatLng { lat, lng } = to_numeric_position(coords);
    lat.is_finite() && lng.is_finite() && lat != 0.0 && lng != 0.0
}
