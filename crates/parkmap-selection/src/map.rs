use parkmap_core::{FacilityCatalog, LatLng};
use url::Url;

use crate::url_state::resolve_deep_link;

/// Longitude shift applied to a deep-linked first paint so the detail
/// drawer does not cover the marker.
pub const DRAWER_LNG_OFFSET: f64 = 0.06;

/// Handle to the rendered map widget.
///
/// Passed to the selection machine explicitly; the machine never looks the
/// widget up on its own.
pub trait MapHandle {
    fn set_view(&mut self, center: LatLng, zoom: u8);
}

/// The last view requested of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

impl Viewport {
    #[must_use]
    pub const fn new(center: LatLng, zoom: u8) -> Self {
        Self { center, zoom }
    }
}

impl MapHandle for Viewport {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }
}

/// Centre for the first paint of `url`.
///
/// A resolvable deep link centres east of the facility by
/// [`DRAWER_LNG_OFFSET`]; anything else uses `default_center`.
#[must_use]
pub fn initial_center(catalog: &FacilityCatalog, url: &Url, default_center: LatLng) -> LatLng {
    resolve_deep_link(catalog, url).map_or(default_center, |facility| {
        let position = facility.position();
        LatLng::new(position.lat, position.lng + DRAWER_LNG_OFFSET)
    })
}

#[cfg(test)]
mod tests {
    use parkmap_core::{Coordinates, Park};

    use super::*;

    const DEFAULT: LatLng = LatLng::new(36.3147, 139.8003);

    fn catalog() -> FacilityCatalog {
        FacilityCatalog::new(
            vec![Park {
                id: "P-1".to_owned(),
                name: "城山公園".to_owned(),
                address: "小山市".to_owned(),
                coordinates: Coordinates::new("36.30", "139.70"),
            }],
            vec![],
        )
    }

    #[test]
    fn deep_link_shifts_east() {
        let url = Url::parse("https://map.example/?type=park&id=P-1").unwrap();
        let center = initial_center(&catalog(), &url, DEFAULT);
        assert!((center.lat - 36.30).abs() < 1e-9);
        assert!((center.lng - 139.76).abs() < 1e-9);
    }

    #[test]
    fn unresolved_link_uses_default() {
        let wrong_kind = Url::parse("https://map.example/?type=toilet&id=P-1").unwrap();
        let none = Url::parse("https://map.example/").unwrap();
        assert_eq!(initial_center(&catalog(), &wrong_kind, DEFAULT), DEFAULT);
        assert_eq!(initial_center(&catalog(), &none, DEFAULT), DEFAULT);
    }

    #[test]
    fn viewport_records_last_view() {
        let mut view = Viewport::new(DEFAULT, 13);
        view.set_view(LatLng::new(1.0, 2.0), 15);
        assert_eq!(view, Viewport::new(LatLng::new(1.0, 2.0), 15));
    }
}
