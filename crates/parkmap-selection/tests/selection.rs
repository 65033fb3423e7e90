//! End-to-end selection behaviour against an in-memory history.

use parkmap_core::{
    Availability, Coordinates, FacilityCatalog, FacilityKind, LatLng, Park, Toilet,
    ToiletAccessibility, ToiletFixtures,
};
use parkmap_selection::{
    deep_link, initial_center, HistoryRouter, Router, Selection, SelectionMachine, Viewport,
};

const DEFAULT_CENTER: LatLng = LatLng::new(36.3147, 139.8003);
const ZOOM: u8 = 13;

fn toilet(id: &str, lat: &str, lng: &str) -> Toilet {
    Toilet {
        id: id.to_owned(),
        name: format!("公衆トイレ{id}"),
        address: "小山市".to_owned(),
        coordinates: Coordinates::new(lat, lng),
        fixtures: ToiletFixtures::default(),
        accessibility: ToiletAccessibility {
            wheelchair: Availability::Available,
            baby_room: Availability::Available,
            ostomy: Availability::Unavailable,
        },
    }
}

fn catalog() -> FacilityCatalog {
    FacilityCatalog::new(
        vec![
            Park {
                id: "A".to_owned(),
                name: "城山公園".to_owned(),
                address: "小山市城山町".to_owned(),
                coordinates: Coordinates::new("36.31", "139.80"),
            },
            Park {
                id: "B".to_owned(),
                name: "思川緑地".to_owned(),
                address: "小山市中久喜".to_owned(),
                coordinates: Coordinates::new("36.33", "139.78"),
            },
        ],
        vec![toilet("42", "36.3126", "139.8050")],
    )
}

fn machine(url: &str) -> SelectionMachine<HistoryRouter, Viewport> {
    SelectionMachine::new(
        HistoryRouter::parse(url).expect("valid start url"),
        Viewport::new(DEFAULT_CENTER, ZOOM),
        ZOOM,
    )
}

#[test]
fn selecting_a_then_b_leaves_only_b() {
    let cat = catalog();
    let mut m = machine("https://map.example/");
    m.select(cat.find(FacilityKind::Park, "A").unwrap());
    m.select(cat.find(FacilityKind::Park, "B").unwrap());

    let selected = m.selected().expect("B is open");
    assert_eq!(selected.id(), "B");
    let link = deep_link(m.router().current()).expect("url carries selection");
    assert_eq!((link.kind.as_str(), link.id.as_str()), ("park", "B"));
    assert_eq!(m.map().center, LatLng::new(36.33, 139.78));
    assert_eq!(m.router().push_count(), 2);
}

#[test]
fn switching_kind_rewrites_both_params() {
    let cat = catalog();
    let mut m = machine("https://map.example/");
    m.select(cat.find(FacilityKind::Park, "A").unwrap());
    m.select(cat.find(FacilityKind::Toilet, "42").unwrap());
    assert_eq!(m.router().current().query(), Some("type=toilet&id=42"));
}

#[test]
fn close_removes_only_selection_params() {
    let cat = catalog();
    let mut m = machine("https://map.example/?lang=ja");
    m.select(cat.find(FacilityKind::Toilet, "42").unwrap());
    assert_eq!(m.router().current().query(), Some("lang=ja&type=toilet&id=42"));

    m.close();
    assert_eq!(m.selection(), &Selection::Closed);
    assert_eq!(m.router().current().query(), Some("lang=ja"));
}

#[test]
fn reselecting_is_idempotent_but_recentres() {
    let cat = catalog();
    let mut m = machine("https://map.example/");
    let facility = cat.find(FacilityKind::Toilet, "42").unwrap();
    m.select(facility.clone());
    let url_after_first = m.router().current().clone();
    m.select(facility);
    assert_eq!(m.router().current(), &url_after_first);
    assert_eq!(m.router().push_count(), 2);
    assert_eq!(m.selected_key(), Some((FacilityKind::Toilet, "42")));
}

#[test]
fn hydration_opens_known_toilet() {
    let mut m = machine("https://map.example/?type=toilet&id=42");
    assert!(m.hydrate_from_url(&catalog()));
    assert_eq!(m.selected_key(), Some((FacilityKind::Toilet, "42")));
    assert_eq!(m.map().center, LatLng::new(36.3126, 139.8050));
    assert_eq!(m.map().zoom, ZOOM);
}

#[test]
fn hydration_leaves_stale_params_untouched() {
    let mut m = machine("https://map.example/?type=toilet&id=999");
    assert!(!m.hydrate_from_url(&catalog()));
    assert_eq!(m.selection(), &Selection::Closed);
    assert_eq!(m.router().current().query(), Some("type=toilet&id=999"));
    assert_eq!(m.router().push_count(), 0);
    assert_eq!(m.map().center, DEFAULT_CENTER);
}

#[test]
fn hydration_against_empty_catalog_finds_nothing() {
    let mut m = machine("https://map.example/?type=toilet&id=42");
    assert!(!m.hydrate_from_url(&FacilityCatalog::default()));
    assert!(!m.drawer_open());
}

#[test]
fn first_paint_centre_matches_deep_link() {
    let url = HistoryRouter::parse("https://map.example/?type=toilet&id=42").unwrap();
    let center = initial_center(&catalog(), url.current(), DEFAULT_CENTER);
    assert!((center.lng - (139.8050 + 0.06)).abs() < 1e-9);
}
