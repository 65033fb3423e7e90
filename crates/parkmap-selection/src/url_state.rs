//! Reading and writing the `type`/`id` query parameters.
//!
//! Writes follow browser `URLSearchParams.set` semantics: an existing key is
//! replaced in place (later duplicates removed), a missing key is appended,
//! and every other parameter keeps its position.

use parkmap_core::{FacilityCatalog, FacilityKind, FacilityRef};
use url::Url;

pub const TYPE_PARAM: &str = "type";
pub const ID_PARAM: &str = "id";

/// The raw deep-link parameters found in a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    pub kind: String,
    pub id: String,
}

/// Extracts `type` and `id`. Both must be present and non-empty.
#[must_use]
pub fn deep_link(url: &Url) -> Option<DeepLink> {
    let mut kind = None;
    let mut id = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            TYPE_PARAM if kind.is_none() => kind = Some(value.into_owned()),
            ID_PARAM if id.is_none() => id = Some(value.into_owned()),
            _ => {}
        }
    }
    match (kind, id) {
        (Some(kind), Some(id)) if !kind.is_empty() && !id.is_empty() => Some(DeepLink { kind, id }),
        _ => None,
    }
}

/// Looks up the facility a URL points at.
///
/// Unknown `type` tags and ids that match nothing both resolve to `None`.
#[must_use]
pub fn resolve_deep_link(catalog: &FacilityCatalog, url: &Url) -> Option<FacilityRef> {
    let link = deep_link(url)?;
    let kind = link.kind.parse::<FacilityKind>().ok()?;
    catalog.find(kind, &link.id)
}

fn pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn write_pairs(url: &mut Url, pairs: &[(String, String)]) {
    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_owned();
            let mut idx = 0;
            pairs.retain(|(k, _)| {
                let keep = k != key || idx == first;
                idx += 1;
                keep
            });
        }
        None => pairs.push((key.to_owned(), value.to_owned())),
    }
}

/// Returns `url` with `type` and `id` pointing at the given facility.
#[must_use]
pub fn with_selection(url: &Url, kind: FacilityKind, id: &str) -> Url {
    let mut pairs = pairs(url);
    set_param(&mut pairs, TYPE_PARAM, kind.as_str());
    set_param(&mut pairs, ID_PARAM, id);
    let mut next = url.clone();
    write_pairs(&mut next, &pairs);
    next
}

/// Returns `url` with every `type` and `id` parameter removed.
#[must_use]
pub fn without_selection(url: &Url) -> Url {
    let pairs: Vec<_> = pairs(url)
        .into_iter()
        .filter(|(k, _)| k != TYPE_PARAM && k != ID_PARAM)
        .collect();
    let mut next = url.clone();
    write_pairs(&mut next, &pairs);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn deep_link_requires_both_params() {
        assert_eq!(
            deep_link(&url("https://map.example/?type=toilet&id=42")),
            Some(DeepLink {
                kind: "toilet".to_owned(),
                id: "42".to_owned()
            })
        );
        assert_eq!(deep_link(&url("https://map.example/?type=toilet")), None);
        assert_eq!(deep_link(&url("https://map.example/?id=42")), None);
        assert_eq!(deep_link(&url("https://map.example/?type=&id=42")), None);
    }

    #[test]
    fn with_selection_appends_missing_params() {
        let next = with_selection(&url("https://map.example/?lang=ja"), FacilityKind::Park, "P-1");
        assert_eq!(next.query(), Some("lang=ja&type=park&id=P-1"));
    }

    #[test]
    fn with_selection_replaces_in_place() {
        let next = with_selection(
            &url("https://map.example/?type=park&lang=ja&id=1&id=2"),
            FacilityKind::Toilet,
            "42",
        );
        assert_eq!(next.query(), Some("type=toilet&lang=ja&id=42"));
    }

    #[test]
    fn with_selection_encodes_ids() {
        let next = with_selection(&url("https://map.example/"), FacilityKind::Park, "A&B 1");
        assert_eq!(next.query(), Some("type=park&id=A%26B+1"));
        assert_eq!(deep_link(&next).unwrap().id, "A&B 1");
    }

    #[test]
    fn without_selection_keeps_unrelated_params() {
        let next = without_selection(&url("https://map.example/?type=toilet&lang=ja&id=42"));
        assert_eq!(next.query(), Some("lang=ja"));
    }

    #[test]
    fn without_selection_drops_empty_query() {
        let next = without_selection(&url("https://map.example/?type=toilet&id=42"));
        assert_eq!(next.as_str(), "https://map.example/");
    }

    #[test]
    fn without_selection_keeps_fragment() {
        let next = without_selection(&url("https://map.example/?id=1#legend"));
        assert_eq!(next.as_str(), "https://map.example/#legend");
    }
}
