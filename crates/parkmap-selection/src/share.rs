//! Outbound links and clipboard sharing.

use parkmap_core::{FacilityKind, FacilityRef};
use url::Url;

use crate::error::ClipboardError;
use crate::url_state::with_selection;

const FORM_TYPE_ENTRY: &str = "entry.1276758939";
const FORM_ID_ENTRY: &str = "entry.653877169";

/// Builds the pre-filled feedback form link for a facility.
///
/// # Errors
///
/// Returns [`url::ParseError`] if `form_base` is not an absolute URL.
pub fn feedback_form_url(
    form_base: &str,
    kind: FacilityKind,
    id: &str,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(form_base)?;
    url.query_pairs_mut()
        .append_pair("usp", "pp_url")
        .append_pair(FORM_TYPE_ENTRY, kind.label())
        .append_pair(FORM_ID_ENTRY, id);
    Ok(url)
}

/// Text copied by the share action: name, kind, address and a link that
/// reopens this facility.
#[must_use]
pub fn share_text(facility: &FacilityRef, page_url: &Url) -> String {
    let link = with_selection(page_url, facility.kind(), facility.id());
    format!(
        "{}（{}）\n住所：{}\n\n地図：{}",
        facility.name(),
        facility.kind().label(),
        facility.address(),
        link
    )
}

pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ClipboardError`] when the environment refuses the write.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

fn copy(clipboard: &mut impl Clipboard, text: &str, what: &str) -> bool {
    match clipboard.write_text(text) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, what, "copy to clipboard failed");
            false
        }
    }
}

/// Copies [`share_text`] for `facility`. Returns whether the copy happened;
/// failures are logged and otherwise ignored.
pub fn copy_facility_info(
    clipboard: &mut impl Clipboard,
    facility: &FacilityRef,
    page_url: &Url,
) -> bool {
    copy(clipboard, &share_text(facility, page_url), "facility info")
}

/// Copies the current page URL.
pub fn copy_page_url(clipboard: &mut impl Clipboard, page_url: &Url) -> bool {
    copy(clipboard, page_url.as_str(), "page url")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parkmap_core::{Coordinates, Park};

    use super::*;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Option<String>,
        deny: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.deny {
                return Err(ClipboardError::Denied("NotAllowedError".to_owned()));
            }
            self.contents = Some(text.to_owned());
            Ok(())
        }
    }

    fn park() -> FacilityRef {
        FacilityRef::Park(Arc::new(Park {
            id: "P-7".to_owned(),
            name: "城山公園".to_owned(),
            address: "小山市城山町1-1".to_owned(),
            coordinates: Coordinates::new("36.31", "139.80"),
        }))
    }

    #[test]
    fn form_url_carries_label_and_id() {
        let url = feedback_form_url(
            "https://docs.example.com/forms/d/e/abc/viewform",
            FacilityKind::Toilet,
            "42",
        )
        .unwrap();
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("usp".to_owned(), "pp_url".to_owned()),
                ("entry.1276758939".to_owned(), "トイレ".to_owned()),
                ("entry.653877169".to_owned(), "42".to_owned()),
            ]
        );
    }

    #[test]
    fn form_url_rejects_relative_base() {
        assert!(feedback_form_url("viewform", FacilityKind::Park, "1").is_err());
    }

    #[test]
    fn share_text_layout() {
        let page = Url::parse("https://map.example/?lang=ja").unwrap();
        assert_eq!(
            share_text(&park(), &page),
            "城山公園（公園）\n住所：小山市城山町1-1\n\n地図：https://map.example/?lang=ja&type=park&id=P-7"
        );
    }

    #[test]
    fn copy_reports_success() {
        let mut clipboard = MemoryClipboard::default();
        let page = Url::parse("https://map.example/").unwrap();
        assert!(copy_facility_info(&mut clipboard, &park(), &page));
        assert!(clipboard.contents.unwrap().starts_with("城山公園（公園）"));
    }

    #[test]
    fn denied_clipboard_is_not_fatal() {
        let mut clipboard = MemoryClipboard {
            deny: true,
            ..MemoryClipboard::default()
        };
        let page = Url::parse("https://map.example/").unwrap();
        assert!(!copy_page_url(&mut clipboard, &page));
        assert!(clipboard.contents.is_none());
    }
}
