//! Selection state machine and its projections.
//!
//! [`SelectionMachine`] owns which facility is open. Every transition is
//! rendered one way into the page URL through a [`Router`] and into the
//! map through a [`MapHandle`]; the URL is read back exactly once, by
//! [`SelectionMachine::hydrate_from_url`], after the catalog has loaded.

pub mod error;
pub mod machine;
pub mod map;
pub mod router;
pub mod session;
pub mod share;
pub mod url_state;

pub use error::ClipboardError;
pub use machine::{Selection, SelectionMachine};
pub use map::{initial_center, MapHandle, Viewport, DRAWER_LNG_OFFSET};
pub use router::{HistoryRouter, Router};
pub use session::MapSession;
pub use share::{copy_facility_info, copy_page_url, feedback_form_url, share_text, Clipboard};
pub use url_state::{deep_link, resolve_deep_link, with_selection, without_selection, DeepLink};
