//! Loaders for the park and public-toilet CSV extracts.
//!
//! Both extracts are read positionally (the header row is discarded) and
//! rows without a name or with unusable coordinates are dropped. The
//! `load_*` entry points never fail: an unreadable extract yields an empty
//! list and an error event, so the map still renders whatever did load.

pub mod columns;
pub mod error;
pub mod loader;

pub use error::LoadError;
pub use loader::{
    load_catalog, load_parks, load_toilets, parse_parks, parse_toilets, read_parks_csv,
    read_toilets_csv,
};
