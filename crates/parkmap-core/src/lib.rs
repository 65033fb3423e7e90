//! Shared domain model for the park and public-toilet map.
//!
//! Holds the facility and feedback types every other crate exchanges, the
//! coordinate helpers used to validate source rows, and the environment-driven
//! application configuration.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod coords;
pub mod error;
pub mod facility;
pub mod feedback;

pub use app_config::{AppConfig, Environment};
pub use catalog::{FacilityCatalog, FacilityRef};
pub use config::{load_app_config, load_app_config_from_env};
pub use coords::{is_valid_coordinates, to_numeric_position, Coordinates, LatLng};
pub use error::{ConfigError, CoreError};
pub use facility::{
    Availability, Facility, FacilityKind, Park, StallCounts, Toilet, ToiletAccessibility,
    ToiletFixtures,
};
pub use feedback::{parse_timestamp, FeedSchema, Feedback};
