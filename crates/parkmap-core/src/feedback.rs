//! Canonical feedback record and the feed schema selector.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::facility::FacilityKind;

/// A visitor report about one facility, in the shape every consumer reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    /// Submission time as sent by the feed; never empty.
    pub timestamp: String,
    /// Facility type label as sent by the feed (usually `公園` / `トイレ`).
    pub facility_type: String,
    /// Free-text category chosen by the submitter.
    pub feedback_type: String,
    pub details: String,
    pub image_urls: Vec<String>,
    /// Loosely-typed foreign key to [`crate::Facility::id`].
    pub facility_id: String,
}

impl Feedback {
    /// Parsed submission time, if the timestamp is in a recognised format.
    #[must_use]
    pub fn submitted_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Facility kind named by the record, accepting the URL tag or the
    /// localized label.
    #[must_use]
    pub fn facility_kind(&self) -> Option<FacilityKind> {
        FacilityKind::from_any(&self.facility_type)
    }
}

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parses the "ISO-ish" timestamps seen in the feed.
///
/// Accepts RFC 3339, zone-less date-times (read as UTC) and bare dates
/// (midnight UTC). Returns `None` for anything else.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }
    None
}

/// Which record shape the feedback feed is expected to send.
///
/// The feed has changed shape over its lifetime; `Auto` probes each record
/// for known keys instead of assuming one layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSchema {
    #[default]
    Auto,
    /// English keys with an `imageUrls` list.
    EnglishMultiImage,
    /// English keys with a single optional `imageUrl`.
    EnglishSingleImage,
    /// Keys copied verbatim from the form's (Japanese) question text.
    LocalizedForm,
}

impl FeedSchema {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FeedSchema::Auto => "auto",
            FeedSchema::EnglishMultiImage => "english_multi_image",
            FeedSchema::EnglishSingleImage => "english_single_image",
            FeedSchema::LocalizedForm => "localized_form",
        }
    }
}

impl fmt::Display for FeedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedSchema {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(FeedSchema::Auto),
            "english_multi_image" => Ok(FeedSchema::EnglishMultiImage),
            "english_single_image" => Ok(FeedSchema::EnglishSingleImage),
            "localized_form" => Ok(FeedSchema::LocalizedForm),
            other => Err(CoreError::InvalidFeedSchema(other.to_string())),
        }
    }
}
