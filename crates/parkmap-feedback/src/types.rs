use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status reported by [`FeedEnvelope::error`].
pub const STATUS_ERROR: &str = "error";

/// Raw `{status, records}` envelope returned by the feed.
///
/// Records stay untyped here; their field names depend on which version of
/// the form backend produced them (see [`crate::normalize`]).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeedEnvelope {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub records: Vec<Value>,
}

impl FeedEnvelope {
    /// The envelope callers see when the feed could not be fetched.
    #[must_use]
    pub fn error() -> Self {
        Self {
            status: STATUS_ERROR.to_owned(),
            records: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.status == STATUS_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let env: FeedEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(env.status, "");
        assert!(env.records.is_empty());
        assert!(!env.is_error());
    }

    #[test]
    fn error_envelope_has_no_records() {
        let env = FeedEnvelope::error();
        assert!(env.is_error());
        assert!(env.records.is_empty());
    }
}
