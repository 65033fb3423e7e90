//! Maps the feed's drifting record shapes onto [`Feedback`].
//!
//! Three shapes have been served over time:
//!
//! | Schema | Image field | Keys |
//! |--------|-------------|------|
//! | [`FeedSchema::EnglishMultiImage`] | `imageUrls` (array) | camelCase English |
//! | [`FeedSchema::EnglishSingleImage`] | `imageUrl` (scalar) | camelCase English |
//! | [`FeedSchema::LocalizedForm`] | single upload question | the form's question text |
//!
//! With [`FeedSchema::Auto`] each record is probed for known keys, so a feed
//! that mixes shapes (old rows kept after a form change) still normalizes.

use parkmap_core::{FeedSchema, Feedback};
use serde_json::{Map, Value};

use crate::types::FeedEnvelope;

/// Source key names for one record shape.
struct FieldNames {
    timestamp: &'static str,
    facility_type: &'static str,
    feedback_type: &'static str,
    details: &'static str,
    images: &'static str,
    facility_id: &'static str,
}

const ENGLISH_MULTI_IMAGE: FieldNames = FieldNames {
    timestamp: "timestamp",
    facility_type: "facilityType",
    feedback_type: "feedbackType",
    details: "details",
    images: "imageUrls",
    facility_id: "facilityId",
};

const ENGLISH_SINGLE_IMAGE: FieldNames = FieldNames {
    images: "imageUrl",
    ..ENGLISH_MULTI_IMAGE
};

const LOCALIZED_FORM: FieldNames = FieldNames {
    timestamp: "タイムスタンプ",
    facility_type: "【自動で入力されます。変更しないでください】施設タイプ",
    feedback_type: "どのような情報ですか？",
    details: "詳細について教えてください",
    images: "画像があればアプロードしてください",
    facility_id: "【自動で入力されます。変更しないでください】施設ID",
};

fn field_names(schema: FeedSchema) -> Option<&'static FieldNames> {
    match schema {
        FeedSchema::EnglishMultiImage => Some(&ENGLISH_MULTI_IMAGE),
        FeedSchema::EnglishSingleImage => Some(&ENGLISH_SINGLE_IMAGE),
        FeedSchema::LocalizedForm => Some(&LOCALIZED_FORM),
        FeedSchema::Auto => None,
    }
}

/// Identifies which shape a record was written in.
///
/// Never returns [`FeedSchema::Auto`]; `None` means no known key was found.
#[must_use]
pub fn detect_schema(record: &Map<String, Value>) -> Option<FeedSchema> {
    if record.contains_key(LOCALIZED_FORM.timestamp)
        || record.contains_key(LOCALIZED_FORM.facility_id)
    {
        Some(FeedSchema::LocalizedForm)
    } else if record.contains_key(ENGLISH_MULTI_IMAGE.images) {
        Some(FeedSchema::EnglishMultiImage)
    } else if record.contains_key(ENGLISH_SINGLE_IMAGE.images)
        || record.contains_key(ENGLISH_SINGLE_IMAGE.timestamp)
    {
        Some(FeedSchema::EnglishSingleImage)
    } else {
        None
    }
}

/// Renders a scalar cell as text. Spreadsheet-backed feeds emit numeric ids
/// as JSON numbers.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_owned(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Arrays pass through (string entries only), a non-empty string becomes a
/// single-element list, anything else is empty.
fn image_urls(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_owned()],
        _ => Vec::new(),
    }
}

/// Normalizes one raw record.
///
/// Returns `None` for non-object records, records whose shape cannot be
/// detected under [`FeedSchema::Auto`], and records without a timestamp
/// (incomplete form submissions).
#[must_use]
pub fn normalize_record(record: &Value, schema: FeedSchema) -> Option<Feedback> {
    let object = record.as_object()?;
    let schema = match schema {
        FeedSchema::Auto => detect_schema(object)?,
        forced => forced,
    };
    let names = field_names(schema)?;

    let timestamp = text(object.get(names.timestamp));
    if timestamp.is_empty() {
        return None;
    }

    Some(Feedback {
        timestamp,
        facility_type: text(object.get(names.facility_type)),
        feedback_type: text(object.get(names.feedback_type)),
        details: text(object.get(names.details)),
        image_urls: image_urls(object.get(names.images)),
        facility_id: text(object.get(names.facility_id)),
    })
}

/// Normalizes every record in `envelope`, preserving feed order.
#[must_use]
pub fn normalize_envelope(envelope: &FeedEnvelope, schema: FeedSchema) -> Vec<Feedback> {
    let feedback: Vec<Feedback> = envelope
        .records
        .iter()
        .filter_map(|record| normalize_record(record, schema))
        .collect();

    let dropped = envelope.records.len() - feedback.len();
    if dropped > 0 {
        tracing::debug!(
            schema = %schema,
            kept = feedback.len(),
            dropped,
            "dropped feedback records without timestamp or recognizable shape"
        );
    }
    feedback
}
