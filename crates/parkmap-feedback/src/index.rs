use std::cmp::Reverse;

use parkmap_core::{FacilityCatalog, Feedback};

/// Normalized feedback, queryable per facility.
///
/// Association is exact string equality on `facility_id`. The feed assigns
/// ids independently of the facility extracts, so [`FeedbackIndex::orphans`]
/// reports records that match nothing instead of assuming they line up.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedbackIndex {
    records: Vec<Feedback>,
}

impl FeedbackIndex {
    #[must_use]
    pub fn new(records: Vec<Feedback>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[Feedback] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All feedback for `facility_id`, newest first.
    ///
    /// Equal timestamps keep feed order; unparseable timestamps sort last.
    #[must_use]
    pub fn feedback_for(&self, facility_id: &str) -> Vec<&Feedback> {
        let matches = self
            .records
            .iter()
            .filter(|f| f.facility_id == facility_id)
            .collect();
        newest_first(matches)
    }

    /// Every record, newest first.
    #[must_use]
    pub fn all_newest_first(&self) -> Vec<&Feedback> {
        newest_first(self.records.iter().collect())
    }

    /// Records whose `facility_id` names no loaded park or toilet.
    #[must_use]
    pub fn orphans(&self, catalog: &FacilityCatalog) -> Vec<&Feedback> {
        self.records
            .iter()
            .filter(|f| !catalog.contains_id(&f.facility_id))
            .collect()
    }

    /// Logs how many records could not be associated. Returns the count.
    pub fn report_orphans(&self, catalog: &FacilityCatalog) -> usize {
        let orphans = self.orphans(catalog);
        if !orphans.is_empty() {
            for fb in &orphans {
                tracing::debug!(
                    facility_id = %fb.facility_id,
                    facility_type = %fb.facility_type,
                    timestamp = %fb.timestamp,
                    "feedback references unknown facility"
                );
            }
            tracing::warn!(
                orphans = orphans.len(),
                total = self.records.len(),
                "feedback records do not match any loaded facility"
            );
        }
        orphans.len()
    }
}

fn newest_first(mut matches: Vec<&Feedback>) -> Vec<&Feedback> {
    // Stable: ties and unparseable timestamps keep feed order.
    matches.sort_by_cached_key(|f| Reverse(f.submitted_at()));
    matches
}

#[cfg(test)]
mod tests {
    use parkmap_core::{Coordinates, Park};

    use super::*;

    fn fb(facility_id: &str, timestamp: &str, details: &str) -> Feedback {
        Feedback {
            timestamp: timestamp.to_owned(),
            facility_type: "公園".to_owned(),
            feedback_type: "info".to_owned(),
            details: details.to_owned(),
            image_urls: Vec::new(),
            facility_id: facility_id.to_owned(),
        }
    }

    #[test]
    fn feedback_for_filters_and_sorts_newest_first() {
        let index = FeedbackIndex::new(vec![
            fb("1", "2024-01-02", "older"),
            fb("1", "2024-01-05", "newer"),
            fb("2", "2024-01-03", "other"),
        ]);
        let got: Vec<&str> = index
            .feedback_for("1")
            .iter()
            .map(|f| f.timestamp.as_str())
            .collect();
        assert_eq!(got, vec!["2024-01-05", "2024-01-02"]);
    }

    #[test]
    fn ties_keep_feed_order() {
        let index = FeedbackIndex::new(vec![
            fb("1", "2024-01-05", "first"),
            fb("1", "2024-01-05", "second"),
            fb("1", "2024-01-01", "third"),
        ]);
        let got: Vec<&str> = index
            .feedback_for("1")
            .iter()
            .map(|f| f.details.as_str())
            .collect();
        assert_eq!(got, vec!["first", "second", "third"]);
    }

    #[test]
    fn mixed_timestamp_formats_compare_by_instant() {
        let index = FeedbackIndex::new(vec![
            fb("1", "2024/01/03 09:00:00", "slash"),
            fb("1", "2024-01-04T00:00:00.000Z", "iso"),
            fb("1", "not a date", "garbage"),
        ]);
        let got: Vec<&str> = index
            .feedback_for("1")
            .iter()
            .map(|f| f.details.as_str())
            .collect();
        assert_eq!(got, vec!["iso", "slash", "garbage"]);
    }

    #[test]
    fn unknown_id_yields_empty() {
        let index = FeedbackIndex::new(vec![fb("1", "2024-01-02", "x")]);
        assert!(index.feedback_for("999").is_empty());
        assert!(FeedbackIndex::default().feedback_for("1").is_empty());
    }

    #[test]
    fn ids_match_exactly() {
        let index = FeedbackIndex::new(vec![fb("01", "2024-01-02", "padded")]);
        assert!(index.feedback_for("1").is_empty());
    }

    #[test]
    fn orphans_are_records_without_a_facility() {
        let catalog = FacilityCatalog::new(
            vec![Park {
                id: "1".to_owned(),
                name: "城山公園".to_owned(),
                address: "小山市".to_owned(),
                coordinates: Coordinates::new("36.31", "139.80"),
            }],
            vec![],
        );
        let index = FeedbackIndex::new(vec![
            fb("1", "2024-01-02", "known"),
            fb("77", "2024-01-03", "unknown"),
        ]);
        let orphans = index.orphans(&catalog);
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].facility_id, "77");
        assert_eq!(index.report_orphans(&catalog), 1);
    }
}
