//! Whole-catalog statistics

use serde::Serialize;

/// Statistics for a loaded catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Number of sets in the catalog
    pub total_sets: usize,
    /// Sum of all piece counts
    pub total_pieces: u64,
    /// Number of distinct set names
    pub distinct_names: usize,
    /// Number of distinct catalog numbers
    pub distinct_numbers: usize,
    /// Truncated mean piece count, absent for an empty catalog
    pub average_pieces: Option<u32>,
}

impl DatasetSummary {
    /// Sets sharing a number with an earlier set
    pub fn shadowed_numbers(&self) -> usize {
        self.total_sets - self.distinct_numbers
    }

    /// Percentage of sets that repeat a name already seen earlier
    ///
    /// The first set carrying each name is not counted, so `[A, A, B]`
    /// gives one repeat out of three sets.
    pub fn duplicate_name_rate(&self) -> f64 {
        if self.total_sets == 0 {
            0.0
        } else {
            ((self.total_sets - self.distinct_names) as f64 / self.total_sets as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary_rates() {
        let summary = DatasetSummary::default();
        assert_eq!(summary.shadowed_numbers(), 0);
        assert_eq!(summary.duplicate_name_rate(), 0.0);
    }

    #[test]
    fn test_summary_rates() {
        let summary = DatasetSummary {
            total_sets: 4,
            total_pieces: 100,
            distinct_names: 3,
            distinct_numbers: 2,
            average_pieces: Some(25),
        };
        assert_eq!(summary.shadowed_numbers(), 2);
        assert_eq!(summary.duplicate_name_rate(), 25.0);
    }

    #[test]
    fn test_duplicate_name_rate_skips_first_occurrence() {
        let summary = DatasetSummary {
            total_sets: 3,
            distinct_names: 2,
            distinct_numbers: 3,
            ..Default::default()
        };
        let rate = summary.duplicate_name_rate();
        assert!((rate - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary_serializes_missing_average_as_null() {
        let json = serde_json::to_value(DatasetSummary::default()).unwrap();
        assert!(json["average_pieces"].is_null());
        assert_eq!(json["total_sets"], 0);
    }
}
