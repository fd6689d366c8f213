//! Read-only queries over a loaded catalog
//!
//! [`LegoSetRepository`] owns the full list of sets for its lifetime.
//! Every query is a single pass over that list and never mutates it,
//! so a repository can be shared freely behind `&` or `Arc`.

use crate::summary::DatasetSummary;
use crate::{Error, Result};
use ahash::{AHashMap, AHashSet};
use brickset_formats::{FileLoader, LegoSet, RecordLoader};
use std::path::Path;
use tracing::{debug, info};

/// Immutable catalog of LEGO sets with aggregate queries
#[derive(Debug, Clone)]
pub struct LegoSetRepository {
    sets: Vec<LegoSet>,
}

impl LegoSetRepository {
    /// Load a catalog file, detecting its format from the extension
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::load(&FileLoader::new(), path.as_ref())
    }

    /// Load a catalog through the given loader
    pub fn load<L: RecordLoader + ?Sized>(loader: &L, source: &Path) -> Result<Self> {
        let sets = loader.load(source)?;
        info!("Loaded {} sets from {:?}", sets.len(), source);
        Ok(Self { sets })
    }

    /// Build a repository from sets that are already in memory
    pub fn from_sets(sets: Vec<LegoSet>) -> Self {
        Self { sets }
    }

    /// Number of sets in the catalog
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// All sets, in source order
    pub fn sets(&self) -> &[LegoSet] {
        &self.sets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LegoSet> {
        self.sets.iter()
    }

    /// Whether any set is named exactly `name` (case-sensitive)
    pub fn exists_with_name(&self, name: &str) -> bool {
        self.sets.iter().any(|set| set.name == name)
    }

    /// Every set name upper-cased, in source order
    pub fn names_upper_case(&self) -> Vec<String> {
        self.sets.iter().map(|set| set.name.to_uppercase()).collect()
    }

    /// Mean piece count, truncated toward zero
    ///
    /// # Errors
    /// Returns [`Error::EmptyDataset`] when the catalog has no sets.
    pub fn average_pieces(&self) -> Result<u32> {
        if self.sets.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let total = self.total_pieces();
        let average = total / self.sets.len() as u64;
        debug!("Average pieces: {} / {} = {}", total, self.sets.len(), average);

        // The mean never exceeds the largest single count, which is a u32.
        Ok(average as u32)
    }

    /// Map each catalog number to its piece count
    ///
    /// Numbers are not unique; a later set overwrites an earlier one.
    pub fn number_to_pieces(&self) -> AHashMap<String, u32> {
        let mut map = AHashMap::with_capacity(self.sets.len());
        for set in &self.sets {
            map.insert(set.number.clone(), set.pieces);
        }
        map
    }

    /// Count how many sets carry each exact name
    pub fn name_occurrences(&self) -> AHashMap<String, usize> {
        let mut counts: AHashMap<String, usize> = AHashMap::new();
        for set in &self.sets {
            *counts.entry(set.name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Collect whole-catalog statistics in one pass
    pub fn summary(&self) -> DatasetSummary {
        let mut names: AHashSet<&str> = AHashSet::new();
        let mut numbers: AHashSet<&str> = AHashSet::new();
        for set in &self.sets {
            names.insert(&set.name);
            numbers.insert(&set.number);
        }

        DatasetSummary {
            total_sets: self.sets.len(),
            total_pieces: self.total_pieces(),
            distinct_names: names.len(),
            distinct_numbers: numbers.len(),
            average_pieces: self.average_pieces().ok(),
        }
    }

    fn total_pieces(&self) -> u64 {
        self.sets.iter().map(|set| u64::from(set.pieces)).sum()
    }
}

impl<'a> IntoIterator for &'a LegoSetRepository {
    type Item = &'a LegoSet;
    type IntoIter = std::slice::Iter<'a, LegoSet>;

    fn into_iter(self) -> Self::IntoIter {
        self.sets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(sets: &[(&str, &str, u32)]) -> LegoSetRepository {
        LegoSetRepository::from_sets(
            sets.iter()
                .map(|(name, number, pieces)| LegoSet::new(*name, *number, *pieces))
                .collect(),
        )
    }

    #[test]
    fn test_exists_with_name_is_exact() {
        let repo = repo(&[("Heart", "40462-1", 166), ("Castle", "6080-1", 674)]);

        assert!(repo.exists_with_name("Heart"));
        assert!(!repo.exists_with_name("heart"));
        assert!(!repo.exists_with_name("Hear"));
        assert!(!repo.exists_with_name("Heart "));
    }

    #[test]
    fn test_empty_repository_queries() {
        let repo = LegoSetRepository::from_sets(Vec::new());

        assert!(repo.is_empty());
        assert!(!repo.exists_with_name("Heart"));
        assert!(repo.names_upper_case().is_empty());
        assert!(repo.number_to_pieces().is_empty());
        assert!(repo.name_occurrences().is_empty());
        assert!(matches!(repo.average_pieces(), Err(Error::EmptyDataset)));
    }

    #[test]
    fn test_names_upper_case_keeps_order() {
        let repo = repo(&[("Heart", "1-1", 1), ("x-wing", "2-1", 2), ("Café Corner", "3-1", 3)]);

        assert_eq!(repo.names_upper_case(), vec!["HEART", "X-WING", "CAFÉ CORNER"]);
    }

    #[test]
    fn test_average_pieces_truncates() {
        let repo = repo(&[("A", "1-1", 10), ("B", "2-1", 20), ("C", "3-1", 3)]);
        assert_eq!(repo.average_pieces().unwrap(), 11);
    }

    #[test]
    fn test_average_pieces_does_not_overflow() {
        let repo = repo(&[("A", "1-1", u32::MAX), ("B", "2-1", u32::MAX)]);
        assert_eq!(repo.average_pieces().unwrap(), u32::MAX);
    }

    #[test]
    fn test_number_to_pieces_last_write_wins() {
        let repo = repo(&[("A", "1", 5), ("B", "2", 7), ("C", "1", 9)]);
        let map = repo.number_to_pieces();

        assert_eq!(map.len(), 2);
        assert_eq!(map["1"], 9);
        assert_eq!(map["2"], 7);
    }

    #[test]
    fn test_name_occurrences() {
        let repo = repo(&[
            ("A", "1-1", 1),
            ("B", "2-1", 2),
            ("A", "3-1", 3),
            ("Heart", "4-1", 4),
            ("heart", "5-1", 5),
        ]);
        let counts = repo.name_occurrences();

        assert_eq!(counts.len(), 4);
        assert_eq!(counts["A"], 2);
        assert_eq!(counts["B"], 1);
        assert_eq!(counts["Heart"], 1);
        assert_eq!(counts["heart"], 1);
        assert_eq!(counts.values().sum::<usize>(), repo.len());
    }

    #[test]
    fn test_summary() {
        let repo = repo(&[("A", "1", 10), ("B", "2", 20), ("A", "1", 3)]);
        let summary = repo.summary();

        assert_eq!(summary.total_sets, 3);
        assert_eq!(summary.total_pieces, 33);
        assert_eq!(summary.distinct_names, 2);
        assert_eq!(summary.distinct_numbers, 2);
        assert_eq!(summary.average_pieces, Some(11));
    }

    #[test]
    fn test_summary_of_empty_repository() {
        let summary = LegoSetRepository::from_sets(Vec::new()).summary();
        assert_eq!(summary, DatasetSummary::default());
    }

    #[test]
    fn test_repository_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LegoSetRepository>();
    }
}
