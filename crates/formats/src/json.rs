//! Whole-document JSON array reader
//!
//! Brickset dumps are commonly shipped as a single top-level array. The
//! array is parsed up front, then handed out one set at a time so it
//! fits the same [`DatasetReader`](crate::DatasetReader) interface as the
//! streaming readers.

use crate::reader::open_source;
use crate::{Error, LegoSet, Result};
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Reader over a JSON array of catalog entries
pub struct JsonArrayReader {
    sets: std::vec::IntoIter<LegoSet>,
    total_records: usize,
    records_read: usize,
    total_bytes: Option<u64>,
}

impl JsonArrayReader {
    /// Open and parse a JSON array file, auto-detecting gzip compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (reader, total_bytes) = open_source(path)?;
        debug!("Parsing JSON array catalog: {:?}", path);
        let mut parsed = Self::from_reader(reader)?;
        parsed.total_bytes = total_bytes;
        Ok(parsed)
    }

    /// Parse a JSON array from any Read source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_reader(BufReader::new(reader))?;
        if !value.is_array() {
            return Err(Error::InvalidFile(
                "expected a top-level JSON array of sets".to_string(),
            ));
        }
        let sets: Vec<LegoSet> = serde_json::from_value(value)?;
        Ok(Self::from_sets(sets))
    }

    fn from_sets(sets: Vec<LegoSet>) -> Self {
        Self {
            total_records: sets.len(),
            sets: sets.into_iter(),
            records_read: 0,
            total_bytes: None,
        }
    }

    /// Get total file size if known
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Number of sets in the array
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    /// Number of sets handed out so far
    pub fn records_processed(&self) -> usize {
        self.records_read
    }
}

impl Iterator for JsonArrayReader {
    type Item = Result<LegoSet>;

    fn next(&mut self) -> Option<Self::Item> {
        let set = self.sets.next()?;
        self.records_read += 1;
        Some(Ok(set))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.sets.size_hint()
    }
}
