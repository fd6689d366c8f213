//! Unified dataset reader abstraction
//!
//! Provides a common interface for reading catalog dumps with automatic
//! format detection based on file extensions.

use crate::{json::JsonArrayReader, jsonl::JsonlReader, Error, LegoSet, Result};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

/// Trait for dataset readers providing unified interface
pub trait DatasetReader: Iterator<Item = Result<LegoSet>> {
    /// Get total file size in bytes if known
    fn total_bytes(&self) -> Option<u64>;

    /// Get total number of records if known before reading
    fn total_records(&self) -> Option<u64>;

    /// Get number of bytes processed so far
    fn bytes_processed(&self) -> u64;

    /// Get the number of records processed
    fn records_processed(&self) -> usize;
}

/// On-disk layout of a catalog dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    /// A single top-level JSON array
    Json,
    /// One JSON object per line
    Jsonl,
}

impl DatasetFormat {
    /// Detect the format from a path's extension, looking through a trailing `.gz`
    pub fn detect(path: &Path) -> Result<Self> {
        let inner = if is_gzip(path) {
            path.file_stem().map(Path::new)
        } else {
            Some(path)
        };

        let extension = inner
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat("No file extension found".to_string()))?;

        extension.parse()
    }
}

impl FromStr for DatasetFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DatasetFormat::Json),
            "jsonl" | "ndjson" => Ok(DatasetFormat::Jsonl),
            other => Err(Error::UnsupportedFormat(format!(
                "Unsupported file extension: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetFormat::Json => f.write_str("json"),
            DatasetFormat::Jsonl => f.write_str("jsonl"),
        }
    }
}

fn is_gzip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("gz"))
        .unwrap_or(false)
}

/// Open a file for reading, decompressing `.gz` transparently.
///
/// The byte total is only reported for uncompressed files.
pub(crate) fn open_source(path: &Path) -> Result<(Box<dyn Read>, Option<u64>)> {
    let file = File::open(path)?;
    if is_gzip(path) {
        Ok((Box::new(GzDecoder::new(file)), None))
    } else {
        let total_bytes = file.metadata()?.len();
        Ok((Box::new(file), Some(total_bytes)))
    }
}

/// JSONL dataset reader wrapper
pub struct JsonlDatasetReader {
    reader: JsonlReader<Box<dyn Read>>,
}

impl Iterator for JsonlDatasetReader {
    type Item = Result<LegoSet>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next()
    }
}

impl DatasetReader for JsonlDatasetReader {
    fn total_bytes(&self) -> Option<u64> {
        self.reader.total_bytes()
    }

    fn total_records(&self) -> Option<u64> {
        None // JSONL has no up-front record count
    }

    fn bytes_processed(&self) -> u64 {
        self.reader.bytes_processed()
    }

    fn records_processed(&self) -> usize {
        self.reader.records_processed()
    }
}

/// JSON array dataset reader wrapper
pub struct JsonDatasetReader {
    reader: JsonArrayReader,
}

impl Iterator for JsonDatasetReader {
    type Item = Result<LegoSet>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.next()
    }
}

impl DatasetReader for JsonDatasetReader {
    fn total_bytes(&self) -> Option<u64> {
        self.reader.total_bytes()
    }

    fn total_records(&self) -> Option<u64> {
        Some(self.reader.total_records() as u64)
    }

    fn bytes_processed(&self) -> u64 {
        // The document is parsed up front, so this is an estimate
        // proportional to the sets handed out.
        match self.total_bytes() {
            Some(total_bytes) => {
                let records = self.records_processed() as u64;
                let total_records = (self.reader.total_records() as u64).max(1);
                (records * total_bytes) / total_records
            }
            None => 0,
        }
    }

    fn records_processed(&self) -> usize {
        self.reader.records_processed()
    }
}

/// Factory function to open a dataset with automatic format detection
///
/// Supported formats:
/// - `.json` - JSON array of sets
/// - `.jsonl`, `.ndjson` - JSON Lines format
/// - any of the above with a trailing `.gz`
pub fn open_dataset<P: AsRef<Path>>(path: P) -> Result<Box<dyn DatasetReader>> {
    let path = path.as_ref();
    let format = DatasetFormat::detect(path)?;
    open_dataset_with_format(path, format)
}

/// Open a dataset, bypassing extension detection
pub fn open_dataset_with_format<P: AsRef<Path>>(
    path: P,
    format: DatasetFormat,
) -> Result<Box<dyn DatasetReader>> {
    let path = path.as_ref();

    info!("Opening dataset: {:?} (format: {})", path, format);

    match format {
        DatasetFormat::Json => {
            let reader = JsonArrayReader::open(path)?;
            Ok(Box::new(JsonDatasetReader { reader }))
        }
        DatasetFormat::Jsonl => {
            let reader = JsonlReader::open(path)?;
            Ok(Box::new(JsonlDatasetReader { reader }))
        }
    }
}
