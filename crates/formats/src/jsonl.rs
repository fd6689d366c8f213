//! Streaming JSONL (JSON Lines) reader
//!
//! Reads one catalog entry per line, with automatic gzip decompression
//! for `.gz` files.

use crate::reader::open_source;
use crate::{Error, LegoSet, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::debug;

/// Configuration for JSONL reader
#[derive(Debug, Clone)]
pub struct JsonlConfig {
    /// Buffer size for BufReader
    pub buffer_size: usize,
}

impl Default for JsonlConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }
}

/// Streaming JSONL reader that processes files line-by-line
pub struct JsonlReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    records_read: usize,
    bytes_read: u64,
    total_bytes: Option<u64>,
}

impl JsonlReader<Box<dyn Read>> {
    /// Open a JSONL file, auto-detecting gzip compression
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (reader, total_bytes) = open_source(path)?;
        debug!("Opening JSONL catalog: {:?}", path);
        Ok(Self::new_with_config(reader, JsonlConfig::default(), total_bytes))
    }
}

impl<R: Read> JsonlReader<R> {
    /// Create a new JSONL reader from any Read source
    pub fn new(reader: R) -> Self {
        Self::new_with_config(reader, JsonlConfig::default(), None)
    }

    /// Create a new JSONL reader with custom configuration
    pub fn new_with_config(reader: R, config: JsonlConfig, total_bytes: Option<u64>) -> Self {
        Self {
            reader: BufReader::with_capacity(config.buffer_size, reader),
            line_number: 0,
            records_read: 0,
            bytes_read: 0,
            total_bytes,
        }
    }

    /// Get the number of lines consumed, blank ones included
    pub fn lines_processed(&self) -> usize {
        self.line_number
    }

    /// Get the number of sets yielded
    pub fn records_processed(&self) -> usize {
        self.records_read
    }

    /// Get the number of bytes read
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Get total file size if known
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }
}

impl<R: Read> Iterator for JsonlReader<R> {
    type Item = Result<LegoSet>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = String::new();

        loop {
            line.clear();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None, // EOF
                Ok(n) => {
                    self.bytes_read += n as u64;
                    self.line_number += 1;

                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    return match serde_json::from_str::<LegoSet>(trimmed) {
                        Ok(set) => {
                            self.records_read += 1;
                            Some(Ok(set))
                        }
                        Err(source) => Some(Err(Error::Malformed {
                            line: self.line_number,
                            source,
                        })),
                    };
                }
                Err(e) => return Some(Err(Error::Io(e))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_jsonl_reader_basic() {
        let data = r#"{"name": "Heart", "number": "40462-1", "pieces": 166}
{"name": "Taj Mahal", "number": "10256-1", "pieces": 5923}
{"name": "Heart", "number": "41091-1", "pieces": 40}"#;

        let reader = JsonlReader::new(data.as_bytes());
        let sets: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(sets.len(), 3);
        assert_eq!(sets[0].name, "Heart");
        assert_eq!(sets[1].number, "10256-1");
        assert_eq!(sets[2].pieces, 40);
    }

    #[test]
    fn test_jsonl_reader_with_empty_lines() {
        let data = r#"{"name": "A", "number": "1-1", "pieces": 1}

{"name": "B", "number": "2-1", "pieces": 2}

"#;

        let reader = JsonlReader::new(data.as_bytes());
        let sets: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn test_jsonl_reader_rejects_malformed_line() {
        let data = r#"{"name": "A", "number": "1-1", "pieces": 1}
{invalid json}
{"name": "B", "number": "2-1", "pieces": 2}"#;

        let reader = JsonlReader::new(data.as_bytes());
        let result = reader.collect::<Result<Vec<_>>>();

        match result {
            Err(Error::Malformed { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_jsonl_reader_rejects_wrong_field_type() {
        let data = r#"{"name": "A", "number": "1-1", "pieces": -4}"#;

        let mut reader = JsonlReader::new(data.as_bytes());
        assert!(matches!(reader.next(), Some(Err(Error::Malformed { line: 1, .. }))));
    }

    #[test]
    fn test_jsonl_reader_progress_tracking() {
        let data = "{\"name\": \"A\", \"number\": \"1-1\"}\n\n{\"name\": \"B\", \"number\": \"2-1\"}\n";

        let mut reader = JsonlReader::new(data.as_bytes());

        assert_eq!(reader.lines_processed(), 0);
        assert_eq!(reader.bytes_processed(), 0);

        let _ = reader.next();
        assert_eq!(reader.lines_processed(), 1);
        assert_eq!(reader.records_processed(), 1);
        assert!(reader.bytes_processed() > 0);

        let _ = reader.next();
        assert_eq!(reader.lines_processed(), 3);
        assert_eq!(reader.records_processed(), 2);
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_jsonl_reader_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"name": "A", "number": "1-1", "pieces": 1}}"#).unwrap();
        writeln!(temp_file, r#"{{"name": "B", "number": "2-1", "pieces": 2}}"#).unwrap();
        temp_file.flush().unwrap();

        let reader = JsonlReader::open(temp_file.path()).unwrap();
        assert!(reader.total_bytes().unwrap() > 0);
        let sets: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(sets.len(), 2);
    }

    #[test]
    fn test_jsonl_reader_gzip() {
        use flate2::write::GzEncoder;
        use flate2::Compression;

        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("jsonl.gz");

        {
            let file = File::create(&temp_path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            writeln!(encoder, r#"{{"name": "Compressed", "number": "1-1", "pieces": 10}}"#).unwrap();
            writeln!(encoder, r#"{{"name": "Data", "number": "2-1", "pieces": 20}}"#).unwrap();
            encoder.finish().unwrap();
        }

        let reader = JsonlReader::open(&temp_path).unwrap();
        assert!(reader.total_bytes().is_none());
        let sets: Vec<_> = reader.collect::<Result<Vec<_>>>().unwrap();

        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].name, "Compressed");
        assert_eq!(sets[1].name, "Data");

        std::fs::remove_file(temp_path).unwrap();
    }
}
