//! Loading a whole catalog into memory

use crate::{open_dataset, open_dataset_with_format, DatasetFormat, LegoSet, Result};
use std::path::Path;
use tracing::debug;

/// Source of a complete, ordered catalog
///
/// A load either returns every set in source order or fails; callers
/// never see a partial catalog.
pub trait RecordLoader {
    fn load(&self, source: &Path) -> Result<Vec<LegoSet>>;
}

/// Loads catalogs from local files via [`open_dataset`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader {
    format: Option<DatasetFormat>,
}

impl FileLoader {
    /// Detect the format from the file extension
    pub fn new() -> Self {
        Self::default()
    }

    /// Always read the given format, whatever the extension
    pub fn with_format(format: DatasetFormat) -> Self {
        Self {
            format: Some(format),
        }
    }

    pub fn format(&self) -> Option<DatasetFormat> {
        self.format
    }
}

impl RecordLoader for FileLoader {
    fn load(&self, source: &Path) -> Result<Vec<LegoSet>> {
        let reader = match self.format {
            Some(format) => open_dataset_with_format(source, format)?,
            None => open_dataset(source)?,
        };

        let capacity = reader.total_records().unwrap_or(0) as usize;
        let mut sets = Vec::with_capacity(capacity);
        for set in reader {
            sets.push(set?);
        }

        debug!("Loaded {} sets from {:?}", sets.len(), source);
        Ok(sets)
    }
}
