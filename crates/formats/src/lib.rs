//! File format readers for Brickset catalog dumps
//!
//! This crate turns a catalog file into an ordered sequence of
//! [`LegoSet`] values. JSON arrays and JSON Lines are supported, either
//! plain or gzip-compressed.

pub mod error;
pub mod json;
pub mod jsonl;
pub mod loader;
pub mod reader;
pub mod record;

pub use error::{Error, Result};
pub use loader::{FileLoader, RecordLoader};
pub use reader::{open_dataset, open_dataset_with_format, DatasetFormat, DatasetReader};
pub use record::LegoSet;
