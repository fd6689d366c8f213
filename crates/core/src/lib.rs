//! Aggregate queries over a Brickset catalog
//!
//! A [`LegoSetRepository`] is loaded once from a catalog file and then
//! answers read-only questions about it: name lookups, projections,
//! averages and groupings.

pub mod error;
pub mod repository;
pub mod summary;

pub use error::{Error, Result};
pub use repository::LegoSetRepository;
pub use summary::DatasetSummary;
