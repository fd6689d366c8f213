//! Catalog entry as stored in a Brickset dump

use serde::{Deserialize, Deserializer, Serialize};

/// A single LEGO set from the catalog
///
/// Fields not listed here are ignored on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegoSet {
    /// Display name, e.g. "Millennium Falcon"
    pub name: String,
    /// Catalog number, e.g. "75192-1". Not unique across a dump.
    pub number: String,
    /// Piece count; entries without one, or with `null`, load as 0
    #[serde(default, deserialize_with = "null_as_zero")]
    pub pieces: u32,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

impl LegoSet {
    /// Create a new set
    pub fn new(name: impl Into<String>, number: impl Into<String>, pieces: u32) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            pieces,
        }
    }
}
