//! The canonical sample type.

use mt_core::{EntityId, GeoPoint, Timestamp};

/// An auxiliary scalar carried through from the source row.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AuxValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

/// One observed (or predicted) position of one entity at one instant.
///
/// Samples are immutable once loaded.  `aux` holds every column the engine
/// does not read (sea-surface temperature, chlorophyll, …) in record order;
/// the engine never interprets it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub entity:    EntityId,
    pub pos:       GeoPoint,
    pub timestamp: Timestamp,
    /// Tag/deployment code, when the feed has one.
    pub code:      Option<String>,
    pub aux:       Vec<(String, AuxValue)>,
}

impl Sample {
    /// A sample with no code and no auxiliary fields.
    pub fn new(entity: EntityId, pos: GeoPoint, timestamp: Timestamp) -> Self {
        Self { entity, pos, timestamp, code: None, aux: Vec::new() }
    }

    /// Case-insensitive lookup of an auxiliary field.
    pub fn aux(&self, name: &str) -> Option<&AuxValue> {
        self.aux
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }
}
