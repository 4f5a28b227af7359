//! Field coercion: `RawRecord` → `Sample`.
//!
//! # Recognised columns (case-insensitive)
//!
//! | Field      | Aliases                                   | Accepted values                   |
//! |------------|-------------------------------------------|-----------------------------------|
//! | entity id  | `id`, `entity_id`, `shark_id`             | non-negative integer, or string of one |
//! | latitude   | `lat`, `latitude`                         | finite number or numeric string   |
//! | longitude  | `lon`, `lng`, `long`, `longitude`         | finite number or numeric string   |
//! | timestamp  | `datetime`, `timestamp`, `time`, `date`   | date-time string, or Unix seconds |
//! | code       | `code`                                    | anything; kept as text            |
//!
//! Every other non-null column is carried through as auxiliary data.

use std::fmt;

use mt_core::{EntityId, GeoPoint, Timestamp};

use crate::record::{RawRecord, RawValue};
use crate::sample::{AuxValue, Sample};

pub const ENTITY_ALIASES:    &[&str] = &["id", "entity_id", "shark_id"];
pub const LAT_ALIASES:       &[&str] = &["lat", "latitude"];
pub const LON_ALIASES:       &[&str] = &["lon", "lng", "long", "longitude"];
pub const TIMESTAMP_ALIASES: &[&str] = &["datetime", "timestamp", "time", "date"];
pub const CODE_ALIASES:      &[&str] = &["code"];

/// Why a record was dropped.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum DropReason {
    /// Latitude or longitude missing, non-numeric, or non-finite.
    Coordinates,
    /// Entity id missing, negative, fractional, or non-numeric.
    Entity,
    /// Timestamp missing or unparseable.
    Timestamp,
}

impl DropReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DropReason::Coordinates => "coordinates",
            DropReason::Entity      => "entity id",
            DropReason::Timestamp   => "timestamp",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coerce one record, or say why it cannot be used.
///
/// Coordinates are checked first: a row without a usable position is dropped
/// as `Coordinates` even if its other fields are also broken.
pub fn coerce_record(record: &RawRecord) -> Result<Sample, DropReason> {
    let lat_at = record.position_ci(LAT_ALIASES);
    let lon_at = record.position_ci(LON_ALIASES);
    let lat = lat_at.and_then(|i| finite(&record.fields()[i].1));
    let lon = lon_at.and_then(|i| finite(&record.fields()[i].1));
    let (Some(lat), Some(lon)) = (lat, lon) else {
        return Err(DropReason::Coordinates);
    };

    let entity_at = record.position_ci(ENTITY_ALIASES);
    let entity = entity_at
        .and_then(|i| entity_id(&record.fields()[i].1))
        .ok_or(DropReason::Entity)?;

    let time_at = record.position_ci(TIMESTAMP_ALIASES);
    let timestamp = time_at
        .and_then(|i| timestamp(&record.fields()[i].1))
        .ok_or(DropReason::Timestamp)?;

    let code_at = record.position_ci(CODE_ALIASES);
    let code = code_at.and_then(|i| text(&record.fields()[i].1));

    let consumed = [lat_at, lon_at, entity_at, time_at, code_at];
    let aux = record
        .fields()
        .iter()
        .enumerate()
        .filter(|(i, _)| !consumed.contains(&Some(*i)))
        .filter_map(|(_, (name, value))| aux_value(value).map(|v| (name.clone(), v)))
        .collect();

    Ok(Sample {
        entity,
        pos: GeoPoint::new(lat, lon),
        timestamp,
        code,
        aux,
    })
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn finite(value: &RawValue) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn entity_id(value: &RawValue) -> Option<EntityId> {
    match value {
        RawValue::Integer(n) => return Some(EntityId(*n)),
        RawValue::Text(s)    => {
            if let Ok(n) = s.trim().parse::<u64>() {
                return Some(EntityId(n));
            }
        }
        _ => {}
    }
    let n = finite(value)?;
    // `u64::MAX as f64` rounds up to 2^64, which is itself out of range.
    if n < 0.0 || n.fract() != 0.0 || n >= u64::MAX as f64 {
        return None;
    }
    Some(EntityId(n as u64))
}

fn timestamp(value: &RawValue) -> Option<Timestamp> {
    match value {
        RawValue::Text(s)   => Timestamp::parse(s),
        RawValue::Integer(n) => Timestamp::from_unix_secs(i64::try_from(*n).ok()?),
        RawValue::Number(n) if n.is_finite() => Timestamp::from_unix_secs(n.floor() as i64),
        _                   => None,
    }
}

fn text(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_owned()),
        RawValue::Integer(n) => Some(n.to_string()),
        RawValue::Number(n) => Some(n.to_string()),
        RawValue::Bool(b)   => Some(b.to_string()),
        _                   => None,
    }
}

fn aux_value(value: &RawValue) -> Option<AuxValue> {
    match value {
        RawValue::Null      => None,
        RawValue::Bool(b)   => Some(AuxValue::Bool(*b)),
        RawValue::Integer(n) => Some(AuxValue::Number(*n as f64)),
        RawValue::Number(n) => Some(AuxValue::Number(*n)),
        RawValue::Text(s)   => match s.trim().parse::<f64>() {
            Ok(n)  => Some(AuxValue::Number(n)),
            Err(_) => Some(AuxValue::Text(s.clone())),
        },
    }
}
