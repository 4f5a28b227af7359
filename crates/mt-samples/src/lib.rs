//! `mt-samples`: turns heterogeneous telemetry rows into ordered samples.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`record`]   | `RawValue`, `RawRecord`: untyped rows, case-insensitive lookup |
//! | [`sample`]   | `Sample`, `AuxValue`: the canonical cleaned form            |
//! | [`coerce`]   | `coerce_record`, `DropReason`                                |
//! | [`store`]    | `SampleStore`, `LoadReport`, `normalize`                     |
//! | [`loader`]   | `load_records_csv`, `load_records_json` (+ `_reader` forms)  |
//! | [`error`]    | `SampleError`, `SampleResult<T>`                             |
//!
//! # Pipeline
//!
//! ```text
//! CSV / JSON  ──loader──▶  Vec<RawRecord>  ──normalize──▶  Vec<Sample> (stable-sorted)
//!                                  │                           │
//!                        coerce_record drops rows     SampleStore::replace publishes
//!                        without usable lat/lon,      the whole vector in one step
//!                        id, or timestamp
//! ```
//!
//! A malformed row is never an error: it is dropped and counted in the
//! returned [`LoadReport`].  Only a document that cannot be read at all (bad
//! JSON, I/O failure) produces a [`SampleError`].

pub mod coerce;
pub mod error;
pub mod loader;
pub mod record;
pub mod sample;
pub mod store;


pub use coerce::{DropReason, coerce_record};
pub use error::{SampleError, SampleResult};
pub use loader::{load_records_csv, load_records_csv_reader, load_records_json, load_records_json_reader};
pub use record::{RawRecord, RawValue};
pub use sample::{AuxValue, Sample};
pub use store::{LoadReport, SampleStore, normalize};
