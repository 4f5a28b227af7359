//! CSV and JSON telemetry loaders.
//!
//! # CSV format
//!
//! A header row followed by one row per fix.  Column names are matched
//! case-insensitively (see [`coerce`](crate::coerce)); extra columns pass
//! through as auxiliary data.
//!
//! ```csv
//! ID,Lat,Lon,datetime,SST_asignado,Clorofila_asignada
//! 159826,24.10,-89.52,2023-06-01 00:00:00,28.4,0.21
//! 159826,24.18,-89.47,2023-06-01 06:00:00,28.6,0.19
//! ```
//!
//! Rows with the wrong number of cells are read as far as they go (the CSV
//! reader is `flexible`); a row that cannot be decoded at all is skipped
//! with a warning instead of failing the whole file.
//!
//! # JSON format
//!
//! An array of flat objects, one per fix.  Non-object elements are skipped.
//!
//! ```json
//! [{ "ID": 159826, "lat": 24.10, "lon": -89.52, "datetime": "2023-06-01 00:00:00" }]
//! ```

use std::io::Read;
use std::path::Path;

use log::warn;

use crate::record::RawRecord;
use crate::{SampleError, SampleResult};

// ── CSV ───────────────────────────────────────────────────────────────────────

/// Load raw records from a CSV file.
pub fn load_records_csv(path: &Path) -> SampleResult<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(SampleError::Io)?;
    load_records_csv_reader(file)
}

/// Like [`load_records_csv`] but accepts any `Read` source.
pub fn load_records_csv_reader<R: Read>(reader: R) -> SampleResult<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = Vec::new();
    for (row, result) in csv_reader.records().enumerate() {
        match result {
            Ok(cells) => records.push(RawRecord::from_csv(&headers, &cells)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => warn!("skipping undecodable CSV row {}: {e}", row + 1),
        }
    }
    Ok(records)
}

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Load raw records from a JSON file holding an array of objects.
pub fn load_records_json(path: &Path) -> SampleResult<Vec<RawRecord>> {
    let file = std::fs::File::open(path).map_err(SampleError::Io)?;
    load_records_json_reader(std::io::BufReader::new(file))
}

/// Like [`load_records_json`] but accepts any `Read` source.
pub fn load_records_json_reader<R: Read>(reader: R) -> SampleResult<Vec<RawRecord>> {
    let document: serde_json::Value = serde_json::from_reader(reader)?;
    let serde_json::Value::Array(items) = document else {
        return Err(SampleError::Parse(
            "expected a JSON array of telemetry objects".into(),
        ));
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        match RawRecord::from_json(item) {
            Some(record) => records.push(record),
            None => warn!("skipping JSON element {i}: not an object"),
        }
    }
    Ok(records)
}
