//! Where reloads get their records from.
//!
//! The engine never performs I/O on its own schedule except through a
//! [`DataSource`].  Fetch mechanics (HTTP, retries, auth) live in the host's
//! implementation of the trait; this module ships the file-backed and
//! in-memory sources the demo and the tests use.

use std::path::{Path, PathBuf};

use mt_samples::{RawRecord, load_records_csv, load_records_json};

use crate::SourceResult;

/// A provider of raw telemetry records.
///
/// Each call returns the complete current record set; the engine replaces
/// its state wholesale with whatever comes back.  An `Err` leaves the engine
/// untouched.
pub trait DataSource {
    fn fetch(&mut self) -> SourceResult<Vec<RawRecord>>;
}

impl<S: DataSource + ?Sized> DataSource for Box<S> {
    fn fetch(&mut self) -> SourceResult<Vec<RawRecord>> {
        (**self).fetch()
    }
}

// ── Files ─────────────────────────────────────────────────────────────────────

/// Re-reads a CSV file on every fetch.
#[derive(Clone, Debug)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for CsvFileSource {
    fn fetch(&mut self) -> SourceResult<Vec<RawRecord>> {
        Ok(load_records_csv(&self.path)?)
    }
}

/// Re-reads a JSON array file on every fetch.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for JsonFileSource {
    fn fetch(&mut self) -> SourceResult<Vec<RawRecord>> {
        Ok(load_records_json(&self.path)?)
    }
}

// ── In-memory ─────────────────────────────────────────────────────────────────

/// Hands out the same records on every fetch.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    records: Vec<RawRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Swap the records later fetches return.
    pub fn set(&mut self, records: Vec<RawRecord>) {
        self.records = records;
    }
}

impl DataSource for StaticSource {
    fn fetch(&mut self) -> SourceResult<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}
