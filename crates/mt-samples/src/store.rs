//! The `SampleStore`: the current cleaned, time-ordered sample set.

use log::{debug, info};

use crate::coerce::{DropReason, coerce_record};
use crate::record::RawRecord;
use crate::sample::Sample;

/// What a load kept and what it dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records that became samples.
    pub kept:                usize,
    /// Dropped for missing or unusable latitude/longitude.
    pub dropped_coordinates: usize,
    /// Dropped for missing or unusable entity id.
    pub dropped_entity:      usize,
    /// Dropped for missing or unparseable timestamp.
    pub dropped_timestamp:   usize,
}

impl LoadReport {
    /// Total records dropped for any reason.
    pub fn dropped(&self) -> usize {
        self.dropped_coordinates + self.dropped_entity + self.dropped_timestamp
    }

    /// Total records seen.
    pub fn total(&self) -> usize {
        self.kept + self.dropped()
    }

    fn count(&mut self, reason: DropReason) {
        match reason {
            DropReason::Coordinates => self.dropped_coordinates += 1,
            DropReason::Entity      => self.dropped_entity += 1,
            DropReason::Timestamp   => self.dropped_timestamp += 1,
        }
    }
}

/// Coerce every record, drop the unusable ones, and stable-sort the rest by
/// timestamp.  Records with equal timestamps keep their input order.
pub fn normalize(records: &[RawRecord]) -> (Vec<Sample>, LoadReport) {
    let mut report  = LoadReport::default();
    let mut samples = Vec::with_capacity(records.len());

    for (row, record) in records.iter().enumerate() {
        match coerce_record(record) {
            Ok(sample) => samples.push(sample),
            Err(reason) => {
                debug!("dropping telemetry row {row}: unusable {reason}");
                report.count(reason);
            }
        }
    }
    report.kept = samples.len();

    // `sort_by_key` is stable.
    samples.sort_by_key(|s| s.timestamp);
    (samples, report)
}

/// Holds the published sample set.
///
/// The only way to change the contents is [`replace`](Self::replace), which
/// does all of its work on a local vector and then swaps it in with one
/// assignment, so a reader never sees a half-loaded set.
#[derive(Debug, Default)]
pub struct SampleStore {
    samples:    Vec<Sample>,
    generation: u64,
}

impl SampleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole store with the cleaned form of `records`.
    pub fn replace(&mut self, records: &[RawRecord]) -> LoadReport {
        let (samples, report) = normalize(records);
        self.install(samples);
        info!(
            "sample store generation {}: kept {} of {} records ({} dropped)",
            self.generation,
            report.kept,
            report.total(),
            report.dropped()
        );
        report
    }

    /// Publish an already-normalized sample vector.
    pub fn install(&mut self, samples: Vec<Sample>) {
        self.samples = samples;
        self.generation += 1;
    }

    /// All samples, ascending by timestamp.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Bumped on every replacement; `0` means nothing was ever loaded.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
