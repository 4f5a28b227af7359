//! The `OutputWriter` trait implemented by all backend writers.

use crate::{FrameSummaryRow, OutputResult, SnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by the recorder rather than surfaced through the
/// observer hooks; retrieve them with
/// [`SnapshotRecorder::take_error`][crate::SnapshotRecorder::take_error].
pub trait OutputWriter {
    /// Write every entity's position for one snapshot.
    fn write_snapshot(&mut self, rows: &[SnapshotRow]) -> OutputResult<()>;

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
