//! `SnapshotRecorder<W>`: bridges `EngineObserver` to an `OutputWriter`.

use mt_anim::PositionSnapshot;
use mt_core::Frame;
use mt_engine::EngineObserver;
use mt_timeline::OffsetSelection;

use crate::row::{FrameSummaryRow, SnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// An [`EngineObserver`] that writes every `interval`-th frame's snapshot
/// (and every offset change) to any [`OutputWriter`] backend.
///
/// Observer hooks cannot fail, so the first write error is kept and the rest
/// are dropped.  Check with [`take_error`][Self::take_error] after the loop.
pub struct SnapshotRecorder<W: OutputWriter> {
    writer:     W,
    interval:   u64,
    offset:     Option<i32>,
    pending:    bool,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SnapshotRecorder<W> {
    /// Record frames divisible by `interval`.  `0` records offset changes
    /// only.
    pub fn new(writer: W, interval: u64) -> Self {
        Self {
            writer,
            interval,
            offset:     None,
            pending:    false,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record(&mut self, snapshot: &PositionSnapshot) -> OutputResult<()> {
        let frame = snapshot.frame().0;
        let rows: Vec<SnapshotRow> = snapshot
            .iter()
            .map(|(entity, pos)| SnapshotRow { entity: entity.0, frame, lat: pos.lat, lon: pos.lon })
            .collect();

        self.writer.write_snapshot(&rows)?;
        self.writer.write_frame_summary(&FrameSummaryRow {
            frame,
            entities: rows.len() as u64,
            offset:   self.offset,
        })
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> EngineObserver for SnapshotRecorder<W> {
    fn on_offset(&mut self, offset: i32, _selections: &[OffsetSelection]) {
        self.offset  = Some(offset);
        self.pending = true;
    }

    fn on_snapshot(&mut self, snapshot: &PositionSnapshot) {
        let due = self.interval > 0 && snapshot.frame().0.is_multiple_of(self.interval);
        if due || self.pending {
            self.pending = false;
            let result = self.record(snapshot);
            self.store_err(result);
        }
    }

    fn on_stop(&mut self, _frame: Frame) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
