//! Integration tests for mt-output.

use mt_core::{EngineConfig, Frame};
use mt_engine::{EngineBuilder, FrameLoop, Unpaced};
use mt_samples::{RawRecord, RawValue};

use crate::{FrameSummaryRow, OutputError, OutputResult, OutputWriter, SnapshotRecorder, SnapshotRow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn fix(id: u64, lat: f64, lon: f64, datetime: &str) -> RawRecord {
    RawRecord::new()
        .with("id", RawValue::Number(id as f64))
        .with("latitude", RawValue::Number(lat))
        .with("longitude", RawValue::Number(lon))
        .with("timestamp", RawValue::Text(datetime.to_owned()))
}

fn tracks() -> Vec<RawRecord> {
    vec![
        fix(7, 0.0, 0.0, "2023-06-01 00:00:00"),
        fix(7, 1.0, 1.0, "2023-06-01 06:00:00"),
        fix(7, 2.0, 2.0, "2023-06-01 12:00:00"),
        fix(9, 23.5, -90.0, "2023-06-01 00:00:00"),
    ]
}

fn engine() -> mt_engine::Engine {
    let config = EngineConfig { min_offset: -2, max_offset: 2, ..EngineConfig::default() };
    EngineBuilder::new(config).records(tracks()).build().unwrap()
}

/// Keeps rows in memory.
#[derive(Default)]
struct MemWriter {
    positions: Vec<SnapshotRow>,
    summaries: Vec<FrameSummaryRow>,
    finished:  usize,
}

impl OutputWriter for MemWriter {
    fn write_snapshot(&mut self, rows: &[SnapshotRow]) -> OutputResult<()> {
        self.positions.extend_from_slice(rows);
        Ok(())
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.summaries.push(*row);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished += 1;
        Ok(())
    }
}

/// Fails every write with a numbered message.
#[derive(Default)]
struct BrokenWriter {
    attempts: usize,
}

impl OutputWriter for BrokenWriter {
    fn write_snapshot(&mut self, _rows: &[SnapshotRow]) -> OutputResult<()> {
        self.attempts += 1;
        Err(OutputError::Io(std::io::Error::other(format!("disk full #{}", self.attempts))))
    }

    fn write_frame_summary(&mut self, _row: &FrameSummaryRow) -> OutputResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

// ── CsvWriter ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::CsvWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, name: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(name)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn files_and_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (h1, rows1) = read(&dir, "positions.csv");
        assert_eq!(h1, ["entity", "frame", "lat", "lon"]);
        assert!(rows1.is_empty());

        let (h2, _) = read(&dir, "frame_summaries.csv");
        assert_eq!(h2, ["frame", "entities", "offset"]);
    }

    #[test]
    fn rows_are_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshot(&[
            SnapshotRow { entity: 7, frame: 3, lat: 23.5, lon: -90.25 },
            SnapshotRow { entity: 9, frame: 3, lat: 0.0, lon: 1.0 },
        ])
        .unwrap();
        w.write_frame_summary(&FrameSummaryRow { frame: 3, entities: 2, offset: None }).unwrap();
        w.write_frame_summary(&FrameSummaryRow { frame: 3, entities: 2, offset: Some(-1) }).unwrap();
        w.finish().unwrap();

        let (_, positions) = read(&dir, "positions.csv");
        assert_eq!(positions.len(), 2);
        assert_eq!(&positions[0][0], "7");
        assert_eq!(&positions[0][2], "23.5");
        assert_eq!(&positions[0][3], "-90.25");

        let (_, summaries) = read(&dir, "frame_summaries.csv");
        assert_eq!(&summaries[0][2], "");
        assert_eq!(&summaries[1][2], "-1");
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("absent"));
        assert!(matches!(result, Err(OutputError::Csv(_))));
    }

    #[test]
    fn recorder_drives_csv_files() {
        let dir = tmp();
        let mut engine = engine();
        let mut rec = SnapshotRecorder::new(CsvWriter::new(dir.path()).unwrap(), 5);
        FrameLoop::new(Unpaced).max_frames(10).run(&mut engine, &mut rec);
        assert!(rec.take_error().is_none());

        let (_, positions) = read(&dir, "positions.csv");
        assert_eq!(positions.len(), 4); // frames 5 and 10, two entities each
        let (_, summaries) = read(&dir, "frame_summaries.csv");
        let frames: Vec<&str> = summaries.iter().map(|r| r.get(0).unwrap()).collect();
        assert_eq!(frames, ["5", "10"]);
    }
}

// ── SnapshotRecorder ──────────────────────────────────────────────────────────

#[cfg(test)]
mod recorder {
    use super::*;

    #[test]
    fn records_every_interval_frame() {
        let mut engine = engine();
        let mut rec = SnapshotRecorder::new(MemWriter::default(), 2);
        FrameLoop::new(Unpaced).max_frames(6).run(&mut engine, &mut rec);

        let w = rec.into_writer();
        let frames: Vec<u64> = w.summaries.iter().map(|s| s.frame).collect();
        assert_eq!(frames, [2, 4, 6]);
        assert!(w.summaries.iter().all(|s| s.entities == 2 && s.offset.is_none()));
        assert_eq!(w.finished, 1);
    }

    #[test]
    fn offset_changes_are_recorded_with_their_offset() {
        let mut engine = engine();
        let mut rec = SnapshotRecorder::new(MemWriter::default(), 0);
        engine.set_offset(0, &mut rec);
        engine.tick(&mut rec);
        engine.set_offset(-2, &mut rec);

        let w = rec.into_writer();
        assert_eq!(
            w.summaries,
            vec![
                FrameSummaryRow { frame: 0, entities: 2, offset: Some(0) },
                FrameSummaryRow { frame: 1, entities: 2, offset: Some(-2) },
            ]
        );
        let seven: Vec<(f64, f64)> = w
            .positions
            .iter()
            .filter(|r| r.entity == 7)
            .map(|r| (r.lat, r.lon))
            .collect();
        assert_eq!(seven, [(1.0, 1.0), (0.0, 0.0)]);
    }

    #[test]
    fn keeps_only_the_first_error() {
        let mut engine = engine();
        let mut rec = SnapshotRecorder::new(BrokenWriter::default(), 1);
        FrameLoop::new(Unpaced).max_frames(3).run(&mut engine, &mut rec);

        let err = rec.take_error().expect("error stored");
        assert_eq!(err.to_string(), "I/O error: disk full #1");
        assert!(rec.take_error().is_none());
        assert_eq!(rec.into_writer().attempts, 3);
    }

    #[test]
    fn stop_finishes_writer() {
        let mut engine = engine();
        let mut rec = SnapshotRecorder::new(MemWriter::default(), 100);
        let end = FrameLoop::new(Unpaced).max_frames(3).run(&mut engine, &mut rec);
        assert_eq!(end, Frame(3));
        let w = rec.into_writer();
        assert!(w.summaries.is_empty());
        assert_eq!(w.finished, 1);
    }
}

// ── SqliteWriter ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use rusqlite::Connection;

    use super::*;
    use crate::SqliteWriter;

    #[test]
    fn schema_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshot(&[SnapshotRow { entity: 7, frame: 2, lat: 1.5, lon: -2.5 }]).unwrap();
        w.write_frame_summary(&FrameSummaryRow { frame: 2, entities: 1, offset: None }).unwrap();
        w.write_frame_summary(&FrameSummaryRow { frame: 2, entities: 1, offset: Some(4) }).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let conn = Connection::open(dir.path().join("positions.db")).unwrap();
        let (entity, lat): (i64, f64) = conn
            .query_row("SELECT entity, lat FROM positions", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!((entity, lat), (7, 1.5));

        let offsets: Vec<Option<i32>> = conn
            .prepare("SELECT offset FROM frame_summaries ORDER BY rowid")
            .unwrap()
            .query_map([], |r| r.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(offsets, [None, Some(4)]);
    }

    #[test]
    fn empty_snapshot_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshot(&[]).unwrap();
        let conn = Connection::open(dir.path().join("positions.db")).unwrap();
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM positions", [], |r| r.get(0)).unwrap();
        assert_eq!(n, 0);
    }
}
