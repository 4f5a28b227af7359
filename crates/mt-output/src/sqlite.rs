//! SQLite output backend (feature `sqlite`).
//!
//! Creates `positions.db` in the output directory with two tables:
//! `positions` and `frame_summaries`.  A frame can appear more than once when
//! an offset change is recorded between two ticks.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{FrameSummaryRow, OutputResult, SnapshotRow};

/// Writes recorded snapshots to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `positions.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("positions.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS positions (
                 entity INTEGER NOT NULL,
                 frame  INTEGER NOT NULL,
                 lat    REAL    NOT NULL,
                 lon    REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS frame_summaries (
                 frame    INTEGER NOT NULL,
                 entities INTEGER NOT NULL,
                 offset   INTEGER
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshot(&mut self, rows: &[SnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO positions (entity, frame, lat, lon) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                // SQLite integers are signed; tag ids and frame counts fit.
                stmt.execute(rusqlite::params![row.entity as i64, row.frame as i64, row.lat, row.lon])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_frame_summary(&mut self, row: &FrameSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO frame_summaries (frame, entities, offset) VALUES (?1, ?2, ?3)",
            rusqlite::params![row.frame as i64, row.entities as i64, row.offset],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
