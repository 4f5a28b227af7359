//! `mt-output`: snapshot recorders for the marine track engine.
//!
//! Two backends:
//!
//! | Feature   | Backend | Files created                               |
//! |-----------|---------|---------------------------------------------|
//! | *(none)*  | CSV     | `positions.csv`, `frame_summaries.csv`      |
//! | `sqlite`  | SQLite  | `positions.db`                              |
//!
//! Both implement [`OutputWriter`] and are driven by [`SnapshotRecorder`],
//! which implements `mt_engine::EngineObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use mt_output::{CsvWriter, SnapshotRecorder};
//!
//! let writer = CsvWriter::new(Path::new("./out"))?;
//! let mut rec = SnapshotRecorder::new(writer, 10);
//! FrameLoop::new(Unpaced).max_frames(600).run(&mut engine, &mut rec);
//! if let Some(e) = rec.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotRecorder;
pub use row::{FrameSummaryRow, SnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
