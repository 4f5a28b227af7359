//! Frame counter and sample timestamps.
//!
//! Two unrelated notions of time live here:
//!
//! - [`Frame`] counts animation ticks.  One frame is one display refresh; its
//!   wall-clock length is whatever the host's refresh signal makes it.
//! - [`Timestamp`] is the instant a telemetry sample was observed.  The engine
//!   uses it for ordering and for time-based lookups on a timeline, never for
//!   pacing the animation.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

// ── Frame ─────────────────────────────────────────────────────────────────────

/// An absolute animation frame counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(pub u64);

impl Frame {
    pub const ZERO: Frame = Frame(0);

    /// The frame after `self`.
    #[inline]
    pub fn next(self) -> Frame {
        Frame(self.0 + 1)
    }

    /// Frames elapsed from `earlier` to `self` (zero if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: Frame) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

// ── Timestamp ─────────────────────────────────────────────────────────────────

/// Naive layouts accepted by [`Timestamp::parse`], tried in order after
/// RFC 3339.  Naive values are taken to be UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// The instant a sample was observed (or predicted for).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Parse a date-time string.
    ///
    /// Accepts RFC 3339 (any offset, normalised to UTC), the naive layouts in
    /// `NAIVE_FORMATS`, or a bare `YYYY-MM-DD` date (midnight).  Returns
    /// `None` for anything else, including the empty string.
    pub fn parse(s: &str) -> Option<Timestamp> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Timestamp(dt.with_timezone(&Utc)));
        }
        for layout in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(s, layout) {
                return Some(Timestamp(naive.and_utc()));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| Timestamp(naive.and_utc()))
    }

    /// Build from whole seconds since the Unix epoch.
    pub fn from_unix_secs(secs: i64) -> Option<Timestamp> {
        DateTime::from_timestamp(secs, 0).map(Timestamp)
    }

    #[inline]
    pub fn unix_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Signed seconds from `earlier` to `self`, with millisecond resolution.
    #[inline]
    pub fn secs_since(self, earlier: Timestamp) -> f64 {
        (self.unix_millis() - earlier.unix_millis()) as f64 / 1_000.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339())
    }
}
