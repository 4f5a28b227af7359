//! Engine configuration.
//!
//! Typically loaded from a JSON file by the application (with the `serde`
//! feature) and handed to the engine builder, which calls
//! [`EngineConfig::validate`] before anything runs.  Every field has a
//! default, so a config file only needs to name what it changes.

use std::time::Duration;

use crate::{MtError, MtResult};

// ── ArrivalPolicy ─────────────────────────────────────────────────────────────

/// What the animation does when an entity reaches its target sample.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ArrivalPolicy {
    /// Advance to `(i + 1) mod len`: the timeline loops forever.  Suits a
    /// free-running "live" display.
    #[default]
    Wrap,
    /// Advance to `min(i + 1, len - 1)`: the entity parks on its last sample.
    /// Suits a display driven by the bounded offset scrubber.
    Clamp,
}

impl ArrivalPolicy {
    /// Index that follows `index` in a timeline of `len` samples.
    #[inline]
    pub fn advance(self, index: usize, len: usize) -> usize {
        debug_assert!(len > 0);
        match self {
            ArrivalPolicy::Wrap  => (index + 1) % len,
            ArrivalPolicy::Clamp => (index + 1).min(len - 1),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ArrivalPolicy::Wrap  => "wrap",
            ArrivalPolicy::Clamp => "clamp",
        }
    }
}

impl std::fmt::Display for ArrivalPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Lowest selectable offset ("week").  Resolves to the first sample.
    pub min_offset: i32,

    /// Highest selectable offset.  Resolves to the last sample.  Must be
    /// strictly greater than `min_offset`.
    pub max_offset: i32,

    /// Fraction of the remaining gap closed per frame, in `(0, 1)`.
    pub speed: f64,

    /// Per-axis distance (degrees) under which an entity counts as arrived.
    pub epsilon: f64,

    /// Wrap or clamp when an entity reaches its target sample.
    pub arrival: ArrivalPolicy,

    /// Target frame rate for hosts without their own refresh signal.
    pub frame_rate_hz: u32,

    /// Seconds between automatic reloads from the data source.  `0` turns
    /// periodic refresh off.
    pub refresh_interval_secs: u64,

    /// Seed for decorative randomness (flavor text).  Never affects motion.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_offset:            -2,
            max_offset:            8,
            speed:                 0.002,
            epsilon:               0.0001,
            arrival:               ArrivalPolicy::Wrap,
            frame_rate_hz:         60,
            refresh_interval_secs: 30,
            seed:                  42,
        }
    }
}

impl EngineConfig {
    /// Reject configurations the engine cannot run with.
    ///
    /// A degenerate offset range would divide by zero when resolving an
    /// offset, so it is refused here rather than at the first scrub.
    pub fn validate(&self) -> MtResult<()> {
        if self.min_offset >= self.max_offset {
            return Err(MtError::Config(format!(
                "offset range [{}, {}] is empty: min_offset must be below max_offset",
                self.min_offset, self.max_offset
            )));
        }
        if !(self.speed > 0.0 && self.speed < 1.0) {
            return Err(MtError::Config(format!(
                "speed {} must lie strictly between 0 and 1",
                self.speed
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(MtError::Config(format!(
                "arrival epsilon {} must be a small positive number",
                self.epsilon
            )));
        }
        if self.frame_rate_hz == 0 {
            return Err(MtError::Config("frame_rate_hz must be at least 1".into()));
        }
        Ok(())
    }

    /// Wall-clock length of one frame at `frame_rate_hz`.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frame_rate_hz.max(1) as f64)
    }

    /// `None` when periodic refresh is off.
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_secs > 0).then(|| Duration::from_secs(self.refresh_interval_secs))
    }
}
