//! Offset ("week") resolution.

use mt_core::{EngineConfig, EntityId, MtError, MtResult};

use crate::{Timeline, TimelineIndex};

/// The scrubber's inclusive integer range.
///
/// Construction rejects `max <= min`, so [`resolve`](Self::resolve) never
/// divides by zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OffsetRange {
    min: i32,
    max: i32,
}

/// The index an offset resolved to for one entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OffsetSelection {
    pub entity: EntityId,
    /// The offset after clamping into range.
    pub offset: i32,
    pub index:  usize,
}

impl OffsetRange {
    pub fn new(min: i32, max: i32) -> MtResult<Self> {
        if min >= max {
            return Err(MtError::Config(format!(
                "offset range [{min}, {max}] is empty: min must be below max"
            )));
        }
        Ok(Self { min, max })
    }

    /// The range configured in `config`.
    pub fn from_config(config: &EngineConfig) -> MtResult<Self> {
        Self::new(config.min_offset, config.max_offset)
    }

    #[inline]
    pub fn min(self) -> i32 {
        self.min
    }

    #[inline]
    pub fn max(self) -> i32 {
        self.max
    }

    #[inline]
    pub fn clamp(self, offset: i32) -> i32 {
        offset.clamp(self.min, self.max)
    }

    /// Fraction of the way from `min` to `max`, in `[0, 1]` after clamping.
    pub fn ratio(self, offset: i32) -> f64 {
        let offset = self.clamp(offset) as i64;
        (offset - self.min as i64) as f64 / (self.max as i64 - self.min as i64) as f64
    }

    /// Sample index for `offset` in a timeline of `len` samples.
    ///
    /// `round` is half-away-from-zero.  A one-sample timeline (and, for
    /// safety, an empty one) resolves to 0.
    pub fn resolve(self, offset: i32, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        let last = len - 1;
        let index = (self.ratio(offset) * last as f64).round();
        (index.max(0.0) as usize).min(last)
    }

    /// Resolve `offset` against one timeline.
    pub fn select(self, offset: i32, timeline: &Timeline) -> OffsetSelection {
        OffsetSelection {
            entity: timeline.entity(),
            offset: self.clamp(offset),
            index:  self.resolve(offset, timeline.len()),
        }
    }

    /// Resolve `offset` against every timeline, in ascending entity order.
    pub fn select_all(self, offset: i32, index: &TimelineIndex) -> Vec<OffsetSelection> {
        index.iter().map(|t| self.select(offset, t)).collect()
    }
}
