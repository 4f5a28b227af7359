//! One entity's ordered samples.

use mt_core::{EntityId, GeoPoint, Timestamp};
use mt_samples::Sample;

/// The time-ordered samples of a single entity.
///
/// A `Timeline` is never empty: [`Timeline::new`] refuses an empty vector, so
/// an entity with no valid samples simply has no timeline.  Immutable after
/// construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    entity:  EntityId,
    samples: Vec<Sample>,
}

impl Timeline {
    /// Build a timeline, stable-sorting `samples` by timestamp.
    ///
    /// Returns `None` if `samples` is empty.  All samples are expected to
    /// belong to `entity`.
    pub fn new(entity: EntityId, mut samples: Vec<Sample>) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        debug_assert!(samples.iter().all(|s| s.entity == entity));
        samples.sort_by_key(|s| s.timestamp);
        Some(Self { entity, samples })
    }

    #[inline]
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    #[inline]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples; always at least 1.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn sample(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    #[inline]
    pub fn first(&self) -> &Sample {
        &self.samples[0]
    }

    #[inline]
    pub fn last(&self) -> &Sample {
        &self.samples[self.samples.len() - 1]
    }

    /// Position of sample `index`, clamped to the last sample.
    #[inline]
    pub fn position(&self, index: usize) -> GeoPoint {
        self.samples[index.min(self.samples.len() - 1)].pos
    }

    /// Every position in order, e.g. for drawing the full track.
    pub fn positions(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.samples.iter().map(|s| s.pos)
    }

    pub fn start_time(&self) -> Timestamp {
        self.first().timestamp
    }

    pub fn end_time(&self) -> Timestamp {
        self.last().timestamp
    }

    /// Index of the sample closest in time to `t`.  Ties go to the earlier
    /// sample.  O(log n).
    pub fn nearest_index(&self, t: Timestamp) -> usize {
        let i = self.samples.partition_point(|s| s.timestamp < t);
        if i == 0 {
            return 0;
        }
        if i == self.samples.len() {
            return i - 1;
        }
        let before = t.secs_since(self.samples[i - 1].timestamp);
        let after  = self.samples[i].timestamp.secs_since(t);
        if after < before { i } else { i - 1 }
    }

    /// Position at time `t`, linearly interpolated between the bracketing
    /// samples.
    ///
    /// Before the first sample this is the first position; at or after the
    /// last it is the last.  When several samples share `t` exactly, the
    /// latest of them wins.
    pub fn position_at(&self, t: Timestamp) -> GeoPoint {
        if t < self.start_time() {
            return self.first().pos;
        }
        if t >= self.end_time() {
            return self.last().pos;
        }
        // First sample strictly after `t`; in range because t < end_time.
        let i = self.samples.partition_point(|s| s.timestamp <= t);
        let a = &self.samples[i - 1];
        let b = &self.samples[i];
        let span = b.timestamp.secs_since(a.timestamp);
        if span <= 0.0 {
            return b.pos;
        }
        a.pos.lerp(b.pos, t.secs_since(a.timestamp) / span)
    }
}
