//! Per-entity animation state.

use mt_core::{ArrivalPolicy, EngineConfig, GeoPoint};
use mt_timeline::Timeline;

/// The tuning the driver applies every frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepParams {
    /// Fraction of the remaining gap closed per frame, in `(0, 1)`.
    pub speed:   f64,
    /// Per-axis arrival threshold in degrees.
    pub epsilon: f64,
    pub policy:  ArrivalPolicy,
}

impl StepParams {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            speed:   config.speed,
            epsilon: config.epsilon,
            policy:  config.arrival,
        }
    }
}

impl Default for StepParams {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// What one frame did to one entity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Moved toward the target; not there yet.
    Seeking,
    /// Reached the target, snapped onto it, and advanced the target index.
    Arrived,
    /// On the target with nowhere to advance to.
    Resting,
}

/// The animation state of a single entity.
///
/// `target_index` always indexes into the entity's current timeline.  The
/// driver restores that after every reload.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnimationState {
    /// The rendered position.
    pub current:      GeoPoint,
    /// The sample this entity is moving toward.
    pub target_index: usize,
}

impl AnimationState {
    /// Initial state: sitting on the first sample, heading for the second
    /// (or staying put on a one-sample timeline).
    pub fn initial(timeline: &Timeline) -> Self {
        Self::rearmed(timeline, 0)
    }

    /// Sitting exactly on sample `index`, heading for the one after it.
    /// The target never runs past the last sample.
    pub fn rearmed(timeline: &Timeline, index: usize) -> Self {
        let last  = timeline.len() - 1;
        let index = index.min(last);
        Self {
            current:      timeline.position(index),
            target_index: (index + 1).min(last),
        }
    }

    /// Same position, target pulled back inside a timeline that may have
    /// shrunk.
    pub fn clamped_to(self, timeline: &Timeline) -> Self {
        Self {
            current:      self.current,
            target_index: self.target_index.min(timeline.len() - 1),
        }
    }

    /// Compute the next frame's state.  Pure: reads only `self` and the
    /// entity's own timeline.
    ///
    /// An entity arrives once it is within `epsilon` of the target on both
    /// axes, or once a step no longer moves it at all.  The second case
    /// covers an `epsilon` finer than f64 spacing at the entity's
    /// coordinates, where the approach would otherwise stall short of it.
    pub fn next(self, timeline: &Timeline, params: &StepParams) -> (AnimationState, Motion) {
        let target = timeline.position(self.target_index);

        if self.current.within(target, params.epsilon) {
            return self.arrive(target, timeline, params);
        }

        let stepped = self.current.approach(target, params.speed);
        if stepped == self.current {
            return self.arrive(target, timeline, params);
        }

        let state = AnimationState {
            current:      stepped,
            target_index: self.target_index,
        };
        (state, Motion::Seeking)
    }

    /// Snap onto `target` and advance the index by `params.policy`.
    fn arrive(
        self,
        target:   GeoPoint,
        timeline: &Timeline,
        params:   &StepParams,
    ) -> (AnimationState, Motion) {
        let next_index = params.policy.advance(self.target_index, timeline.len());
        let motion = if next_index == self.target_index {
            Motion::Resting
        } else {
            Motion::Arrived
        };
        (AnimationState { current: target, target_index: next_index }, motion)
    }
}
