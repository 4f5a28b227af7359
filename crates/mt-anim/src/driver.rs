//! The animation driver: one owner for every entity's animation state.

use log::debug;

use mt_core::{EngineConfig, EntityId, Frame};
use mt_timeline::{OffsetRange, OffsetSelection, TimelineIndex};

use crate::{AnimationState, AnimationStore, Motion, PositionSnapshot, StepParams};

/// How a [`seed`](AnimationDriver::seed) reconciled the arena with a new index.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Entities that appeared and start on their first sample.
    pub added:   usize,
    /// Entities carried over from the previous index.
    pub kept:    usize,
    /// Entities whose timeline disappeared; their state was discarded.
    pub removed: usize,
}

/// Per-frame counts from [`step`](AnimationDriver::step).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub seeking:  usize,
    pub arrivals: usize,
    pub resting:  usize,
}

/// Owns the [`AnimationStore`] and is the only thing that mutates it.
///
/// The driver never holds the [`TimelineIndex`]; callers pass the current one
/// into every method.  After replacing the index, call
/// [`seed`](Self::seed) before the next [`step`](Self::step) so every state's
/// `target_index` is valid again.
pub struct AnimationDriver {
    params: StepParams,
    store:  AnimationStore,
}

impl AnimationDriver {
    pub fn new(params: StepParams) -> Self {
        Self { params, store: AnimationStore::new() }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(StepParams::from_config(config))
    }

    pub fn params(&self) -> &StepParams {
        &self.params
    }

    pub fn store(&self) -> &AnimationStore {
        &self.store
    }

    /// State of one entity, for inspection.
    pub fn state(&self, entity: EntityId) -> Option<&AnimationState> {
        self.store.get(entity)
    }

    /// Reconcile the arena with `index`.
    ///
    /// New entities start on their first sample; surviving entities keep
    /// their position with the target clamped into the (possibly shorter)
    /// timeline; entities missing from `index` are dropped.
    pub fn seed(&mut self, index: &TimelineIndex) -> SeedReport {
        let mut report = SeedReport::default();
        let entries: Vec<(EntityId, AnimationState)> = index
            .iter()
            .map(|timeline| {
                let entity = timeline.entity();
                let state = match self.store.get(entity) {
                    Some(previous) => {
                        report.kept += 1;
                        previous.clamped_to(timeline)
                    }
                    None => {
                        report.added += 1;
                        AnimationState::initial(timeline)
                    }
                };
                (entity, state)
            })
            .collect();
        report.removed = self.store.len() - report.kept;

        self.store.replace_all(entries);
        debug!(
            "animation seeded: {} added, {} kept, {} removed",
            report.added, report.kept, report.removed
        );
        report
    }

    /// Advance every entity by one frame.
    ///
    /// Builds the whole next arena from the whole current one, then swaps it
    /// in.  An entity can advance its target at most once per call.
    pub fn step(&mut self, index: &TimelineIndex) -> StepReport {
        let params = self.params;
        let next: Vec<(EntityId, AnimationState, Motion)> = self.compute_next(index, &params);

        let mut report = StepReport::default();
        let entries = next
            .into_iter()
            .map(|(entity, state, motion)| {
                match motion {
                    Motion::Seeking => report.seeking += 1,
                    Motion::Arrived => report.arrivals += 1,
                    Motion::Resting => report.resting += 1,
                }
                (entity, state)
            })
            .collect();
        self.store.replace_all(entries);
        report
    }

    /// Jump every entity to the sample `offset` selects and re-arm it toward
    /// the following sample.
    ///
    /// Overwrites the whole arena from `index`, so it also adopts entities
    /// that were never seeded.  Calling it twice with the same arguments
    /// leaves the same state.
    pub fn apply_offset(
        &mut self,
        index:  &TimelineIndex,
        range:  OffsetRange,
        offset: i32,
    ) -> Vec<OffsetSelection> {
        let selections = range.select_all(offset, index);
        let entries = index
            .iter()
            .zip(&selections)
            .map(|(timeline, sel)| (sel.entity, AnimationState::rearmed(timeline, sel.index)))
            .collect();
        self.store.replace_all(entries);
        selections
    }

    /// Project current positions.
    pub fn snapshot(&self, frame: Frame) -> PositionSnapshot {
        PositionSnapshot::capture(frame, &self.store)
    }

    // ── Next-state computation ────────────────────────────────────────────

    /// Per-entity next state.  Entities whose timeline is missing from
    /// `index` are dropped.
    fn compute_next(
        &self,
        index:  &TimelineIndex,
        params: &StepParams,
    ) -> Vec<(EntityId, AnimationState, Motion)> {
        let entities = self.store.entities();
        let states   = self.store.states();

        #[cfg(not(feature = "parallel"))]
        {
            entities
                .iter()
                .zip(states)
                .filter_map(|(&entity, &state)| {
                    let timeline = index.get(entity)?;
                    let (next, motion) = state.next(timeline, params);
                    Some((entity, next, motion))
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Collecting into a Vec keeps slot order.
            entities
                .par_iter()
                .zip(states.par_iter())
                .filter_map(|(&entity, &state)| {
                    let timeline = index.get(entity)?;
                    let (next, motion) = state.next(timeline, params);
                    Some((entity, next, motion))
                })
                .collect()
        }
    }
}
