//! The `TimelineIndex`: every entity's timeline, keyed by id.

use std::collections::BTreeMap;

use log::debug;

use mt_core::EntityId;
use mt_samples::Sample;

use crate::Timeline;

/// Entity id → timeline, built from a sample store.
///
/// Backed by a `BTreeMap`, so iteration is in ascending `EntityId` order and
/// two builds over the same samples compare equal.  Entities without samples
/// are absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineIndex {
    timelines: BTreeMap<EntityId, Timeline>,
}

impl TimelineIndex {
    /// An index with no entities.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Group `samples` by entity.
    ///
    /// Each group is stable-sorted by timestamp again inside
    /// [`Timeline::new`]; the result does not depend on the input already
    /// being sorted, only on its relative order for equal timestamps.
    pub fn build(samples: &[Sample]) -> Self {
        let mut groups: BTreeMap<EntityId, Vec<Sample>> = BTreeMap::new();
        for sample in samples {
            groups.entry(sample.entity).or_default().push(sample.clone());
        }

        let timelines: BTreeMap<EntityId, Timeline> = groups
            .into_iter()
            .filter_map(|(entity, group)| Timeline::new(entity, group).map(|t| (entity, t)))
            .collect();

        debug!(
            "indexed {} samples into {} timelines",
            samples.len(),
            timelines.len()
        );
        Self { timelines }
    }

    #[inline]
    pub fn get(&self, entity: EntityId) -> Option<&Timeline> {
        self.timelines.get(&entity)
    }

    #[inline]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.timelines.contains_key(&entity)
    }

    /// Entity ids in ascending order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.timelines.keys().copied()
    }

    /// Timelines in ascending entity order.
    pub fn iter(&self) -> impl Iterator<Item = &Timeline> + '_ {
        self.timelines.values()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.timelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timelines.is_empty()
    }

    /// Sum of all timeline lengths.
    pub fn total_samples(&self) -> usize {
        self.timelines.values().map(Timeline::len).sum()
    }
}
