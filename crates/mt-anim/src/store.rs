//! The `AnimationStore`: an arena of per-entity states.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap as SlotMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as SlotMap;

use mt_core::EntityId;

use crate::AnimationState;

/// Dense storage for every animated entity.
///
/// `states[i]` belongs to `entities[i]`; `slots` maps an id back to `i`.
/// Slots are assigned in ascending `EntityId` order each time the arena is
/// rebuilt, and the arena is only ever rebuilt whole (see
/// [`replace_all`](Self::replace_all)), so the three collections cannot drift
/// apart.
#[derive(Debug, Default)]
pub struct AnimationStore {
    states:   Vec<AnimationState>,
    entities: Vec<EntityId>,
    slots:    SlotMap<EntityId, usize>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry at once.  `entries` must be in ascending,
    /// duplicate-free entity order.
    pub fn replace_all(&mut self, entries: Vec<(EntityId, AnimationState)>) {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        let (entities, states): (Vec<EntityId>, Vec<AnimationState>) = entries.into_iter().unzip();
        let slots = entities.iter().enumerate().map(|(i, &e)| (e, i)).collect();
        self.states   = states;
        self.entities = entities;
        self.slots    = slots;
    }

    /// Slot index of `entity`, if it is animated.
    #[inline]
    pub fn slot(&self, entity: EntityId) -> Option<usize> {
        self.slots.get(&entity).copied()
    }

    #[inline]
    pub fn get(&self, entity: EntityId) -> Option<&AnimationState> {
        self.slot(entity).map(|i| &self.states[i])
    }

    /// `(entity, state)` pairs in slot (ascending id) order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &AnimationState)> + '_ {
        self.entities.iter().copied().zip(self.states.iter())
    }

    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    pub fn states(&self) -> &[AnimationState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
