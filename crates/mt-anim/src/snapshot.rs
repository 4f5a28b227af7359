//! The externally visible position snapshot.

use std::collections::BTreeMap;

use mt_core::{EntityId, Frame, GeoPoint};

use crate::AnimationStore;

/// Where every entity is drawn at one frame.
///
/// A plain value: built fresh after every frame and every offset change,
/// never updated in place, and carrying nothing but positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PositionSnapshot {
    frame:     Frame,
    positions: BTreeMap<EntityId, GeoPoint>,
}

impl PositionSnapshot {
    /// Project the current position of every entity in `store`.
    pub fn capture(frame: Frame, store: &AnimationStore) -> Self {
        Self {
            frame,
            positions: store.iter().map(|(e, s)| (e, s.current)).collect(),
        }
    }

    /// The frame this snapshot was taken at.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn get(&self, entity: EntityId) -> Option<GeoPoint> {
        self.positions.get(&entity).copied()
    }

    /// `(entity, position)` in ascending entity order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, GeoPoint)> + '_ {
        self.positions.iter().map(|(&e, &p)| (e, p))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
