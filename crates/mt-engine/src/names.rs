//! User-chosen names ("adoption") and decorative flavor text.
//!
//! Neither affects motion.  The registry is keyed by entity id only, so a
//! name survives reloads in which its entity temporarily disappears.

use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;

use mt_core::{EntityId, EntityRng};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("a name must contain at least one non-whitespace character")]
    Blank,
}

/// Entity → display name.
#[derive(Clone, Debug, Default)]
pub struct NameRegistry {
    names: BTreeMap<EntityId, String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name `entity`, replacing any earlier name.  Surrounding whitespace is
    /// trimmed.
    pub fn adopt(&mut self, entity: EntityId, name: &str) -> Result<(), NameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NameError::Blank);
        }
        debug!("{entity} adopted as {name:?}");
        self.names.insert(entity, name.to_owned());
        Ok(())
    }

    pub fn name(&self, entity: EntityId) -> Option<&str> {
        self.names.get(&entity).map(String::as_str)
    }

    /// Drop the name for `entity`, returning it.
    pub fn forget(&mut self, entity: EntityId) -> Option<String> {
        self.names.remove(&entity)
    }

    /// Names in ascending entity order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &str)> + '_ {
        self.names.iter().map(|(&id, name)| (id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Lines a popup can show when no caller-supplied set is given.
pub const DEFAULT_FLAVOR: &[&str] = &[
    "Cruising the shelf edge.",
    "Following the warm water north.",
    "Last seen near a chlorophyll bloom.",
    "Taking the long way around the Yucatán.",
    "Diving deep, back soon.",
];

/// Pick one of `lines` using `rng`.
///
/// The choice depends only on the rng's state, so an [`EntityRng`] seeded
/// from `(seed, entity)` always picks the same line for that entity.
pub fn pick_flavor<'a, S: AsRef<str>>(lines: &'a [S], rng: &mut EntityRng) -> Option<&'a str> {
    rng.choose(lines).map(AsRef::as_ref)
}
