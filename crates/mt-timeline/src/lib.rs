//! `mt-timeline`: per-entity timelines and offset resolution.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`timeline`]| `Timeline`: one entity's non-empty, time-ordered samples        |
//! | [`index`]   | `TimelineIndex`: `BTreeMap<EntityId, Timeline>` built from a store |
//! | [`offset`]  | `OffsetRange`, `OffsetSelection`: "week" scrubber → sample index |
//!
//! # Offset model
//!
//! The scrubber spans `[min, max]` (integers, `min < max`).  An offset maps to
//! a fraction of the way along each entity's own timeline, independently of
//! every other entity:
//!
//! ```text
//! ratio = (offset - min) / (max - min)
//! index = round(ratio * (len - 1))        clamped to [0, len - 1]
//! ```
//!
//! So `min` always shows the first fix and `max` the last, whether the
//! timeline has 3 samples or 3,000.

pub mod index;
pub mod offset;
pub mod timeline;

#[cfg(test)]
mod tests;

pub use index::TimelineIndex;
pub use offset::{OffsetRange, OffsetSelection};
pub use timeline::Timeline;
