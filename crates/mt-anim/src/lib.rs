//! `mt-anim`: animation state, the per-frame driver, and position snapshots.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`state`]    | `AnimationState`, `StepParams`, `Motion`: one entity, one frame |
//! | [`store`]    | `AnimationStore`: arena of states + `EntityId → slot` map      |
//! | [`driver`]   | `AnimationDriver`: seed, step, apply offset                    |
//! | [`snapshot`] | `PositionSnapshot`: read-only `EntityId → GeoPoint` value      |
//!
//! # Motion model (exponential approach)
//!
//! Every frame, each entity closes a fixed fraction `speed` of the remaining
//! gap to its target sample, on latitude and longitude independently:
//!
//! ```text
//! current += (target - current) * speed
//! ```
//!
//! When both axis gaps are under `epsilon` (measured before moving), the
//! entity snaps exactly onto the target and the target advances one sample,
//! wrapping or clamping per [`ArrivalPolicy`][mt_core::ArrivalPolicy].  An
//! entity that is within `epsilon` but cannot advance (one-sample timeline,
//! or parked on the last sample under `Clamp`) is *resting*.
//!
//! A frame computes the complete next-state arena from the complete previous
//! one and swaps it in; no entity sees another's half-applied update.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Per-entity next-state computation on Rayon.            |
//! | `fx-hash`  | FxHash for the `EntityId → slot` map.                  |

pub mod driver;
pub mod snapshot;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use driver::{AnimationDriver, SeedReport, StepReport};
pub use snapshot::PositionSnapshot;
pub use state::{AnimationState, Motion, StepParams};
pub use store::AnimationStore;
