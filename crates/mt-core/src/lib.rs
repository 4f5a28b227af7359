//! `mt-core`: foundational types for the marine track engine.
//!
//! This crate is a dependency of every other `mt-*` crate.  It has no `mt-*`
//! dependencies and few external ones (`chrono`, `rand`, `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`                                            |
//! | [`geo`]         | `GeoPoint`, per-axis approach and arrival test        |
//! | [`time`]        | `Frame` counter, `Timestamp` + multi-format parsing   |
//! | [`config`]      | `EngineConfig`, `ArrivalPolicy`                       |
//! | [`rng`]         | `EntityRng` (per-entity, deterministic)               |
//! | [`error`]       | `MtError`, `MtResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required to load `EngineConfig` from a file.               |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ArrivalPolicy, EngineConfig};
pub use error::{MtError, MtResult};
pub use geo::GeoPoint;
pub use ids::EntityId;
pub use rng::EntityRng;
pub use time::{Frame, Timestamp};
