//! `mt-engine`: orchestration for the marine track engine.
//!
//! The [`Engine`] is the single owner of every piece of mutable state: the
//! sample store, the timeline index, and the animation arena.  Everything
//! else talks to it either directly through `&mut Engine` on the owning
//! thread, or through a cloned [`EngineHandle`] from any other thread.
//!
//! # Frame
//!
//! ```text
//! FrameLoop::run, until the CancelToken trips:
//!   ① Refresh : every `refresh_every` frames, reload from the data source.
//!   ② Drain   : reload mailbox, then offset mailbox (newest posting wins).
//!   ③ Step    : AnimationDriver::step over the current TimelineIndex.
//!   ④ Snapshot: EngineObserver::on_snapshot with the new positions.
//!   ⑤ Pace    : FramePacer::wait_frame.
//! ```
//!
//! A reload that fails leaves the store, the index and the animation arena
//! exactly as they were.
//!
//! # Modules
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | `builder`    | [`EngineBuilder`]                                      |
//! | `engine`     | [`Engine`]                                             |
//! | `error`      | [`EngineError`], [`SourceError`]                       |
//! | `frame_loop` | [`FrameLoop`], [`FramePacer`], [`FixedRatePacer`]      |
//! | `handle`     | [`EngineHandle`], [`CancelToken`]                      |
//! | `names`      | [`NameRegistry`], [`pick_flavor`]                      |
//! | `observer`   | [`EngineObserver`], [`NoopObserver`]                   |
//! | `source`     | [`DataSource`] and the file / in-memory sources        |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Steps entities on Rayon's thread pool.                 |
//! | `fx-hash`  | FxHash for the animation arena's slot map.             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mt_core::EngineConfig;
//! use mt_engine::{CsvFileSource, EngineBuilder, FrameLoop, NoopObserver, Unpaced};
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default())
//!     .source(CsvFileSource::new("tracks.csv"))
//!     .build()?;
//! engine.refresh(&mut NoopObserver);
//! FrameLoop::new(Unpaced).max_frames(600).run(&mut engine, &mut NoopObserver);
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod frame_loop;
pub mod handle;
pub mod names;
pub mod observer;
pub mod source;


pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{EngineError, EngineResult, SourceError, SourceResult};
pub use frame_loop::{FixedRatePacer, FrameLoop, FramePacer, Unpaced};
pub use handle::{CancelToken, EngineHandle};
pub use names::{DEFAULT_FLAVOR, NameError, NameRegistry, pick_flavor};
pub use observer::{EngineObserver, NoopObserver};
pub use source::{CsvFileSource, DataSource, JsonFileSource, StaticSource};
