//! Engine observer trait for progress reporting and data collection.

use mt_anim::PositionSnapshot;
use mt_core::Frame;
use mt_samples::LoadReport;
use mt_timeline::OffsetSelection;

use crate::SourceError;

/// Callbacks invoked by the [`Engine`][crate::Engine] and
/// [`FrameLoop`][crate::FrameLoop] at key points.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: reload counter
///
/// ```rust,ignore
/// struct ReloadCounter { ok: usize, failed: usize }
///
/// impl EngineObserver for ReloadCounter {
///     fn on_reload(&mut self, _report: &LoadReport) { self.ok += 1; }
///     fn on_reload_failed(&mut self, _error: &SourceError) { self.failed += 1; }
/// }
/// ```
pub trait EngineObserver {
    /// Called at the very start of each frame, before the mailboxes drain.
    fn on_frame_start(&mut self, _frame: Frame) {}

    /// Called after every frame step and every offset change with the
    /// positions the renderer should draw.
    fn on_snapshot(&mut self, _snapshot: &PositionSnapshot) {}

    /// Called after new records were committed.
    fn on_reload(&mut self, _report: &LoadReport) {}

    /// Called when a reload failed.  Engine state is unchanged.
    fn on_reload_failed(&mut self, _error: &SourceError) {}

    /// Called after an offset was applied, with the clamped offset and the
    /// per-entity sample each one jumped to.
    fn on_offset(&mut self, _offset: i32, _selections: &[OffsetSelection]) {}

    /// Called once when the frame loop exits.
    fn on_stop(&mut self, _frame: Frame) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
