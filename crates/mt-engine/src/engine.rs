//! The `Engine` struct: the single mutator of all timeline and animation
//! state.

use std::sync::Arc;

use log::{debug, info, warn};

use mt_anim::{AnimationDriver, PositionSnapshot, StepReport};
use mt_core::{EngineConfig, EntityId, Frame, GeoPoint};
use mt_samples::{LoadReport, RawRecord, SampleStore, normalize};
use mt_timeline::{OffsetRange, OffsetSelection, Timeline, TimelineIndex};

use crate::handle::{Mailbox, ReloadRequest};
use crate::{
    CancelToken, DataSource, EngineError, EngineHandle, EngineObserver, EngineResult,
    SourceError, SourceResult,
};

/// Owns the sample store, the timeline index and the animation driver.
///
/// Every mutation goes through a `&mut self` method, so one thread drives
/// the engine and other threads reach it only through an
/// [`EngineHandle`].  Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine {
    pub(crate) config:  EngineConfig,
    pub(crate) range:   OffsetRange,
    pub(crate) store:   SampleStore,
    pub(crate) index:   TimelineIndex,
    pub(crate) driver:  AnimationDriver,
    pub(crate) source:  Option<Box<dyn DataSource + Send>>,
    pub(crate) frame:   Frame,
    pub(crate) offset:  Option<i32>,
    pub(crate) mailbox: Arc<Mailbox>,
    pub(crate) cancel:  CancelToken,
}

impl Engine {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn offset_range(&self) -> OffsetRange {
        self.range
    }

    /// Frames completed so far.  Snapshots are stamped with this value.
    pub fn frame(&self) -> Frame {
        self.frame
    }

    /// Last offset applied, if the user has scrubbed at all.
    pub fn offset(&self) -> Option<i32> {
        self.offset
    }

    pub fn samples(&self) -> &SampleStore {
        &self.store
    }

    pub fn timeline(&self, entity: EntityId) -> Option<&Timeline> {
        self.index.get(entity)
    }

    pub fn timelines(&self) -> &TimelineIndex {
        &self.index
    }

    pub fn driver(&self) -> &AnimationDriver {
        &self.driver
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Current rendered position of one entity.
    pub fn position(&self, entity: EntityId) -> EngineResult<GeoPoint> {
        self.driver
            .state(entity)
            .map(|state| state.current)
            .ok_or(EngineError::EntityNotFound(entity))
    }

    /// Current positions, stamped with [`frame`](Self::frame).
    pub fn snapshot(&self) -> PositionSnapshot {
        self.driver.snapshot(self.frame)
    }

    /// A handle other threads can post into.
    pub fn handle(&self) -> EngineHandle {
        EngineHandle::new(Arc::clone(&self.mailbox), self.cancel.clone())
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    // ── Reload ────────────────────────────────────────────────────────────

    /// Replace every sample with `records`.
    ///
    /// Builds the new store and index off to the side and commits them
    /// together, then reconciles the animation arena.
    pub fn load<O: EngineObserver>(
        &mut self,
        records:  &[RawRecord],
        observer: &mut O,
    ) -> LoadReport {
        let (samples, report) = normalize(records);
        let index = TimelineIndex::build(&samples);

        self.store.install(samples);
        self.index = index;
        let seeded = self.driver.seed(&self.index);

        info!(
            "loaded {} samples for {} entities ({} records dropped; {} new, {} gone)",
            report.kept,
            self.index.len(),
            report.dropped(),
            seeded.added,
            seeded.removed,
        );
        observer.on_reload(&report);
        report
    }

    /// Fetch from `source` and load the result.
    ///
    /// On failure nothing changes: the error is logged, handed to
    /// [`EngineObserver::on_reload_failed`], and returned.
    pub fn reload<S, O>(&mut self, source: &mut S, observer: &mut O) -> SourceResult<LoadReport>
    where
        S: DataSource + ?Sized,
        O: EngineObserver,
    {
        let fetched = source.fetch();
        self.commit_fetch(fetched, observer)
    }

    /// [`reload`](Self::reload) from the source given to the builder.
    ///
    /// Returns `None` when the engine has no source.
    pub fn refresh<O: EngineObserver>(
        &mut self,
        observer: &mut O,
    ) -> Option<SourceResult<LoadReport>> {
        let fetched = self.source.as_mut()?.fetch();
        Some(self.commit_fetch(fetched, observer))
    }

    fn commit_fetch<O: EngineObserver>(
        &mut self,
        fetched:  SourceResult<Vec<RawRecord>>,
        observer: &mut O,
    ) -> SourceResult<LoadReport> {
        match fetched {
            Ok(records) => Ok(self.load(&records, observer)),
            Err(e) => {
                self.reload_failed(&e, observer);
                Err(e)
            }
        }
    }

    fn reload_failed<O: EngineObserver>(&mut self, error: &SourceError, observer: &mut O) {
        warn!("reload failed, keeping {} timelines: {error}", self.index.len());
        observer.on_reload_failed(error);
    }

    // ── Offset ────────────────────────────────────────────────────────────

    /// Jump every entity to the sample `offset` selects.
    ///
    /// `offset` is clamped into the configured range.  Emits
    /// [`EngineObserver::on_offset`] and then a snapshot.
    pub fn set_offset<O: EngineObserver>(
        &mut self,
        offset:   i32,
        observer: &mut O,
    ) -> Vec<OffsetSelection> {
        let clamped = self.range.clamp(offset);
        if clamped != offset {
            debug!("offset {offset} outside {}..={}, using {clamped}", self.range.min(), self.range.max());
        }
        let selections = self.driver.apply_offset(&self.index, self.range, clamped);
        self.offset = Some(clamped);

        observer.on_offset(clamped, &selections);
        observer.on_snapshot(&self.snapshot());
        selections
    }

    // ── Frame ─────────────────────────────────────────────────────────────

    /// Run one frame: drain the mailboxes, step every entity, advance the
    /// frame counter, and emit the snapshot.
    pub fn tick<O: EngineObserver>(&mut self, observer: &mut O) -> StepReport {
        let now = self.frame;
        observer.on_frame_start(now);

        self.drain_mailboxes(observer);

        let report = self.driver.step(&self.index);
        if report.arrivals > 0 {
            debug!("{now}: {} arrivals", report.arrivals);
        }
        self.frame = now.next();
        observer.on_snapshot(&self.snapshot());
        report
    }

    /// Reload first, so a posted offset resolves against the new timelines.
    fn drain_mailboxes<O: EngineObserver>(&mut self, observer: &mut O) {
        match self.mailbox.take_reload() {
            Some(ReloadRequest::Records(records)) => {
                self.load(&records, observer);
            }
            Some(ReloadRequest::Failed(e)) => self.reload_failed(&e, observer),
            Some(ReloadRequest::Fetch) => {
                if self.refresh(observer).is_none() {
                    debug!("reload requested but the engine has no data source");
                }
            }
            None => {}
        }

        if let Some(offset) = self.mailbox.take_offset() {
            self.set_offset(offset, observer);
        }
    }
}
