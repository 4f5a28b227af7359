//! Cross-thread control surface.
//!
//! Other threads never touch engine state.  They post into single-slot
//! mailboxes that the engine drains at the start of its next frame; a newer
//! posting of the same kind replaces an older one that was not yet consumed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mt_samples::RawRecord;

use crate::SourceError;

// ── CancelToken ───────────────────────────────────────────────────────────────

/// Shared stop flag for the frame loop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Clear the flag so the loop can be started again.
    pub fn reset(&self) {
        self.0.store(false, Ordering::Release);
    }
}

// ── Mailboxes ─────────────────────────────────────────────────────────────────

/// A pending reload trigger.
#[derive(Debug)]
pub(crate) enum ReloadRequest {
    /// Records fetched elsewhere, ready to commit.
    Records(Vec<RawRecord>),
    /// A fetch that failed elsewhere; reported, nothing committed.
    Failed(SourceError),
    /// Fetch from the engine's own data source.
    Fetch,
}

#[derive(Debug, Default)]
pub(crate) struct Mailbox {
    reload: Mutex<Option<ReloadRequest>>,
    offset: Mutex<Option<i32>>,
}

/// A poisoned slot still holds a valid `Option`; keep using it.
fn slot<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Mailbox {
    pub(crate) fn take_reload(&self) -> Option<ReloadRequest> {
        slot(&self.reload).take()
    }

    pub(crate) fn take_offset(&self) -> Option<i32> {
        slot(&self.offset).take()
    }

    fn post_reload(&self, request: ReloadRequest) {
        *slot(&self.reload) = Some(request);
    }

    fn post_offset(&self, offset: i32) {
        *slot(&self.offset) = Some(offset);
    }
}

// ── EngineHandle ──────────────────────────────────────────────────────────────

/// Cloneable, `Send + Sync` handle to a running [`Engine`][crate::Engine].
///
/// Obtain one with [`Engine::handle`][crate::Engine::handle].
#[derive(Clone, Debug)]
pub struct EngineHandle {
    mailbox: Arc<Mailbox>,
    cancel:  CancelToken,
}

impl EngineHandle {
    pub(crate) fn new(mailbox: Arc<Mailbox>, cancel: CancelToken) -> Self {
        Self { mailbox, cancel }
    }

    /// Scrub to `offset` at the next frame.  Out-of-range values are clamped
    /// when applied.
    pub fn set_offset(&self, offset: i32) {
        self.mailbox.post_offset(offset);
    }

    /// Commit `records` at the next frame.
    pub fn post_records(&self, records: Vec<RawRecord>) {
        self.mailbox.post_reload(ReloadRequest::Records(records));
    }

    /// Report a fetch that failed on another thread.
    pub fn post_reload_failure(&self, error: SourceError) {
        self.mailbox.post_reload(ReloadRequest::Failed(error));
    }

    /// Ask the engine to fetch from its own data source at the next frame.
    pub fn request_reload(&self) {
        self.mailbox.post_reload(ReloadRequest::Fetch);
    }

    /// Stop the frame loop after the frame in flight.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }
}
