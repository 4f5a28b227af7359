//! The cooperative frame loop and its pacing.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use mt_core::{EngineConfig, Frame};

use crate::{Engine, EngineObserver};

// ── Pacing ────────────────────────────────────────────────────────────────────

/// Stands in for the display's refresh signal.
///
/// Hosts with a real vsync callback implement this to block until it fires.
pub trait FramePacer {
    /// Block until the next frame should start.
    fn wait_frame(&mut self);
}

/// Sleeps to a fixed frame rate.
///
/// A late frame resets the schedule instead of bursting to catch up.
#[derive(Debug)]
pub struct FixedRatePacer {
    period: Duration,
    next:   Option<Instant>,
}

impl FixedRatePacer {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.frame_duration())
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FramePacer for FixedRatePacer {
    fn wait_frame(&mut self) {
        let now = Instant::now();
        let due = self.next.unwrap_or(now + self.period);
        if due > now {
            thread::sleep(due - now);
            self.next = Some(due + self.period);
        } else {
            self.next = Some(now + self.period);
        }
    }
}

/// Runs frames back to back.  For batch replays and tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unpaced;

impl FramePacer for Unpaced {
    fn wait_frame(&mut self) {}
}

// ── FrameLoop ─────────────────────────────────────────────────────────────────

/// Drives [`Engine::tick`] until the engine's [`CancelToken`][crate::CancelToken]
/// trips or a frame limit is reached.
pub struct FrameLoop<P: FramePacer> {
    pacer:         P,
    refresh_every: Option<u64>,
    max_frames:    Option<u64>,
}

impl<P: FramePacer> FrameLoop<P> {
    /// A loop with no periodic refresh and no frame limit.
    pub fn new(pacer: P) -> Self {
        Self { pacer, refresh_every: None, max_frames: None }
    }

    /// Refresh cadence from `config`, converted from seconds to frames at
    /// `frame_rate_hz`.
    pub fn from_config(config: &EngineConfig, pacer: P) -> Self {
        let every = config
            .refresh_interval()
            .map(|interval| (interval.as_secs_f64() * config.frame_rate_hz as f64).round().max(1.0) as u64);
        Self::new(pacer).refresh_every(every)
    }

    /// Reload from the engine's source every `frames` frames.  `None` turns
    /// periodic refresh off.
    pub fn refresh_every(mut self, frames: Option<u64>) -> Self {
        self.refresh_every = frames.filter(|&n| n > 0);
        self
    }

    /// Frames between periodic refreshes, if any.
    pub fn refresh_cadence(&self) -> Option<u64> {
        self.refresh_every
    }

    /// Return after `frames` frames even if nobody calls stop.
    pub fn max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Run frames until stopped.  Returns the engine's frame count.
    ///
    /// The token is checked before every frame, so once it is cancelled at
    /// most the frame already in progress completes.  A failed refresh is
    /// reported through the observer and the loop carries on.
    ///
    /// Cancellation is sticky: a stopped engine returns from `run`
    /// immediately until [`CancelToken::reset`](crate::CancelToken::reset)
    /// clears the flag.
    pub fn run<O: EngineObserver>(&mut self, engine: &mut Engine, observer: &mut O) -> Frame {
        let cancel = engine.cancel_token();
        let start  = engine.frame();
        info!("frame loop starting at {start}");

        loop {
            if cancel.is_cancelled() {
                debug!("frame loop cancelled");
                break;
            }
            let done = engine.frame().since(start);
            if self.max_frames.is_some_and(|max| done >= max) {
                break;
            }

            if let Some(every) = self.refresh_every {
                if done > 0 && done.is_multiple_of(every) && engine.has_source() {
                    // Failures are already logged and reported by the engine.
                    let _ = engine.refresh(observer);
                }
            }

            engine.tick(observer);
            self.pacer.wait_frame();
        }

        let end = engine.frame();
        info!("frame loop stopped at {end} after {} frames", end.since(start));
        observer.on_stop(end);
        end
    }
}
