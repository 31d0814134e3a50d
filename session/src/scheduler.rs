//! Playback scheduler state — one cue active at a time.
//!
//! `PlaybackSession` is the shared "active index" clock the whole scheme
//! rests on: a discrete user gesture means whatever cue is active at that
//! instant. The session itself is a plain state machine with no timer; the
//! attempt task owns it together with the ticker and serializes every
//! advance, read and stop through one `select!` loop, so no two labels are
//! ever active at once and a read cannot interleave with an advance.

use cuelock_types::{CueLabel, PresentationOrder};
use std::time::Duration;
use thiserror::Error;

/// Lifecycle of one cue-presentation cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Created, not presenting yet.
    Idle,
    /// Cycling through the order.
    Running,
    /// Stopped by quota completion or cancellation.
    Stopped,
    /// Ran out of deadline before the quota was reached.
    Expired,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("scheduler is not running")]
    NotRunning,
}

/// Transient state of one presentation cycle: a shuffled order, the active
/// index into it, and the tick interval. No persistent identity; dropped
/// when the attempt ends.
#[derive(Debug)]
pub struct PlaybackSession {
    order: PresentationOrder,
    active_index: usize,
    interval: Duration,
    state: SchedulerState,
}

impl PlaybackSession {
    /// A session over `order`, in [`SchedulerState::Idle`]. `order` must be
    /// non-empty (the vocabulary guarantees at least two labels).
    pub fn new(order: PresentationOrder, interval: Duration) -> Self {
        Self {
            order,
            active_index: 0,
            interval,
            state: SchedulerState::Idle,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn order(&self) -> &PresentationOrder {
        &self.order
    }

    /// Begin presenting: Idle → Running with the first label active.
    /// No-op in any other state.
    pub fn start(&mut self) {
        if self.state == SchedulerState::Idle {
            self.active_index = 0;
            self.state = SchedulerState::Running;
        }
    }

    /// One tick: advance the active index, wrapping modulo the order length.
    /// No-op unless running.
    pub fn advance(&mut self) {
        if self.state == SchedulerState::Running {
            self.active_index = (self.active_index + 1) % self.order.len();
        }
    }

    /// The label active right now.
    ///
    /// Fails with [`SchedulerError::NotRunning`] outside Running; callers
    /// handling stray input treat that as "ignore the event", not an error.
    pub fn current(&self) -> Result<&CueLabel, SchedulerError> {
        if self.state == SchedulerState::Running {
            Ok(self.order.label_at(self.active_index))
        } else {
            Err(SchedulerError::NotRunning)
        }
    }

    /// Stop presenting. Idempotent; a session that already stopped or
    /// expired keeps its terminal state.
    pub fn stop(&mut self) {
        if matches!(self.state, SchedulerState::Idle | SchedulerState::Running) {
            self.state = SchedulerState::Stopped;
        }
    }

    /// Deadline ran out: Running → Expired. No-op in any other state.
    pub fn expire(&mut self) {
        if self.state == SchedulerState::Running {
            self.state = SchedulerState::Expired;
        }
    }
}
