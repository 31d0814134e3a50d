//! Selection collector — turns raw input events into an ordered selection.

use crate::scheduler::PlaybackSession;
use cuelock_types::CueLabel;

/// Number of selections that complete one authentication attempt.
pub const SELECTION_QUOTA: usize = 2;

/// What one selection event amounted to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Accepted; `usize` is how many selections are in so far.
    Pending(usize),
    /// Accepted and the quota is now reached; carries the full ordered
    /// selection. The scheduler has been stopped.
    Completed(Vec<CueLabel>),
    /// Dropped: the scheduler was not running (stray or late event) or the
    /// quota was already reached. Expected under asynchronous input, never
    /// an error.
    Ignored,
}

/// Accumulates the cue active at each selection event, strictly in event
/// order, up to a fixed quota. One collector per attempt.
#[derive(Debug)]
pub struct SelectionCollector {
    quota: usize,
    buffer: Vec<CueLabel>,
}

impl SelectionCollector {
    pub fn new(quota: usize) -> Self {
        Self {
            quota,
            buffer: Vec::with_capacity(quota),
        }
    }

    /// Handle one selection event against the live session.
    ///
    /// Reads the active cue and appends it. The read-then-append runs
    /// to completion before any tick can advance the session, because both
    /// happen on the attempt task. On reaching the quota the session is
    /// stopped before `Completed` is reported, so a tick queued behind this
    /// event can never re-activate a cue.
    pub fn on_select(&mut self, session: &mut PlaybackSession) -> SelectionOutcome {
        if self.buffer.len() >= self.quota {
            return SelectionOutcome::Ignored;
        }
        let label = match session.current() {
            Ok(label) => label.clone(),
            Err(_) => return SelectionOutcome::Ignored,
        };
        self.buffer.push(label);
        if self.buffer.len() == self.quota {
            session.stop();
            SelectionOutcome::Completed(self.buffer.clone())
        } else {
            SelectionOutcome::Pending(self.buffer.len())
        }
    }

    /// Selections accepted so far, in event order.
    pub fn selections(&self) -> &[CueLabel] {
        &self.buffer
    }

    pub fn is_complete(&self) -> bool {
        self.buffer.len() >= self.quota
    }

    /// Clear the buffer for a fresh attempt.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerState;
    use cuelock_types::Vocabulary;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn running_session() -> PlaybackSession {
        let order = Vocabulary::default().shuffled(&mut StdRng::seed_from_u64(5));
        let mut s = PlaybackSession::new(order, Duration::from_millis(2000));
        s.start();
        s
    }

    #[test]
    fn selections_keep_event_order() {
        let mut session = running_session();
        let mut collector = SelectionCollector::new(SELECTION_QUOTA);

        let first = session.current().unwrap().clone();
        assert_eq!(collector.on_select(&mut session), SelectionOutcome::Pending(1));

        session.advance();
        let second = session.current().unwrap().clone();
        let outcome = collector.on_select(&mut session);

        assert_eq!(
            outcome,
            SelectionOutcome::Completed(vec![first.clone(), second.clone()])
        );
        assert_eq!(collector.selections(), &[first, second]);
    }

    #[test]
    fn completion_stops_the_session() {
        let mut session = running_session();
        let mut collector = SelectionCollector::new(2);
        collector.on_select(&mut session);
        collector.on_select(&mut session);
        assert_eq!(session.state(), SchedulerState::Stopped);
    }

    #[test]
    fn events_after_completion_are_ignored() {
        let mut session = running_session();
        let mut collector = SelectionCollector::new(2);
        collector.on_select(&mut session);
        collector.on_select(&mut session);

        assert_eq!(collector.on_select(&mut session), SelectionOutcome::Ignored);
        assert_eq!(collector.selections().len(), 2);
    }

    #[test]
    fn events_while_not_running_are_ignored() {
        let order = Vocabulary::default().shuffled(&mut StdRng::seed_from_u64(5));
        let mut idle = PlaybackSession::new(order, Duration::from_millis(2000));
        let mut collector = SelectionCollector::new(2);

        // Idle: never started.
        assert_eq!(collector.on_select(&mut idle), SelectionOutcome::Ignored);

        // Stopped mid-attempt: the partial buffer stays partial.
        let mut session = running_session();
        collector.on_select(&mut session);
        session.stop();
        assert_eq!(collector.on_select(&mut session), SelectionOutcome::Ignored);
        assert_eq!(collector.selections().len(), 1);
        assert!(!collector.is_complete());
    }

    #[test]
    fn same_cue_may_be_selected_twice() {
        // Without an advance between events both selections land on the
        // same label; the buffer records both.
        let mut session = running_session();
        let mut collector = SelectionCollector::new(2);
        let active = session.current().unwrap().clone();

        collector.on_select(&mut session);
        let outcome = collector.on_select(&mut session);
        assert_eq!(
            outcome,
            SelectionOutcome::Completed(vec![active.clone(), active])
        );
    }

    #[test]
    fn reset_empties_the_buffer() {
        let mut session = running_session();
        let mut collector = SelectionCollector::new(2);
        collector.on_select(&mut session);
        collector.on_select(&mut session);
        assert!(collector.is_complete());

        collector.reset();
        assert!(!collector.is_complete());
        assert!(collector.selections().is_empty());
    }
}
