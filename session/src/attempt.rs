//! One playback/selection attempt, run as a single-owner task.
//!
//! The active-cue clock is read by the ticker and by input handling, two
//! asynchronous paths. Instead of sharing the session behind a lock, one
//! spawned task owns both the [`PlaybackSession`] and the
//! [`SelectionCollector`], and everything else talks to it over a command
//! channel. Tick advances, selection events, current-cue queries and stops
//! are thereby strictly serialized; `biased` polling puts commands ahead of
//! the ticker, and a stop or completed quota exits the loop, so a tick that
//! was already queued can never fire afterwards.

use crate::collector::{SelectionCollector, SelectionOutcome};
use crate::config::PlaybackConfig;
use crate::scheduler::PlaybackSession;
use cuelock_types::{CueLabel, Narrator, PresentationOrder};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Command channel depth. Selections are human-paced; a small buffer
/// absorbs bursts without queueing stale gestures unboundedly.
const COMMAND_BUFFER: usize = 16;

enum AttemptCommand {
    Select {
        reply: oneshot::Sender<SelectionOutcome>,
    },
    Current {
        reply: oneshot::Sender<Option<CueLabel>>,
    },
    Stop,
}

/// How an attempt ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// Quota reached; carries the ordered selection.
    Completed(Vec<CueLabel>),
    /// The deadline passed before the quota was reached.
    Expired,
    /// Stopped from outside before completing.
    Cancelled,
}

/// Cloneable command sender for a live attempt, held by input sources.
/// Every method is a no-op returning the neutral value once the attempt
/// has finished.
#[derive(Clone)]
pub struct AttemptEvents {
    commands: mpsc::Sender<AttemptCommand>,
}

impl AttemptEvents {
    /// Report one selection event and what it amounted to.
    pub async fn select(&self) -> SelectionOutcome {
        let (reply, rx) = oneshot::channel();
        if self
            .commands
            .send(AttemptCommand::Select { reply })
            .await
            .is_err()
        {
            return SelectionOutcome::Ignored;
        }
        rx.await.unwrap_or(SelectionOutcome::Ignored)
    }

    /// The cue active right now, if the attempt is live and running.
    pub async fn current(&self) -> Option<CueLabel> {
        let (reply, rx) = oneshot::channel();
        if self
            .commands
            .send(AttemptCommand::Current { reply })
            .await
            .is_err()
        {
            return None;
        }
        rx.await.unwrap_or(None)
    }

    /// Cancel the attempt. Best-effort; a finished attempt ignores it.
    pub async fn stop(&self) {
        let _ = self.commands.send(AttemptCommand::Stop).await;
    }
}

/// Handle on a spawned attempt: command access plus the final outcome.
pub struct AttemptHandle {
    events: AttemptEvents,
    task: JoinHandle<AttemptOutcome>,
}

impl AttemptHandle {
    /// A cloneable event sender, for binding into a router or input source.
    pub fn events(&self) -> AttemptEvents {
        self.events.clone()
    }

    pub async fn select(&self) -> SelectionOutcome {
        self.events.select().await
    }

    pub async fn current(&self) -> Option<CueLabel> {
        self.events.current().await
    }

    pub async fn stop(&self) {
        self.events.stop().await
    }

    /// Wait for the attempt to end. A panicked task counts as cancelled.
    pub async fn outcome(self) -> AttemptOutcome {
        self.task.await.unwrap_or(AttemptOutcome::Cancelled)
    }
}

/// Spawns selection attempts.
pub struct SelectionAttempt;

impl SelectionAttempt {
    /// Start presenting `order` on its own task and return a handle to it.
    ///
    /// The first label is announced immediately and stays active for one
    /// full interval; each tick then advances and announces the next,
    /// wrapping around until the quota, the deadline or a stop ends the
    /// attempt.
    pub fn spawn(
        order: PresentationOrder,
        config: &PlaybackConfig,
        quota: usize,
        narrator: Arc<dyn Narrator>,
    ) -> AttemptHandle {
        let (commands, rx) = mpsc::channel(COMMAND_BUFFER);
        let session = PlaybackSession::new(order, config.interval);
        let task = tokio::spawn(run(session, quota, config.deadline, narrator, rx));
        AttemptHandle {
            events: AttemptEvents { commands },
            task,
        }
    }
}

async fn run(
    mut session: PlaybackSession,
    quota: usize,
    deadline: Option<Duration>,
    narrator: Arc<dyn Narrator>,
    mut commands: mpsc::Receiver<AttemptCommand>,
) -> AttemptOutcome {
    let mut collector = SelectionCollector::new(quota);
    let mut interval = tokio::time::interval(session.interval());
    let mut deadline: Pin<Box<dyn Future<Output = ()> + Send>> = match deadline {
        Some(limit) => Box::pin(tokio::time::sleep(limit)),
        None => Box::pin(std::future::pending()),
    };

    session.start();
    // The first interval tick completes immediately; consume it here for
    // the initial announcement so the first label gets a full interval.
    interval.tick().await;
    if let Ok(label) = session.current() {
        narrator.announce(label.as_str());
    }

    loop {
        tokio::select! {
            biased;
            cmd = commands.recv() => match cmd {
                Some(AttemptCommand::Select { reply }) => {
                    let outcome = collector.on_select(&mut session);
                    let completed = matches!(outcome, SelectionOutcome::Completed(_));
                    let _ = reply.send(outcome);
                    if completed {
                        debug!(selections = quota, "selection quota reached");
                        return AttemptOutcome::Completed(collector.selections().to_vec());
                    }
                }
                Some(AttemptCommand::Current { reply }) => {
                    let _ = reply.send(session.current().ok().cloned());
                }
                // All handles dropped counts as a stop.
                Some(AttemptCommand::Stop) | None => {
                    session.stop();
                    trace!("attempt cancelled");
                    return AttemptOutcome::Cancelled;
                }
            },
            _ = &mut deadline => {
                session.expire();
                debug!("selection deadline passed before quota");
                return AttemptOutcome::Expired;
            }
            _ = interval.tick() => {
                session.advance();
                if let Ok(label) = session.current() {
                    narrator.announce(label.as_str());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuelock_nullables::NullNarrator;
    use cuelock_types::Vocabulary;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const INTERVAL: Duration = Duration::from_millis(2000);

    fn order() -> PresentationOrder {
        Vocabulary::default().shuffled(&mut StdRng::seed_from_u64(11))
    }

    fn spawn_attempt(narrator: &NullNarrator) -> AttemptHandle {
        SelectionAttempt::spawn(
            order(),
            &PlaybackConfig::fast(INTERVAL),
            2,
            Arc::new(narrator.clone()),
        )
    }

    /// Sleep just past one tick so the attempt task processes it first.
    async fn one_interval() {
        tokio::time::sleep(INTERVAL + Duration::from_millis(5)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn first_label_is_active_and_announced_before_any_tick() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);

        let current = handle.current().await.expect("attempt is running");
        assert_eq!(current, *order().label_at(0));
        assert_eq!(narrator.announcements(), [current.as_str()]);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn each_tick_advances_and_wraps() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);
        let expected = order();
        let n = expected.len();

        for k in 1..=5 {
            one_interval().await;
            let current = handle.current().await.expect("attempt is running");
            assert_eq!(current, *expected.label_at(k % n), "after {k} ticks");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn quota_reports_selection_in_event_order() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);

        let first = handle.current().await.unwrap();
        assert_eq!(handle.select().await, SelectionOutcome::Pending(1));

        one_interval().await;
        let second = handle.current().await.unwrap();
        assert_ne!(first, second);
        assert_eq!(
            handle.select().await,
            SelectionOutcome::Completed(vec![first.clone(), second.clone()])
        );

        assert_eq!(
            handle.outcome().await,
            AttemptOutcome::Completed(vec![first, second])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_and_no_announcement_follows() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);
        let events = handle.events();

        handle.current().await.expect("attempt is running");
        handle.stop().await;
        assert_eq!(handle.outcome().await, AttemptOutcome::Cancelled);

        let spoken = narrator.announcements().len();
        tokio::time::sleep(INTERVAL * 3).await;
        assert_eq!(narrator.announcements().len(), spoken);

        assert_eq!(events.select().await, SelectionOutcome::Ignored);
        assert_eq!(events.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn events_after_completion_are_ignored() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);
        let events = handle.events();

        handle.select().await;
        one_interval().await;
        assert!(matches!(
            handle.select().await,
            SelectionOutcome::Completed(_)
        ));
        assert!(matches!(
            handle.outcome().await,
            AttemptOutcome::Completed(_)
        ));

        assert_eq!(events.select().await, SelectionOutcome::Ignored);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_expires_an_unfinished_attempt() {
        let narrator = NullNarrator::new();
        let config = PlaybackConfig {
            interval: INTERVAL,
            instruction_delay: Duration::ZERO,
            deadline: Some(Duration::from_millis(7_000)),
        };
        let handle = SelectionAttempt::spawn(order(), &config, 2, Arc::new(narrator.clone()));

        assert_eq!(handle.outcome().await, AttemptOutcome::Expired);
        // Announcements at 0, 2000, 4000 and 6000 ms; the deadline at
        // 7000 ms silences the rest.
        assert_eq!(narrator.announcements().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn partial_selection_still_expires() {
        let narrator = NullNarrator::new();
        let config = PlaybackConfig {
            interval: INTERVAL,
            instruction_delay: Duration::ZERO,
            deadline: Some(Duration::from_millis(5_000)),
        };
        let handle = SelectionAttempt::spawn(order(), &config, 2, Arc::new(narrator.clone()));

        assert_eq!(handle.select().await, SelectionOutcome::Pending(1));
        assert_eq!(handle.outcome().await, AttemptOutcome::Expired);
    }
}
