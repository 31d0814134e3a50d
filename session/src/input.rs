//! Routes selection events from an input source to the live attempt.

use crate::attempt::AttemptEvents;
use crate::collector::SelectionOutcome;
use cuelock_types::CueLabel;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A rebindable slot an input source fires selection events into.
///
/// Flows bind the live attempt for the duration of one selection cycle
/// and clear the slot afterwards. Events that arrive in between hit an
/// empty slot and come back [`SelectionOutcome::Ignored`], the same
/// treatment a finished attempt gives stray gestures.
#[derive(Clone, Default)]
pub struct SelectionRouter {
    slot: Arc<Mutex<Option<AttemptEvents>>>,
}

impl SelectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the router at a live attempt, replacing any previous binding.
    pub async fn bind(&self, events: AttemptEvents) {
        *self.slot.lock().await = Some(events);
    }

    /// Detach the router; later events are ignored.
    pub async fn clear(&self) {
        *self.slot.lock().await = None;
    }

    /// Fire one selection event at the bound attempt.
    pub async fn select(&self) -> SelectionOutcome {
        // Clone out of the slot so the lock is not held across the await.
        let events = self.slot.lock().await.clone();
        match events {
            Some(events) => events.select().await,
            None => SelectionOutcome::Ignored,
        }
    }

    /// Active cue of the bound attempt, if any.
    pub async fn current(&self) -> Option<CueLabel> {
        let events = self.slot.lock().await.clone();
        match events {
            Some(events) => events.current().await,
            None => None,
        }
    }

    /// Cancel the bound attempt, if any.
    pub async fn stop(&self) {
        let events = self.slot.lock().await.clone();
        if let Some(events) = events {
            events.stop().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attempt::SelectionAttempt;
    use crate::config::PlaybackConfig;
    use cuelock_nullables::NullNarrator;
    use cuelock_types::Vocabulary;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn spawn_attempt(narrator: &NullNarrator) -> crate::attempt::AttemptHandle {
        SelectionAttempt::spawn(
            Vocabulary::default().shuffled(&mut StdRng::seed_from_u64(3)),
            &PlaybackConfig::fast(Duration::from_millis(2000)),
            2,
            Arc::new(narrator.clone()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn unbound_router_ignores_events() {
        let router = SelectionRouter::new();
        assert_eq!(router.select().await, SelectionOutcome::Ignored);
        assert_eq!(router.current().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn bound_router_forwards_to_the_attempt() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);
        let router = SelectionRouter::new();

        router.bind(handle.events()).await;
        assert!(router.current().await.is_some());
        assert_eq!(router.select().await, SelectionOutcome::Pending(1));

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn cleared_router_ignores_events_again() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);
        let router = SelectionRouter::new();

        router.bind(handle.events()).await;
        router.clear().await;
        assert_eq!(router.select().await, SelectionOutcome::Ignored);

        // The attempt itself is untouched by the cleared binding.
        assert!(handle.current().await.is_some());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_reaches_the_bound_attempt() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);
        let router = SelectionRouter::new();

        router.bind(handle.events()).await;
        router.stop().await;
        assert_eq!(
            handle.outcome().await,
            crate::attempt::AttemptOutcome::Cancelled
        );
    }

    #[tokio::test(start_paused = true)]
    async fn clones_share_the_binding() {
        let narrator = NullNarrator::new();
        let handle = spawn_attempt(&narrator);
        let router = SelectionRouter::new();
        let input_side = router.clone();

        router.bind(handle.events()).await;
        assert_eq!(input_side.select().await, SelectionOutcome::Pending(1));

        handle.stop().await;
    }
}
