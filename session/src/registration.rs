//! Registration flow: availability check, cue selection, encrypt, persist.

use crate::attempt::{AttemptOutcome, SelectionAttempt};
use crate::collector::SELECTION_QUOTA;
use crate::config::PlaybackConfig;
use crate::context::SessionContext;
use crate::error::SessionError;
use cuelock_types::{Credential, CueLabel, Username};
use std::sync::Arc;
use tracing::{info, warn};

/// Instruction line read out before the registration cues start.
pub const REGISTRATION_INSTRUCTIONS: &str = "You will hear each sound in turn. \
     Select a sound while it plays; your two picks, in order, become your secret.";

/// Phases of one registration attempt. The caller supplies the username;
/// the flow starts at the availability check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationState {
    CheckingAvailability,
    CollectingSelection,
    Encrypting { selection: Vec<CueLabel> },
    Persisted,
    Rejected,
    Abandoned(AttemptOutcome),
}

/// Terminal result reported to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Credential encrypted and stored.
    Registered,
    /// The username already holds a credential; nothing was written.
    Rejected,
    /// The selection deadline passed before two picks were made.
    Expired,
    /// Cancelled from outside before completing.
    Cancelled,
    /// A store operation failed; retry the whole flow from the start.
    Unavailable(String),
}

pub struct RegistrationFlow {
    ctx: SessionContext,
    username: Username,
    playback: PlaybackConfig,
    state: RegistrationState,
}

impl RegistrationFlow {
    pub fn new(ctx: SessionContext, username: Username, playback: PlaybackConfig) -> Self {
        Self {
            ctx,
            username,
            playback,
            state: RegistrationState::CheckingAvailability,
        }
    }

    pub fn state(&self) -> &RegistrationState {
        &self.state
    }

    /// The terminal outcome, once a terminal state is reached.
    pub fn outcome(&self) -> Option<RegistrationOutcome> {
        match &self.state {
            RegistrationState::Persisted => Some(RegistrationOutcome::Registered),
            RegistrationState::Rejected => Some(RegistrationOutcome::Rejected),
            RegistrationState::Abandoned(AttemptOutcome::Expired) => {
                Some(RegistrationOutcome::Expired)
            }
            RegistrationState::Abandoned(_) => Some(RegistrationOutcome::Cancelled),
            _ => None,
        }
    }

    /// Advance one phase. Store failures surface as `Err`; everything
    /// else is a state transition.
    pub async fn step(&mut self) -> Result<(), SessionError> {
        match &self.state {
            RegistrationState::CheckingAvailability => {
                let taken = self.ctx.store.credential_exists(&self.username).await?;
                if taken {
                    info!(user = %self.username, "registration rejected, username taken");
                    self.state = RegistrationState::Rejected;
                } else {
                    self.state = RegistrationState::CollectingSelection;
                }
            }
            RegistrationState::CollectingSelection => {
                self.state = match self.collect_selection().await {
                    AttemptOutcome::Completed(selection) => {
                        RegistrationState::Encrypting { selection }
                    }
                    other => RegistrationState::Abandoned(other),
                };
            }
            RegistrationState::Encrypting { selection } => {
                let credential = Credential::new(self.username.clone(), selection.clone());
                let blob = self.ctx.codec.encrypt(&credential.plaintext());
                self.ctx.store.put_credential(&self.username, &blob).await?;
                info!(user = %self.username, "credential registered");
                self.state = RegistrationState::Persisted;
            }
            // Terminal states hold.
            _ => {}
        }
        Ok(())
    }

    /// Step until terminal, folding store failures into the outcome.
    pub async fn run(mut self) -> RegistrationOutcome {
        loop {
            if let Err(err) = self.step().await {
                warn!(user = %self.username, error = %err, "registration attempt failed");
                return RegistrationOutcome::Unavailable(err.to_string());
            }
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
        }
    }

    async fn collect_selection(&self) -> AttemptOutcome {
        self.ctx.narrator.announce(REGISTRATION_INSTRUCTIONS);
        tokio::time::sleep(self.playback.instruction_delay).await;

        let order = self.ctx.vocabulary.shuffled(&mut rand::thread_rng());
        let handle = SelectionAttempt::spawn(
            order,
            &self.playback,
            SELECTION_QUOTA,
            Arc::clone(&self.ctx.narrator),
        );
        self.ctx.router.bind(handle.events()).await;
        let outcome = handle.outcome().await;
        self.ctx.router.clear().await;
        outcome
    }
}
