//! Login flow: fetch and decrypt the credential, replay cues, verify.

use crate::attempt::{AttemptOutcome, SelectionAttempt};
use crate::collector::SELECTION_QUOTA;
use crate::config::PlaybackConfig;
use crate::context::SessionContext;
use crate::error::SessionError;
use crate::verifier::selection_matches;
use cuelock_store::StoreError;
use cuelock_types::{Credential, CueLabel, Username};
use std::sync::Arc;
use tracing::{info, warn};

/// Instruction line read out before the login cues start.
pub const LOGIN_INSTRUCTIONS: &str = "Listen to the sounds. \
     Select your two secret sounds, in the order you registered them.";

/// Phases of one login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginState {
    FetchingCredential,
    AwaitingSelection {
        registered: Vec<CueLabel>,
    },
    Verifying {
        registered: Vec<CueLabel>,
        selection: Vec<CueLabel>,
    },
    Succeeded,
    Mismatched,
    NotFound,
    Unreadable,
    Abandoned(AttemptOutcome),
}

/// Terminal result reported to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Selection matched the registered sequence.
    Success,
    /// Both picks were made but did not match.
    SelectionMismatch,
    /// No credential is stored under the username.
    NotFound,
    /// A credential exists but did not decrypt to a usable sequence.
    Unreadable,
    /// The selection deadline passed before two picks were made.
    Expired,
    /// Cancelled from outside before completing.
    Cancelled,
    /// A store operation failed; retry the whole flow from the start.
    Unavailable(String),
}

pub struct LoginFlow {
    ctx: SessionContext,
    username: Username,
    playback: PlaybackConfig,
    state: LoginState,
}

impl LoginFlow {
    pub fn new(ctx: SessionContext, username: Username, playback: PlaybackConfig) -> Self {
        Self {
            ctx,
            username,
            playback,
            state: LoginState::FetchingCredential,
        }
    }

    pub fn state(&self) -> &LoginState {
        &self.state
    }

    /// The terminal outcome, once a terminal state is reached.
    pub fn outcome(&self) -> Option<LoginOutcome> {
        match &self.state {
            LoginState::Succeeded => Some(LoginOutcome::Success),
            LoginState::Mismatched => Some(LoginOutcome::SelectionMismatch),
            LoginState::NotFound => Some(LoginOutcome::NotFound),
            LoginState::Unreadable => Some(LoginOutcome::Unreadable),
            LoginState::Abandoned(AttemptOutcome::Expired) => Some(LoginOutcome::Expired),
            LoginState::Abandoned(_) => Some(LoginOutcome::Cancelled),
            _ => None,
        }
    }

    /// Advance one phase. Store failures other than a missing credential
    /// surface as `Err`; everything else is a state transition.
    pub async fn step(&mut self) -> Result<(), SessionError> {
        match &self.state {
            LoginState::FetchingCredential => {
                let blob = match self.ctx.store.get_credential(&self.username).await {
                    Ok(blob) => blob,
                    Err(StoreError::NotFound(_)) => {
                        info!(user = %self.username, "login for unknown username");
                        self.state = LoginState::NotFound;
                        return Ok(());
                    }
                    Err(err) => return Err(err.into()),
                };
                self.state = match self.ctx.codec.decrypt(&blob) {
                    Ok(plaintext) => {
                        let credential = Credential::from_plaintext(self.username.clone(), &plaintext);
                        LoginState::AwaitingSelection {
                            registered: credential.labels().to_vec(),
                        }
                    }
                    Err(err) => {
                        warn!(user = %self.username, error = %err, "stored credential unreadable");
                        LoginState::Unreadable
                    }
                };
            }
            LoginState::AwaitingSelection { registered } => {
                let registered = registered.clone();
                self.state = match self.collect_selection().await {
                    AttemptOutcome::Completed(selection) => LoginState::Verifying {
                        registered,
                        selection,
                    },
                    other => LoginState::Abandoned(other),
                };
            }
            LoginState::Verifying {
                registered,
                selection,
            } => {
                if selection_matches(selection, registered) {
                    info!(user = %self.username, "login succeeded");
                    self.state = LoginState::Succeeded;
                } else {
                    info!(user = %self.username, "login selection mismatch");
                    self.state = LoginState::Mismatched;
                }
            }
            // Terminal states hold.
            _ => {}
        }
        Ok(())
    }

    /// Step until terminal, folding store failures into the outcome.
    pub async fn run(mut self) -> LoginOutcome {
        loop {
            if let Err(err) = self.step().await {
                warn!(user = %self.username, error = %err, "login attempt failed");
                return LoginOutcome::Unavailable(err.to_string());
            }
            if let Some(outcome) = self.outcome() {
                return outcome;
            }
        }
    }

    /// Cue order is freshly shuffled per attempt, independent of the
    /// registered sequence.
    async fn collect_selection(&self) -> AttemptOutcome {
        self.ctx.narrator.announce(LOGIN_INSTRUCTIONS);
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
