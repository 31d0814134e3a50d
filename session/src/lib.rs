//! Cue scheduling and selection matching for audio challenge-response
//! authentication.
//!
//! A [`SessionContext`] bundles the store, codec, vocabulary, narrator and
//! input router. [`RegistrationFlow`] and [`LoginFlow`] drive one attempt
//! each as small state machines; both lean on [`SelectionAttempt`], which
//! runs the cue clock and the two-pick collector on a single task so that
//! every tick, selection event and stop is serialized.

pub mod attempt;
pub mod collector;
pub mod config;
pub mod context;
pub mod error;
pub mod input;
pub mod logging;
pub mod login;
pub mod registration;
pub mod scheduler;
pub mod verifier;

pub use attempt::{AttemptEvents, AttemptHandle, AttemptOutcome, SelectionAttempt};
pub use collector::{SelectionCollector, SelectionOutcome, SELECTION_QUOTA};
pub use config::{AuthConfig, PlaybackConfig};
pub use context::SessionContext;
pub use error::SessionError;
pub use input::SelectionRouter;
pub use logging::{init_logging, LogFormat};
pub use login::{LoginFlow, LoginOutcome, LoginState, LOGIN_INSTRUCTIONS};
pub use registration::{
    RegistrationFlow, RegistrationOutcome, RegistrationState, REGISTRATION_INSTRUCTIONS,
};
pub use scheduler::{PlaybackSession, SchedulerError, SchedulerState};
pub use verifier::selection_matches;
