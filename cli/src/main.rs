//! cuelock command line — audio challenge-response login at the terminal.
//!
//! Cue announcements are printed instead of played; pressing Enter while a
//! cue is on screen selects it, standing in for the tap gesture.

use clap::Parser;
use cuelock_crypto::CredentialCodec;
use cuelock_session::{
    init_logging, AuthConfig, LogFormat, LoginFlow, LoginOutcome, PlaybackConfig,
    RegistrationFlow, RegistrationOutcome, SelectionOutcome, SelectionRouter, SessionContext,
    SELECTION_QUOTA,
};
use cuelock_store::NoteStore;
use cuelock_store_json::JsonFileStore;
use cuelock_types::{Narrator, Username};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Parser)]
#[command(name = "cuelock", about = "Audio challenge-response authentication")]
struct Cli {
    /// Cue labels (comma-separated: "cat,cow,crow,sheep").
    /// When a config file is provided, defaults to the file's labels.
    #[arg(long, env = "CUELOCK_LABELS", value_delimiter = ',')]
    labels: Vec<String>,

    /// Path of the JSON credential store file.
    #[arg(long, env = "CUELOCK_STORE")]
    store: Option<PathBuf>,

    /// Milliseconds each cue stays active (defaults per command).
    #[arg(long, env = "CUELOCK_INTERVAL_MS")]
    interval_ms: Option<u64>,

    /// Overall selection deadline in milliseconds (no deadline when omitted).
    #[arg(long, env = "CUELOCK_DEADLINE_MS")]
    deadline_ms: Option<u64>,

    /// Codec key as 64 hex digits; takes precedence over the passphrase.
    #[arg(long, env = "CUELOCK_KEY_HEX")]
    key_hex: Option<String>,

    /// Passphrase the codec key is derived from.
    #[arg(long, env = "CUELOCK_PASSPHRASE")]
    passphrase: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CUELOCK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CUELOCK_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Register a username with a fresh two-cue selection.
    Register { username: String },
    /// Log in by re-selecting the registered cues in order.
    Login { username: String },
    /// Log in, then read and write notes for the account.
    Notes { username: String },
    /// Print the configured cue vocabulary in canonical order.
    Vocabulary,
}

/// Narrator that prints announcements, standing in for audio playback.
struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn announce(&self, text: &str) {
        println!("{text}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = cli.config.as_ref().and_then(|path| {
        match AuthConfig::from_toml_file(path) {
            Ok(cfg) => Some(cfg),
            Err(err) => {
                eprintln!(
                    "failed to load config {}: {err}; using defaults",
                    path.display()
                );
                None
            }
        }
    });
    let loaded_file = file_config.is_some();
    let base = file_config.unwrap_or_default();

    let config = AuthConfig {
        labels: if cli.labels.is_empty() {
            base.labels
        } else {
            cli.labels
        },
        store_path: cli.store.unwrap_or(base.store_path),
        key_hex: cli.key_hex.or(base.key_hex),
        passphrase: cli.passphrase.unwrap_or(base.passphrase),
        selection_deadline_ms: cli.deadline_ms.or(base.selection_deadline_ms),
        log_level: cli.log_level.unwrap_or(base.log_level),
        log_format: cli.log_format.unwrap_or(base.log_format),
        ..base
    };

    init_logging(LogFormat::from_name(&config.log_format), &config.log_level);
    if loaded_file {
        if let Some(path) = &cli.config {
            tracing::info!(path = %path.display(), "loaded configuration file");
        }
    }

    let code = match cli.command {
        Command::Register { username } => {
            run_register(&config, username.parse()?, cli.interval_ms).await?
        }
        Command::Login { username } => {
            run_login(&config, username.parse()?, cli.interval_ms, false).await?
        }
        Command::Notes { username } => {
            run_login(&config, username.parse()?, cli.interval_ms, true).await?
        }
        Command::Vocabulary => {
            for label in config.vocabulary()?.labels() {
                println!("{label}");
            }
            0
        }
    };

    // The Enter listener may be parked in a blocking stdin read; exit
    // without waiting for it.
    std::process::exit(code);
}

fn build_context(config: &AuthConfig, store: Arc<JsonFileStore>) -> anyhow::Result<SessionContext> {
    Ok(SessionContext::new(
        store,
        CredentialCodec::new(config.codec_key()?),
        config.vocabulary()?,
        Arc::new(ConsoleNarrator),
    ))
}

/// Forward Enter presses to the router as selection events. Ends once the
/// quota completes so a later prompt can take over stdin.
fn spawn_enter_listener(router: SelectionRouter) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(_)) = lines.next_line().await {
            match router.select().await {
                SelectionOutcome::Pending(count) => {
                    println!("  selected ({count} of {SELECTION_QUOTA})");
                }
                SelectionOutcome::Completed(_) => {
                    println!("  selection complete");
                    break;
                }
                SelectionOutcome::Ignored => {}
            }
        }
    });
}

fn playback_with_override(mut playback: PlaybackConfig, interval_ms: Option<u64>) -> PlaybackConfig {
    if let Some(ms) = interval_ms {
        playback.interval = Duration::from_millis(ms);
    }
    playback
}

async fn run_register(
    config: &AuthConfig,
    username: Username,
    interval_ms: Option<u64>,
) -> anyhow::Result<i32> {
    let store = Arc::new(JsonFileStore::new(&config.store_path));
    let ctx = build_context(config, store)?;
    spawn_enter_listener(ctx.router.clone());

    println!("Welcome to cuelock, {username}.");
    println!("Press Enter while a sound plays to select it.");

    let playback = playback_with_override(config.registration_playback(), interval_ms);
    let outcome = RegistrationFlow::new(ctx, username, playback).run().await;

    let code = match outcome {
        RegistrationOutcome::Registered => {
            println!("Registration complete. Your selection, in order, is your key.");
            0
        }
        RegistrationOutcome::Rejected => {
            println!("Username already exists. Try logging in instead.");
            1
        }
        RegistrationOutcome::Expired => {
            println!("Time expired before two selections were made.");
            1
        }
        RegistrationOutcome::Cancelled => {
            println!("Registration cancelled.");
            1
        }
        RegistrationOutcome::Unavailable(reason) => {
            println!("Store unavailable: {reason}. Try again.");
            1
        }
    };
    Ok(code)
}

async fn run_login(
    config: &AuthConfig,
    username: Username,
    interval_ms: Option<u64>,
    notes: bool,
) -> anyhow::Result<i32> {
    let store = Arc::new(JsonFileStore::new(&config.store_path));
    let ctx = build_context(config, store.clone())?;
    spawn_enter_listener(ctx.router.clone());

    println!("Welcome back to cuelock, {username}.");
    println!("Press Enter while a sound plays to select it.");

    let playback = playback_with_override(config.login_playback(), interval_ms);
    let outcome = LoginFlow::new(ctx, username.clone(), playback).run().await;

    let code = match outcome {
        LoginOutcome::Success => {
            println!("Login successful.");
            tokio::time::sleep(Duration::from_millis(config.success_pause_ms)).await;
            if notes {
                notes_prompt(store.as_ref(), &username).await?;
            }
            0
        }
        LoginOutcome::SelectionMismatch => {
            println!("Login failed. The selection did not match.");
            1
        }
        LoginOutcome::NotFound => {
            println!("No account found for {username}. Register first.");
            1
        }
        LoginOutcome::Unreadable => {
            println!("Stored credential could not be read. Register again to continue.");
            1
        }
        LoginOutcome::Expired => {
            println!("Time expired before two selections were made.");
            1
        }
        LoginOutcome::Cancelled => {
            println!("Login cancelled.");
            1
        }
        LoginOutcome::Unavailable(reason) => {
            println!("Store unavailable: {reason}. Try again.");
            1
        }
    };
    Ok(code)
}

async fn notes_prompt(store: &JsonFileStore, username: &Username) -> anyhow::Result<()> {
    println!("Notes for {username}. Type a note and press Enter; \":list\" shows all, \":quit\" leaves.");
    print_notes(store, username).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {}
            ":quit" | ":q" => break,
            ":list" => print_notes(store, username).await?,
            text => {
                let note = store.append_note(username, text).await?;
                println!("  saved note {}", note.id);
            }
        }
    }
    Ok(())
}

async fn print_notes(store: &JsonFileStore, username: &Username) -> anyhow::Result<()> {
    let notes = store.list_notes(username).await?;
    if notes.is_empty() {
        println!("  (no notes yet)");
    }
    for note in notes {
        println!("  {}: {}", note.id, note.text);
    }
    Ok(())
}
