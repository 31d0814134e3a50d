//! Authentication engine configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use cuelock_crypto::CodecKey;
use cuelock_types::{Vocabulary, REFERENCE_LABELS};

use crate::SessionError;

/// Configuration for the cuelock engine.
///
/// Can be loaded from a TOML file via [`AuthConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Timing defaults follow the
/// reference deployment: registration announces slower than login, and each
/// flow reads its instructions before the first cue.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Cue labels, in canonical order.
    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    /// Path of the JSON credential store file.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    /// Codec key as 64 hex characters. Takes precedence over `passphrase`.
    #[serde(default)]
    pub key_hex: Option<String>,

    /// Passphrase the codec key is derived from when `key_hex` is unset.
    #[serde(default = "default_passphrase")]
    pub passphrase: String,

    /// Milliseconds between cue announcements during registration.
    #[serde(default = "default_registration_interval_ms")]
    pub registration_interval_ms: u64,

    /// Milliseconds between cue announcements during login.
    #[serde(default = "default_login_interval_ms")]
    pub login_interval_ms: u64,

    /// Pause after the registration instructions, before the first cue.
    #[serde(default = "default_registration_delay_ms")]
    pub registration_delay_ms: u64,

    /// Pause after the login instructions, before the first cue.
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    /// Overall selection deadline in milliseconds. Unset means the cycle
    /// replays until the quota is reached or the attempt is cancelled,
    /// which is the reference behavior.
    #[serde(default)]
    pub selection_deadline_ms: Option<u64>,

    /// Pause after a successful login before continuing (CLI only).
    #[serde(default = "default_success_pause_ms")]
    pub success_pause_ms: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Timing for one playback/selection attempt, resolved per flow.
#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Time each cue stays active.
    pub interval: Duration,
    /// Pause between the instructions and the first cue.
    pub instruction_delay: Duration,
    /// Overall deadline for reaching the selection quota.
    pub deadline: Option<Duration>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_labels() -> Vec<String> {
    REFERENCE_LABELS.iter().map(|s| s.to_string()).collect()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./cuelock.json")
}

fn default_passphrase() -> String {
    "cuelock development key".to_string()
}

fn default_registration_interval_ms() -> u64 {
    3_000
}

fn default_login_interval_ms() -> u64 {
    2_000
}

fn default_registration_delay_ms() -> u64 {
    5_000
}

fn default_login_delay_ms() -> u64 {
    6_000
}

fn default_success_pause_ms() -> u64 {
    2_000
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AuthConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SessionError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SessionError> {
        toml::from_str(s).map_err(|e| SessionError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("AuthConfig is always serializable to TOML")
    }

    /// The configured vocabulary, validated.
    pub fn vocabulary(&self) -> Result<Vocabulary, SessionError> {
        Ok(Vocabulary::new(self.labels.iter().map(String::as_str))?)
    }

    /// The codec key: `key_hex` when set, otherwise derived from the
    /// passphrase.
    pub fn codec_key(&self) -> Result<CodecKey, SessionError> {
        match &self.key_hex {
            Some(hex) => Ok(CodecKey::from_hex(hex)?),
            None => Ok(CodecKey::from_passphrase(&self.passphrase)),
        }
    }

    /// Playback timing for the registration flow.
    pub fn registration_playback(&self) -> PlaybackConfig {
        PlaybackConfig {
            interval: Duration::from_millis(self.registration_interval_ms),
            instruction_delay: Duration::from_millis(self.registration_delay_ms),
            deadline: self.selection_deadline_ms.map(Duration::from_millis),
        }
    }

    /// Playback timing for the login flow.
    pub fn login_playback(&self) -> PlaybackConfig {
        PlaybackConfig {
            interval: Duration::from_millis(self.login_interval_ms),
            instruction_delay: Duration::from_millis(self.login_delay_ms),
            deadline: self.selection_deadline_ms.map(Duration::from_millis),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            labels: default_labels(),
            store_path: default_store_path(),
            key_hex: None,
            passphrase: default_passphrase(),
            registration_interval_ms: default_registration_interval_ms(),
            login_interval_ms: default_login_interval_ms(),
            registration_delay_ms: default_registration_delay_ms(),
            login_delay_ms: default_login_delay_ms(),
            selection_deadline_ms: None,
            success_pause_ms: default_success_pause_ms(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl PlaybackConfig {
    /// Zero instruction delay and a short interval, for tests that drive
    /// virtual time.
    pub fn fast(interval: Duration) -> Self {
        Self {
            interval,
            instruction_delay: Duration::ZERO,
            deadline: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = AuthConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = AuthConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.labels, config.labels);
        assert_eq!(parsed.login_interval_ms, config.login_interval_ms);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = AuthConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.labels, ["cat", "cow", "crow", "sheep"]);
        assert_eq!(config.registration_interval_ms, 3_000);
        assert_eq!(config.login_interval_ms, 2_000);
        assert_eq!(config.registration_delay_ms, 5_000);
        assert_eq!(config.login_delay_ms, 6_000);
        assert_eq!(config.selection_deadline_ms, None);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            labels = ["dog", "frog", "owl"]
            login_interval_ms = 1500
        "#;
        let config = AuthConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.labels, ["dog", "frog", "owl"]);
        assert_eq!(config.login_interval_ms, 1500);
        assert_eq!(config.registration_interval_ms, 3_000); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = AuthConfig::from_toml_file("/nonexistent/cuelock.toml");
        assert!(matches!(result, Err(SessionError::Config(_))));
    }

    #[test]
    fn vocabulary_is_validated() {
        let mut config = AuthConfig::default();
        config.labels = vec!["cat".into()];
        assert!(matches!(
            config.vocabulary(),
            Err(SessionError::Vocabulary(_))
        ));
    }

    #[test]
    fn key_hex_takes_precedence_over_passphrase() {
        let mut config = AuthConfig::default();
        let passphrase_key = config.codec_key().unwrap();

        config.key_hex = Some("ab".repeat(32));
        let hex_key = config.codec_key().unwrap();
        assert_ne!(
            cuelock_crypto::CredentialCodec::new(passphrase_key).encrypt("x"),
            cuelock_crypto::CredentialCodec::new(hex_key).encrypt("x"),
        );
    }

    #[test]
    fn malformed_key_hex_is_rejected() {
        let mut config = AuthConfig::default();
        config.key_hex = Some("zz".into());
        assert!(matches!(config.codec_key(), Err(SessionError::Key(_))));
    }

    #[test]
    fn deadline_maps_into_playback_configs() {
        let mut config = AuthConfig::default();
        config.selection_deadline_ms = Some(30_000);
        assert_eq!(
            config.login_playback().deadline,
            Some(Duration::from_secs(30))
        );
        assert_eq!(
            config.registration_playback().deadline,
            Some(Duration::from_secs(30))
        );
    }
}
