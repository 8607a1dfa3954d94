//! Screener configuration — host-supplied options with JSON persistence.
//!
//! The host integration supplies five options: an enable flag, the
//! blacklist and whitelist term lists, the remediation mode, and the
//! ban reason. Hosts that store options as comma-separated strings can
//! use the CSV constructor; embedded hosts can build the struct
//! directly or load it from a JSON file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::screening::{split_terms, ContentRules};

const CONFIG_FILENAME: &str = "profile-sentry.json";

/// What to do with a profile once disallowed content is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemediationMode {
    /// Empty the offending fields, leave the account alone.
    Clean,
    /// Ban the account, leave the field content untouched.
    Ban,
    /// Empty the offending fields and ban the account.
    // Unrecognized mode strings fall back here, matching the original
    // plugin's switch default.
    #[default]
    #[serde(other)]
    Both,
}

impl RemediationMode {
    /// Parse a host-supplied mode string. Anything other than "clean"
    /// or "ban" means `Both`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "clean" => Self::Clean,
            "ban" => Self::Ban,
            _ => Self::Both,
        }
    }
}

/// Full screener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    /// Master switch — when false, no event is ever screened.
    pub enabled: bool,
    /// Terms whose presence marks a field as disallowed.
    pub blacklist: Vec<String>,
    /// Characters exempted from the non-ASCII check, in addition to the
    /// built-in set.
    pub whitelist: Vec<String>,
    pub mode: RemediationMode,
    /// Shown in the host's moderation UI when a user is banned.
    pub ban_reason: String,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blacklist: Vec::new(),
            whitelist: Vec::new(),
            mode: RemediationMode::default(),
            ban_reason: String::new(),
        }
    }
}

impl ScreenerConfig {
    /// Build a config from the comma-separated blacklist/whitelist form
    /// used by host configuration constants.
    pub fn from_csv(
        enabled: bool,
        blacklist: &str,
        whitelist: &str,
        mode: RemediationMode,
        ban_reason: &str,
    ) -> Self {
        Self {
            enabled,
            blacklist: split_terms(blacklist),
            whitelist: split_terms(whitelist),
            mode,
            ban_reason: ban_reason.to_string(),
        }
    }

    /// Screening rules derived from this config.
    pub fn rules(&self) -> ContentRules {
        ContentRules::new(self.blacklist.clone(), self.whitelist.clone())
    }

    /// Default config file location, e.g.
    /// `~/.config/profile-sentry/profile-sentry.json` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("profile-sentry").join(CONFIG_FILENAME))
    }

    /// Load a config from `path`. A missing file yields the defaults
    /// (nothing is ever blocked until a blacklist is configured).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save the config as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Parse)?;

        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
