//! Shell settings for kubeline.
//!
//! A small JSON document (`~/.config/kubeline/settings.json` on most
//! platforms) holding the knobs that rarely change between sessions: the
//! kubectl binary, cache timings, and the history file. Missing keys take
//! their defaults; a missing file is the same as an empty one. Command-line
//! flags override whatever is loaded here.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::expand_tilde;

/// Environment variable allowing callers to override the settings file path.
pub const SETTINGS_PATH_ENV: &str = "KUBELINE_SETTINGS_PATH";

/// Default filename for the JSON payload.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

const DEFAULT_CACHE_TTL_SECS: u64 = 10;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

/// Error surfaced when the settings file exists but cannot be read.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persisted shell settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    /// Binary used both for execution and for resource fetches.
    pub kubectl_path: String,
    /// Maximum age of a resource snapshot before a read triggers a refresh.
    pub cache_ttl_secs: u64,
    /// Upper bound on a single background fetch.
    pub fetch_timeout_secs: u64,
    /// Line editor history file; `None` keeps history in memory only.
    pub history_path: Option<String>,
    /// Prompt shown before each line.
    pub prompt: String,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            kubectl_path: "kubectl".to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            history_path: default_history_path().map(|path| path.display().to_string()),
            prompt: "kubectl ".to_string(),
        }
    }
}

impl ShellSettings {
    /// Load settings from the default location.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&default_settings_path())
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(settings) => {
                    debug!(path = %path.display(), "loaded shell settings");
                    Ok(settings)
                }
                Err(error) => {
                    warn!(
                        path = %path.display(),
                        error = %error,
                        "Failed to parse settings file; using defaults"
                    );
                    Ok(Self::default())
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    /// History file with `~` expanded.
    pub fn history_file(&self) -> Option<PathBuf> {
        self.history_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
            .map(expand_tilde)
    }
}

/// Resolve the settings file path, honouring [`SETTINGS_PATH_ENV`].
pub fn default_settings_path() -> PathBuf {
    if let Ok(path) = env::var(SETTINGS_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return expand_tilde(trimmed);
        }
    }

    kubeline_config_dir().join(SETTINGS_FILE_NAME)
}

/// Directory holding kubeline's own files (settings, history, logs).
pub fn kubeline_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join("kubeline")
}

fn default_history_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("kubeline").join("history.txt"))
}
