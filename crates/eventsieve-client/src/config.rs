//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/eventsieve/config.toml` by default. Every section is optional
//! and command-line flags win over file values.

use std::path::{Path, PathBuf};

use eventsieve_core::format::DEFAULT_NO_EVENTS_TEXT;
use eventsieve_core::{FilterConfig, FormatOptions, LookaheadRange};
use eventsieve_store::StoreBackend;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// User id used when neither `--user` nor the config file names one.
pub const DEFAULT_USER: &str = "default";

const APP_DIR: &str = "eventsieve";

/// Configuration for the eventsieve client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Identity whose saved filters are used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    pub filters: FilterSettings,

    pub store: StoreSettings,

    pub display: DisplaySettings,
}

/// Range and attendance defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    pub range: LookaheadRange,

    /// Drop events nobody else is invited to.
    pub exclude_no_attendees: bool,

    /// Drop instances of recurring series.
    pub exclude_recurring: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            range: LookaheadRange::default(),
            exclude_no_attendees: true,
            exclude_recurring: false,
        }
    }
}

impl FilterSettings {
    pub fn to_filter_config(&self) -> FilterConfig {
        FilterConfig::from_range(self.range)
            .with_exclude_no_attendees(self.exclude_no_attendees)
            .with_exclude_recurring(self.exclude_recurring)
    }
}

/// Where saved filters are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,

    /// Store file; defaults to the backend's file in the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StoreSettings {
    /// The file the backend reads and writes.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(ref path) = self.path {
            return path.clone();
        }
        let file_name = self.backend.default_file_name().unwrap_or("filters");
        ClientConfig::default_data_dir().join(file_name)
    }
}

/// Display settings for output formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum description length in the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_description_length: Option<usize>,

    /// Text to show when nothing survives filtering.
    pub no_events_text: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        let format = FormatOptions::default();
        Self {
            max_description_length: format.max_description_length,
            no_events_text: DEFAULT_NO_EVENTS_TEXT.to_string(),
        }
    }
}

impl DisplaySettings {
    pub fn to_format_options(&self) -> FormatOptions {
        FormatOptions {
            max_description_length: self.max_description_length,
            no_events_text: self.no_events_text.clone(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if absent.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::parse(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Returns the configuration problems, empty when valid.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.user.as_deref().is_some_and(|user| user.trim().is_empty()) {
            problems.push("user must not be empty".to_string());
        }
        if self.display.no_events_text.trim().is_empty() {
            problems.push("display.no_events_text must not be empty".to_string());
        }
        if let Some(ref path) = self.store.path {
            if self.store.backend == StoreBackend::Memory {
                problems.push("store.path is ignored by the memory backend".to_string());
            } else if path.is_dir() {
                problems.push(format!("store.path {} is a directory", path.display()));
            }
        }

        problems
    }

    /// The user id, falling back to [`DEFAULT_USER`].
    pub fn user_id(&self) -> &str {
        self.user.as_deref().unwrap_or(DEFAULT_USER)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// Returns the default data directory path.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}
