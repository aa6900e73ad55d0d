//! Backend and page configuration.
//!
//! The backend endpoint and publishable key come from the environment
//! (`PUBLIC_BACKEND_URL`, `PUBLIC_BACKEND_ANON_KEY`). Missing values fall
//! back to empty strings: startup never fails on them, the gap is logged as
//! a configuration error and writes fail downstream instead.

use std::path::{Path, PathBuf};

use perp_observability::StructuredLogger;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable holding the backend endpoint URL.
pub const BACKEND_URL_VAR: &str = "PUBLIC_BACKEND_URL";
/// Environment variable holding the publishable client key.
pub const BACKEND_ANON_KEY_VAR: &str = "PUBLIC_BACKEND_ANON_KEY";

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["perp.toml", ".perp.toml"];

/// Connection settings for the remote collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the hosted backend.
    #[serde(default)]
    pub url: String,

    /// Publishable (anonymous) client key.
    #[serde(default)]
    pub anon_key: String,

    /// Table the waitlist entries are inserted into.
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "waitlist".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            table: default_table(),
        }
    }
}

impl BackendConfig {
    /// Create a config with explicit values.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            table: default_table(),
        }
    }

    /// Set the target table.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Read the backend settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the backend settings through a variable lookup.
    ///
    /// Unset variables become empty strings.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            url: lookup(BACKEND_URL_VAR).unwrap_or_default(),
            anon_key: lookup(BACKEND_ANON_KEY_VAR).unwrap_or_default(),
            table: default_table(),
        }
    }

    /// Overlay non-empty environment values on top of this config.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BACKEND_URL_VAR).filter(|v| !v.is_empty()) {
            self.url = url;
        }
        if let Some(key) = lookup(BACKEND_ANON_KEY_VAR).filter(|v| !v.is_empty()) {
            self.anon_key = key;
        }
        self
    }

    /// Names of the required variables that are empty.
    pub fn issues(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.trim().is_empty() {
            missing.push(BACKEND_URL_VAR);
        }
        if self.anon_key.trim().is_empty() {
            missing.push(BACKEND_ANON_KEY_VAR);
        }
        missing
    }

    /// Whether both endpoint and key are present.
    pub fn is_complete(&self) -> bool {
        self.issues().is_empty()
    }

    /// Log a configuration error if anything is missing.
    ///
    /// Returns `true` when the config is complete.
    pub fn report_issues(&self, logger: &StructuredLogger) -> bool {
        let missing = self.issues();
        if missing.is_empty() {
            return true;
        }
        logger
            .error_builder("Missing backend configuration; waitlist writes will fail")
            .field("missing", missing.join(", "))
            .emit();
        false
    }

    /// The anon key with all but its last four characters masked.
    pub fn redacted_key(&self) -> String {
        let chars: Vec<char> = self.anon_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

/// Page metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_description")]
    pub description: String,
}

fn default_title() -> String {
    "Perfx | 24/7 Perpetual Futures for Currencies".to_string()
}

fn default_description() -> String {
    "Onchain orderbook based perpetual futures exchange for currencies.".to_string()
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: default_description(),
        }
    }
}

/// Configuration file (`perp.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandingConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub page: PageConfig,
}

impl LandingConfig {
    /// Parse a config from TOML text.
    pub fn parse(content: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        Self::parse(&content, &display)
    }

    /// Find a config file in `start` or any of its parents.
    pub fn find(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILE_NAMES {
                let candidate = current.join(name);
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Resolve the effective config: explicit path, else discovered file,
    /// else defaults; environment values win over file values.
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::load(path)?,
            None => match Self::find(cwd) {
                Some(path) => Self::load(&path)?,
                None => Self::default(),
            },
        };
        Ok(config.with_env_overrides(|name| std::env::var(name).ok()))
    }

    /// Apply environment overrides to the backend section.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.backend = self.backend.with_overrides(lookup);
        self
    }
}
