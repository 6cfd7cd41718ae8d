use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::language_utils::validate_lang_tag;
use crate::store::schema::SCHEMA_VERSION;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Store name; maps to the database file name under the data directory
    #[serde(default = "default_database_name")]
    pub database_name: String,

    /// Requested schema version; bumping it drops and recreates the store
    #[serde(default = "default_schema_version")]
    pub schema_version: i32,

    /// Debounce window for interactive lookups, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Languages offered by the lookup UI
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageEntry>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// A selectable language in the lookup UI
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Short language tag ('en', 'ind')
    pub id: String,
    /// Display name
    pub name: String,
}

impl LanguageEntry {
    /// Create a new language entry
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_database_name() -> String {
    "translations".to_string()
}

fn default_schema_version() -> i32 {
    SCHEMA_VERSION
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_languages() -> Vec<LanguageEntry> {
    vec![
        LanguageEntry::new("de", "German"),
        LanguageEntry::new("en", "English"),
        LanguageEntry::new("ind", "Indonesian"),
    ]
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.database_name.trim().is_empty() {
            return Err(anyhow!("Database name must not be empty"));
        }

        if self.schema_version < 1 {
            return Err(anyhow!(
                "Schema version must be at least 1, got {}",
                self.schema_version
            ));
        }

        if self.languages.is_empty() {
            return Err(anyhow!("At least one language must be configured"));
        }

        for entry in &self.languages {
            validate_lang_tag(&entry.id)?;
        }

        Ok(())
    }

    /// Look up a configured language by its tag
    pub fn language(&self, id: &str) -> Option<&LanguageEntry> {
        self.languages.iter().find(|entry| entry.id == id)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            database_name: default_database_name(),
            schema_version: default_schema_version(),
            debounce_ms: default_debounce_ms(),
            languages: default_languages(),
            log_level: LogLevel::default(),
        }
    }
}
