//! Configuration loading, validation, and management for Mentora.
//!
//! Loads configuration from `~/.mentora/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.mentora/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Text generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Intent classifier rule table
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Chat session settings
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    1024
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// One keyword rule: any keyword hit maps the message to the label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub keywords: Vec<String>,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_label")]
    pub default_label: String,

    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,
}

fn default_label() -> String {
    "academic_advisor".into()
}

fn default_rules() -> Vec<RuleConfig> {
    fn rule(keywords: &[&str], label: &str) -> RuleConfig {
        RuleConfig {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            label: label.into(),
        }
    }

    vec![
        rule(
            &["grade", "course", "class", "study", "academic"],
            "academic_advisor",
        ),
        rule(
            &["career", "job", "profession", "employment"],
            "career_counselor",
        ),
        rule(
            &["sad", "happy", "anxious", "stressed", "emotion", "feel"],
            "emotional_support",
        ),
        rule(
            &["project", "assignment", "thesis", "research"],
            "project_mentor",
        ),
    ]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_label: default_label(),
            rules: default_rules(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How many trailing messages feed the chat_history context value.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_history_window() -> usize {
    10
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.mentora/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `MENTORA_TEMPERATURE`
    /// - `MENTORA_MAX_TOKENS`
    /// - `MENTORA_DEFAULT_LABEL`
    /// - `MENTORA_HISTORY_WINDOW`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Ok(temperature) = std::env::var("MENTORA_TEMPERATURE") {
            config.generation.temperature = temperature
                .parse()
                .map_err(|_| ConfigError::ValidationError("MENTORA_TEMPERATURE must be a number".into()))?;
        }
        if let Ok(max_tokens) = std::env::var("MENTORA_MAX_TOKENS") {
            config.generation.max_tokens = max_tokens
                .parse()
                .map_err(|_| ConfigError::ValidationError("MENTORA_MAX_TOKENS must be an integer".into()))?;
        }
        if let Ok(label) = std::env::var("MENTORA_DEFAULT_LABEL") {
            config.classifier.default_label = label;
        }
        if let Ok(window) = std::env::var("MENTORA_HISTORY_WINDOW") {
            config.session.history_window = window
                .parse()
                .map_err(|_| ConfigError::ValidationError("MENTORA_HISTORY_WINDOW must be an integer".into()))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".mentora")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.generation.temperature < 0.0 || self.generation.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "generation.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.session.history_window == 0 {
            return Err(ConfigError::ValidationError(
                "session.history_window must be at least 1".into(),
            ));
        }

        for rule in &self.classifier.rules {
            if rule.label.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "classifier rule label must not be empty".into(),
                ));
            }
            if rule.keywords.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "classifier rule '{}' has no keywords",
                    rule.label
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation: GenerationConfig::default(),
            classifier: ClassifierConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
