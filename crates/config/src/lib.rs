//! Configuration loading, validation, and management for Wayfarer.
//!
//! Loads configuration from `~/.wayfarer/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default concierge persona sent as the system message.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are Wayfarer, an expert travel concierge. Use your tools proactively to help users plan complete trips. When a user asks to plan a trip, automatically search flights AND hotels AND weather AND activities without being asked. Compare options and give specific recommendations with prices. Always be helpful, specific, and enthusiastic about travel.

When presenting results:
- Format prices clearly with currency
- Highlight the best value options
- Mention key amenities and features
- Give personalized recommendations based on the user's needs
- Be concise but thorough

Important: Use the tools available to you. Don't make up flight numbers, prices, or hotel names - always use the tools to get real data.";

/// The root configuration structure.
///
/// Maps directly to `~/.wayfarer/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model backend settings
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Orchestration loop settings
    #[serde(default)]
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama daemon
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model to chat with (family:tag form)
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}
fn default_model() -> String {
    "qwen3:8b".into()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Upper bound on model round-trips per user turn
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Override the concierge system prompt
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

fn default_max_iterations() -> u32 {
    8
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            system_prompt: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.wayfarer/config.toml).
    ///
    /// Environment variables take priority over the file:
    /// - `WAYFARER_OLLAMA_URL` (falls back to `OLLAMA_URL`)
    /// - `WAYFARER_MODEL` (falls back to `OLLAMA_MODEL`)
    /// - `WAYFARER_MAX_ITERATIONS`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if let Some(url) = env_first(&["WAYFARER_OLLAMA_URL", "OLLAMA_URL"]) {
            config.ollama.base_url = url;
        }
        if let Some(model) = env_first(&["WAYFARER_MODEL", "OLLAMA_MODEL"]) {
            config.ollama.model = model;
        }
        if let Ok(raw) = std::env::var("WAYFARER_MAX_ITERATIONS") {
            config.agent.max_iterations = raw.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "WAYFARER_MAX_ITERATIONS must be an integer, got {raw:?}"
                ))
            })?;
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
        dirs_home().join(".wayfarer")
    }

    /// The effective system prompt (override or the built-in persona).
    pub fn system_prompt(&self) -> &str {
        self.agent
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.ollama.base_url.starts_with("http://") && !self.ollama.base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "ollama.base_url must be an http(s) URL, got {:?}",
                self.ollama.base_url
            )));
        }

        if self.ollama.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "ollama.model must not be empty".into(),
            ));
        }

        if !(1..=32).contains(&self.agent.max_iterations) {
            return Err(ConfigError::ValidationError(
                "agent.max_iterations must be between 1 and 32".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for first-run setup).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama: OllamaConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

fn env_first(keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| std::env::var(k).ok())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.ollama.model, "qwen3:8b");
        assert_eq!(config.agent.max_iterations, 8);
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.ollama.model, config.ollama.model);
        assert_eq!(parsed.agent.max_iterations, config.agent.max_iterations);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: AppConfig = toml::from_str("[ollama]\nmodel = \"llama3.1:70b\"\n").unwrap();
        assert_eq!(config.ollama.model, "llama3.1:70b");
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
        assert_eq!(config.agent.max_iterations, 8);
    }

    #[test]
    fn invalid_base_url_rejected() {
        let config = AppConfig {
            ollama: OllamaConfig {
                base_url: "localhost:11434".into(),
                ..OllamaConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_iterations_rejected() {
        let config = AppConfig {
            agent: AgentConfig {
                max_iterations: 0,
                ..AgentConfig::default()
            },
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        assert_eq!(result.unwrap().agent.max_iterations, 8);
    }

    #[test]
    fn system_prompt_override_wins() {
        let config: AppConfig =
            toml::from_str("[agent]\nsystem_prompt = \"Be terse.\"\n").unwrap();
        assert_eq!(config.system_prompt(), "Be terse.");
        assert!(AppConfig::default().system_prompt().contains("travel concierge"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("qwen3:8b"));
        assert!(toml_str.contains("max_iterations = 8"));
    }
}
