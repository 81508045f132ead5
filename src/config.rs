//! Configuration for the interview evaluator.
//!
//! Supports both environment variables and YAML config file.
//! Environment variables take precedence over config file values.

use crate::error::{EvalError, Result};
use crate::gemini::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default base URL of the generation API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Generation API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Base URL for the generation API.
    pub api_base: String,

    /// API key, sent as the `key` query parameter.
    pub api_key: String,

    /// Model name (e.g., "gemini-3-flash-preview").
    pub model: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Prompt settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromptConfig {
    /// Custom evaluation prompt template. Uses the built-in template when absent.
    pub template: Option<String>,
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Generation API settings.
    pub gemini: GeminiConfig,

    /// Prompt settings.
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Configuration file structure (YAML format).
#[derive(Debug, Deserialize)]
struct ConfigFile {
    gemini: Option<GeminiFileSection>,
    prompt: Option<PromptFileSection>,
}

#[derive(Debug, Deserialize)]
struct GeminiFileSection {
    api_base: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PromptFileSection {
    template: Option<String>,
}

impl Config {
    /// Load configuration from environment variables and optional config file.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (GEMINI_API_BASE, GEMINI_API_KEY, GEMINI_MODEL)
    /// 2. Config file (~/.config/interview-eval/config.yaml)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        // Try to load from config file first
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                config = Self::load_from_file(&config_path)?;
            }
        }

        // Override with environment variables
        if let Ok(api_base) = env::var("GEMINI_API_BASE") {
            config.gemini.api_base = api_base;
        }

        if let Ok(api_key) = env::var("GEMINI_API_KEY") {
            config.gemini.api_key = api_key;
        }

        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.gemini.model = model;
        }

        if let Ok(timeout) = env::var("GEMINI_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.gemini.timeout_secs = secs;
            }
        }

        if let Ok(template_path) = env::var("EVAL_PROMPT_TEMPLATE_FILE") {
            let path = PathBuf::from(template_path);
            let template =
                std::fs::read_to_string(&path).map_err(|e| EvalError::io(&path, e))?;
            config.prompt.template = Some(template);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::io(path, e))?;

        let file_config: ConfigFile = serde_yaml::from_str(&content)
            .map_err(|e| EvalError::Config(format!("Failed to parse config file: {}", e)))?;

        let mut config = Config::default();

        if let Some(gemini) = file_config.gemini {
            if let Some(api_base) = gemini.api_base {
                config.gemini.api_base = api_base;
            }
            if let Some(api_key) = gemini.api_key {
                config.gemini.api_key = api_key;
            }
            if let Some(model) = gemini.model {
                config.gemini.model = model;
            }
            if let Some(timeout_secs) = gemini.timeout_secs {
                config.gemini.timeout_secs = timeout_secs;
            }
        }

        if let Some(prompt) = file_config.prompt {
            config.prompt.template = prompt.template;
        }

        Ok(config)
    }

    /// Get the default config file path.
    pub fn config_file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "interview-eval")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Validate that required configuration is present.
    pub fn validate(&self) -> Result<()> {
        if self.gemini.api_base.is_empty() {
            return Err(EvalError::Config(
                "Generation API base URL is required. Set GEMINI_API_BASE environment variable or add to config file.".to_string()
            ));
        }

        if self.gemini.api_key.trim().is_empty() {
            return Err(EvalError::Config(
                "Generation API key is required. Set GEMINI_API_KEY environment variable or add to config file.".to_string()
            ));
        }

        if self.gemini.model.is_empty() {
            return Err(EvalError::Config(
                "Generation model is required. Set GEMINI_MODEL environment variable or add to config file."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// The prompt template to use: the configured one, or the built-in default.
    pub fn prompt_template(&self) -> PromptTemplate {
        self.prompt
            .template
            .as_deref()
            .map(PromptTemplate::new)
            .unwrap_or_default()
    }

    /// Create a config from explicit values (useful for testing).
    pub fn with_gemini(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            gemini: GeminiConfig {
                api_base: api_base.into(),
                api_key: api_key.into(),
                model: model.into(),
                ..Default::default()
            },
            prompt: PromptConfig::default(),
        }
    }
}
