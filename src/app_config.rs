use anyhow::Result;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::file_utils::FileManager;
use crate::providers::ProviderKind;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings, and credential lookup
/// with placeholder detection.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Active translation provider
    #[serde(default)]
    pub provider: ProviderKind,

    /// Source language display name
    pub source_language: String,

    /// Target language display name
    pub target_language: String,

    /// Credentials and endpoints per provider
    #[serde(default)]
    pub available_providers: Vec<ProviderConfig>,

    /// History file path
    #[serde(default = "default_history_file")]
    pub history_file: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type")]
    pub provider: ProviderKind,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Model name (ignored by DeepL)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: Service URL override
    #[serde(default = "String::new")]
    pub endpoint: String,
}

impl ProviderConfig {
    // @param provider: Provider enum
    // @returns: Provider config with placeholder key and defaults
    pub fn new(provider: ProviderKind) -> Self {
        Self {
            provider,
            api_key: placeholder_key(provider).to_string(),
            model: default_model(provider).to_string(),
            endpoint: String::new(),
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

fn default_history_file() -> String {
    "translation_history.json".to_string()
}

/// Placeholder value written into a fresh config for each provider.
pub fn placeholder_key(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::DeepL => "YOUR_DEEPL_KEY_HERE",
        ProviderKind::OpenAI => "YOUR_OPENAI_KEY_HERE",
        ProviderKind::DeepSeek => "YOUR_DEEPSEEK_KEY_HERE",
    }
}

/// Default model name per provider (empty for DeepL).
pub fn default_model(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::DeepL => "",
        ProviderKind::OpenAI => "gpt-3.5-turbo",
        ProviderKind::DeepSeek => "deepseek-chat",
    }
}

/// Check whether a stored key is usable, i.e. non-empty and not a
/// placeholder left over from the generated default config.
pub fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !key.contains("KEY_HERE")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            provider: ProviderKind::default(),
            source_language: "English".to_string(),
            target_language: "Turkish".to_string(),
            available_providers: vec![
                ProviderConfig::new(ProviderKind::DeepL),
                ProviderConfig::new(ProviderKind::OpenAI),
                ProviderConfig::new(ProviderKind::DeepSeek),
            ],
            history_file: default_history_file(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Get the provider entry for a kind, if present.
    pub fn provider_config(&self, provider: ProviderKind) -> Option<&ProviderConfig> {
        self.available_providers.iter().find(|p| p.provider == provider)
    }

    /// Get the usable credential for a provider.
    ///
    /// Absent entries, empty keys, and placeholder keys all resolve to
    /// `None` so callers can treat them identically as "not configured".
    pub fn credential(&self, provider: ProviderKind) -> Option<&str> {
        self.provider_config(provider)
            .map(|p| p.api_key.trim())
            .filter(|key| is_usable_key(key))
    }

    /// Get the endpoint override for a provider (empty means default).
    pub fn endpoint(&self, provider: ProviderKind) -> String {
        self.provider_config(provider)
            .map(|p| p.endpoint.clone())
            .unwrap_or_default()
    }

    /// Get the model for a provider, falling back to the built-in default.
    pub fn model(&self, provider: ProviderKind) -> String {
        self.provider_config(provider)
            .filter(|p| !p.model.is_empty())
            .map_or_else(|| default_model(provider).to_string(), |p| p.model.clone())
    }

    /// Validate the configuration for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.source_language.trim().is_empty() || self.target_language.trim().is_empty() {
            return Err(anyhow::anyhow!("Source and target languages must be set"));
        }
        Ok(())
    }

    /// Load a config file, creating a default one if it does not exist.
    ///
    /// A corrupt file is moved aside to a timestamped sibling and replaced
    /// with a fresh default so the application can always start.
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !FileManager::file_exists(path) {
            let config = Self::default();
            config.save(path)?;
            warn!(
                "Created default configuration at {:?}; add your API keys before use",
                path
            );
            return Ok(config);
        }

        let content = FileManager::read_to_string(path)?;
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                error!("Failed to parse config file {:?}: {}", path, e);
                let aside = FileManager::move_aside(path, "corrupt")?;
                warn!("Corrupt config moved to {:?}; regenerating defaults", aside);
                let config = Self::default();
                config.save(path)?;
                Ok(config)
            }
        }
    }

    /// Save the configuration as pretty-printed JSON.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        FileManager::write_to_file(path, &content)
    }
}
