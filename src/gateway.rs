use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use url::Url;

use crate::app_config::Config;
use crate::errors::GatewayError;
use crate::providers::deepl::{DeepL, DeepLRequest};
use crate::providers::deepseek::{DeepSeek, DeepSeekRequest};
use crate::providers::openai::{OpenAI, OpenAIRequest};
use crate::providers::{ProviderKind, TranslateApi};

// @module: Uniform gateway over the three provider protocols

/// Uniform synchronous call surface over the provider clients.
///
/// Clients are only constructed for providers with a usable credential;
/// calls to anything else resolve to `GatewayError::Unconfigured` without
/// touching the network. All provider faults are mapped into the shared
/// `GatewayError` taxonomy, never panics.
pub struct ProviderGateway {
    /// DeepL client, present when a usable key is configured
    deepl: Option<DeepL>,

    /// OpenAI client, present when a usable key is configured
    openai: Option<OpenAI>,

    /// DeepSeek client, present when a usable key is configured
    deepseek: Option<DeepSeek>,

    /// Model name for OpenAI completions
    openai_model: String,

    /// Model name for DeepSeek completions
    deepseek_model: String,
}

impl std::fmt::Debug for ProviderGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderGateway")
            .field("deepl", &self.deepl.is_some())
            .field("openai", &self.openai.is_some())
            .field("deepseek", &self.deepseek.is_some())
            .finish()
    }
}

/// Validate a non-empty endpoint override before handing it to a client.
fn validated_endpoint(endpoint: &str) -> Result<String> {
    if endpoint.is_empty() {
        return Ok(String::new());
    }
    Url::parse(endpoint).context(format!("Invalid endpoint URL: {}", endpoint))?;
    Ok(endpoint.to_string())
}

impl ProviderGateway {
    /// Build a gateway from the application configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let deepl = match config.credential(ProviderKind::DeepL) {
            Some(key) => {
                let endpoint = validated_endpoint(&config.endpoint(ProviderKind::DeepL))?;
                Some(DeepL::new(key, endpoint))
            }
            None => None,
        };

        let openai = match config.credential(ProviderKind::OpenAI) {
            Some(key) => {
                let endpoint = validated_endpoint(&config.endpoint(ProviderKind::OpenAI))?;
                Some(OpenAI::new(key, endpoint))
            }
            None => None,
        };

        let deepseek = match config.credential(ProviderKind::DeepSeek) {
            Some(key) => {
                let endpoint = validated_endpoint(&config.endpoint(ProviderKind::DeepSeek))?;
                Some(DeepSeek::new(key, endpoint))
            }
            None => None,
        };

        Ok(Self {
            deepl,
            openai,
            deepseek,
            openai_model: config.model(ProviderKind::OpenAI),
            deepseek_model: config.model(ProviderKind::DeepSeek),
        })
    }

    /// Whether a provider has a configured client.
    pub fn is_configured(&self, provider: ProviderKind) -> bool {
        match provider {
            ProviderKind::DeepL => self.deepl.is_some(),
            ProviderKind::OpenAI => self.openai.is_some(),
            ProviderKind::DeepSeek => self.deepseek.is_some(),
        }
    }

    fn unconfigured(provider: ProviderKind) -> GatewayError {
        GatewayError::Unconfigured(provider.display_name().to_string())
    }
}

#[async_trait]
impl TranslateApi for ProviderGateway {
    async fn translate(
        &self,
        text: &str,
        source_code: Option<&str>,
        target_code: &str,
        provider: ProviderKind,
    ) -> Result<String, GatewayError> {
        debug!(
            "translate via {}: {:?} -> {}",
            provider.display_name(),
            source_code,
            target_code
        );

        match provider {
            ProviderKind::DeepL => {
                let client = self.deepl.as_ref().ok_or_else(|| Self::unconfigured(provider))?;
                client
                    .translate(DeepLRequest::new(text, source_code, target_code))
                    .await
            }
            // The freeform providers translate through a plain instruction;
            // their target "code" is the display language name.
            ProviderKind::OpenAI | ProviderKind::DeepSeek => {
                let prompt = format!("Translate the following text into {}:\n\n{}", target_code, text);
                self.complete(&prompt, provider).await
            }
        }
    }

    async fn complete(&self, prompt: &str, provider: ProviderKind) -> Result<String, GatewayError> {
        debug!("complete via {}", provider.display_name());

        match provider {
            ProviderKind::DeepL => Err(GatewayError::QuotaOrProviderRejected(
                "DeepL does not accept free-text prompts".to_string(),
            )),
            ProviderKind::OpenAI => {
                let client = self.openai.as_ref().ok_or_else(|| Self::unconfigured(provider))?;
                let request = OpenAIRequest::new(&self.openai_model).add_message("user", prompt);
                client.complete(request).await
            }
            ProviderKind::DeepSeek => {
                let client = self.deepseek.as_ref().ok_or_else(|| Self::unconfigured(provider))?;
                let request = DeepSeekRequest::new(&self.deepseek_model).add_message("user", prompt);
                client.complete(request).await
            }
        }
    }
}
