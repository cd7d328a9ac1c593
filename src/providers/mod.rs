/*!
 * Provider implementations for the translation backends.
 *
 * This module contains client implementations for the three providers:
 * - DeepL: bilingual translation API, no native rephrasing
 * - OpenAI: chat completion API, free-text instructions
 * - DeepSeek: chat completion API, free-text instructions
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::GatewayError;

/// The translation backends the engine can talk to.
///
/// DeepL is the no-native-rephrase provider: it only translates between
/// language pairs, so rephrasing for it is synthesized by the two-hop and
/// fan-out techniques. The other two accept arbitrary prompts.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    DeepL,
    OpenAI,
    DeepSeek,
}

impl ProviderKind {
    /// Capitalized provider name for display and history records.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::DeepL => "DeepL",
            Self::OpenAI => "OpenAI",
            Self::DeepSeek => "DeepSeek",
        }
    }

    /// Whether the provider accepts free-text instructions.
    pub fn is_freeform(&self) -> bool {
        !matches!(self, Self::DeepL)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            "openai" => Ok(Self::OpenAI),
            "deepseek" => Ok(Self::DeepSeek),
            _ => Err(anyhow::anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Uniform call surface over the heterogeneous provider protocols.
///
/// The gateway implements this for real network calls; the mock provider
/// implements it for tests. The rephrasers and the orchestrator only ever
/// see this trait.
#[async_trait]
pub trait TranslateApi: Send + Sync + Debug {
    /// Translate `text` into the language identified by `target_code`.
    ///
    /// `source_code` may be `None` to request provider auto-detection
    /// where supported. For DeepL the codes are its uppercase language
    /// codes; for the LLM providers they are display language names.
    async fn translate(
        &self,
        text: &str,
        source_code: Option<&str>,
        target_code: &str,
        provider: ProviderKind,
    ) -> Result<String, GatewayError>;

    /// Send a free-text instruction and return the raw completion.
    ///
    /// Only meaningful for the freeform providers; DeepL has no prompt
    /// surface and the gateway rejects the call.
    async fn complete(&self, prompt: &str, provider: ProviderKind) -> Result<String, GatewayError>;
}

/// Map an HTTP error status to the shared error taxonomy.
///
/// 401/403 are credential failures; 402/429 and DeepL's 456 ("quota
/// exceeded") are provider rejections; everything else surfaces as a
/// malformed-response class provider fault.
pub(crate) fn map_error_status(
    provider: ProviderKind,
    status: reqwest::StatusCode,
    body: &str,
) -> GatewayError {
    let message = format!("{} API error ({}): {}", provider.display_name(), status, body);
    match status.as_u16() {
        401 | 403 => GatewayError::AuthFailed(message),
        402 | 429 | 456 => GatewayError::QuotaOrProviderRejected(message),
        _ => GatewayError::MalformedResponse(message),
    }
}

/// Map a reqwest transport error to the shared error taxonomy.
pub(crate) fn map_transport_error(provider: ProviderKind, error: &reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(format!("{} API", provider.display_name()))
    } else {
        GatewayError::NetworkFailure(format!(
            "failed to reach {} API: {}",
            provider.display_name(),
            error
        ))
    }
}

pub mod deepl;
pub mod deepseek;
pub mod mock;
pub mod openai;
