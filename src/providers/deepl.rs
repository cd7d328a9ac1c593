use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use log::error;

use crate::errors::GatewayError;
use crate::providers::{map_error_status, map_transport_error, ProviderKind};

/// DeepL client for the v2 translate API.
pub struct DeepL {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults per key class)
    endpoint: String,
}

/// DeepL translate request
#[derive(Debug, Serialize)]
pub struct DeepLRequest {
    /// Texts to translate (the API takes a batch, we always send one)
    text: Vec<String>,

    /// Source language code; omitted for auto-detection
    #[serde(skip_serializing_if = "Option::is_none")]
    source_lang: Option<String>,

    /// Target language code (may carry a regional variant)
    target_lang: String,
}

impl DeepLRequest {
    /// Create a new translate request for a single text.
    pub fn new(text: impl Into<String>, source_lang: Option<&str>, target_lang: impl Into<String>) -> Self {
        Self {
            text: vec![text.into()],
            source_lang: source_lang.map(str::to_string),
            target_lang: target_lang.into(),
        }
    }
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One translation per input text
    pub translations: Vec<DeepLTranslation>,
}

/// Individual translation in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Language DeepL detected for the source text
    #[serde(default)]
    pub detected_source_language: Option<String>,

    /// The translated text
    pub text: String,
}

impl DeepL {
    /// Create a new DeepL client.
    ///
    /// Free-tier keys (suffix `:fx`) live on a different host than pro
    /// keys; an empty endpoint picks the right default from the key.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let endpoint = endpoint.into();
        let endpoint = if endpoint.is_empty() {
            if api_key.ends_with(":fx") {
                "https://api-free.deepl.com".to_string()
            } else {
                "https://api.deepl.com".to_string()
            }
        } else {
            endpoint
        };

        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key,
            endpoint,
        }
    }

    /// Translate a single text and return the translated string.
    pub async fn translate(&self, request: DeepLRequest) -> Result<String, GatewayError> {
        let api_url = format!("{}/v2/translate", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| map_transport_error(ProviderKind::DeepL, &e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepL API error ({}): {}", status, error_text);
            return Err(map_error_status(ProviderKind::DeepL, status, &error_text));
        }

        let deepl_response = response.json::<DeepLResponse>().await.map_err(|e| {
            GatewayError::MalformedResponse(format!("failed to parse DeepL response: {}", e))
        })?;

        deepl_response
            .translations
            .into_iter()
            .next()
            .map(|t| t.text)
            .ok_or_else(|| {
                GatewayError::MalformedResponse("DeepL returned no translations".to_string())
            })
    }
}
