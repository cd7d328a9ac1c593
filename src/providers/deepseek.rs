use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use log::error;

use crate::errors::GatewayError;
use crate::providers::openai::ChatMessage;
use crate::providers::{map_error_status, map_transport_error, ProviderKind};

/// DeepSeek client for its OpenAI-compatible chat completions API.
pub struct DeepSeek {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// DeepSeek chat completion request
#[derive(Debug, Serialize)]
pub struct DeepSeekRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,
}

impl DeepSeekRequest {
    /// Create a new chat completion request.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    /// Add a message to the request.
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: content.into(),
        });
        self
    }
}

/// DeepSeek chat completion response
#[derive(Debug, Deserialize)]
pub struct DeepSeekResponse {
    /// Completion choices, the first carries the answer
    pub choices: Vec<DeepSeekChoice>,
}

/// Individual choice in a DeepSeek response
#[derive(Debug, Deserialize)]
pub struct DeepSeekChoice {
    /// The generated message
    pub message: ChatMessage,
}

impl DeepSeek {
    /// Create a new DeepSeek client.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() {
                "https://api.deepseek.com/v1".to_string()
            } else {
                endpoint
            },
        }
    }

    /// Complete a chat request and return the first choice's content.
    pub async fn complete(&self, request: DeepSeekRequest) -> Result<String, GatewayError> {
        let api_url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| map_transport_error(ProviderKind::DeepSeek, &e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("DeepSeek API error ({}): {}", status, error_text);
            return Err(map_error_status(ProviderKind::DeepSeek, status, &error_text));
        }

        let deepseek_response = response.json::<DeepSeekResponse>().await.map_err(|e| {
            GatewayError::MalformedResponse(format!("failed to parse DeepSeek response: {}", e))
        })?;

        deepseek_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                GatewayError::MalformedResponse("DeepSeek returned no choices".to_string())
            })
    }
}
