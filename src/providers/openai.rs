use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use log::error;

use crate::errors::GatewayError;
use crate::providers::{map_error_status, map_transport_error, ProviderKind};

/// OpenAI client for the chat completions API.
pub struct OpenAI {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to the public API)
    endpoint: String,
}

/// Chat message object shared by the chat completion providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (user, assistant)
    pub role: String,
    /// Content of the message
    pub content: String,
}

/// OpenAI chat completion request
#[derive(Debug, Serialize)]
pub struct OpenAIRequest {
    /// The model to use
    model: String,

    /// The messages for the conversation
    messages: Vec<ChatMessage>,

    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl OpenAIRequest {
    /// Create a new chat completion request.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: Some(0.7),
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

    /// Set the temperature.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// OpenAI chat completion response
#[derive(Debug, Deserialize)]
pub struct OpenAIResponse {
    /// Completion choices, the first carries the answer
    pub choices: Vec<OpenAIChoice>,
}

/// Individual choice in an OpenAI response
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    /// The generated message
    pub message: ChatMessage,
}

impl OpenAI {
    /// Create a new OpenAI client.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: if endpoint.is_empty() {
                "https://api.openai.com/v1".to_string()
            } else {
                endpoint
            },
        }
    }

    /// Complete a chat request and return the first choice's content.
    pub async fn complete(&self, request: OpenAIRequest) -> Result<String, GatewayError> {
        let api_url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| map_transport_error(ProviderKind::OpenAI, &e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("OpenAI API error ({}): {}", status, error_text);
            return Err(map_error_status(ProviderKind::OpenAI, status, &error_text));
        }

        let openai_response = response.json::<OpenAIResponse>().await.map_err(|e| {
            GatewayError::MalformedResponse(format!("failed to parse OpenAI response: {}", e))
        })?;

        openai_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| {
                GatewayError::MalformedResponse("OpenAI returned no choices".to_string())
            })
    }
}
