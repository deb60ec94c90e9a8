//! Groq-backed chat client speaking the OpenAI chat completions wire format.

use super::{ChatProvider, CompletionRequest, PromptMessage, ProviderError};
use async_trait::async_trait;
use concierge_config::ProviderConfig;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Client for an OpenAI-compatible `chat/completions` endpoint.
pub struct GroqClient {
    http: Client,
    api_key: String,
    base_url: String,
    timeout_secs: u64,
}

impl GroqClient {
    /// Build a client from provider settings.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ProviderError::Http(err.to_string()))?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Classify a reqwest failure as a timeout or plain transport error.
    fn transport_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.timeout_secs)
        } else {
            ProviderError::Http(err.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
struct WireErrorDetail {
    message: String,
}

/// Turn a raw HTTP status and body into an assistant reply or error.
fn decode_reply(status: StatusCode, body: &str) -> Result<String, ProviderError> {
    if !status.is_success() {
        if let Ok(error) = serde_json::from_str::<WireError>(body) {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error.error.message,
            });
        }
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message: body.to_string(),
        });
    }
    let response: WireResponse = serde_json::from_str(body)
        .map_err(|err| ProviderError::MalformedResponse(err.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ProviderError::MissingContent)
}

#[async_trait]
impl ChatProvider for GroqClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);
        let wire = WireRequest {
            model: &request.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };
        debug!(
            "requesting completion (model={}, messages={})",
            request.model,
            request.messages.len()
        );

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&wire)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| self.transport_error(err))?;
        decode_reply(status, &body)
    }
}
