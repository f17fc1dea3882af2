//! OpenAI-compatible chat completions client
//!
//! HTTP client for the `/v1/chat/completions` API shape, which covers hosted
//! OpenAI as well as local services that mimic it. Implements [`LLMBackend`]
//! so the audit service stays provider-agnostic.

use crate::ai::backend::{BackendError, LLMBackend};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Hosted OpenAI endpoint; override for compatible local servers.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Generation parameters for audit requests. Low temperature keeps the
/// analysis text stable across runs.
const MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.1;

/// Client for OpenAI-compatible chat completion endpoints.
///
/// Thread-safe; share across tasks with `Arc`. The inner `reqwest::Client`
/// pools connections.
pub struct OpenAiClient {
    endpoint: String,
    api_key: String,
    model: String,
    http_client: Client,
    timeout: Duration,
}

impl OpenAiClient {
    /// Creates a client for the hosted OpenAI API with default settings.
    pub fn new(api_key: String) -> Self {
        Self::with_config(
            DEFAULT_ENDPOINT.to_string(),
            api_key,
            DEFAULT_MODEL.to_string(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Creates a client with explicit endpoint, model, and timeout.
    pub fn with_config(endpoint: String, api_key: String, model: String, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            endpoint,
            api_key,
            model,
            http_client,
            timeout,
        }
    }

    /// Probes the `/v1/models` endpoint to verify the service is reachable
    /// and the credential is accepted.
    ///
    /// Returns `Ok(false)` for unreachable or unhealthy services; `Err` only
    /// for unexpected transport failures.
    pub async fn check_availability(&self) -> Result<bool, BackendError> {
        let url = format!("{}/v1/models", self.endpoint);

        debug!("checking LLM service health at {}", url);

        match self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(response) => {
                let healthy = response.status().is_success();
                if !healthy {
                    warn!("LLM health check failed with status {}", response.status());
                }
                Ok(healthy)
            }
            Err(e) if e.is_timeout() || e.is_connect() => {
                warn!("cannot reach LLM service at {}: {}", self.endpoint, e);
                Ok(false)
            }
            Err(e) => Err(BackendError::Network {
                message: format!("health check failed: {}", e),
            }),
        }
    }

    async fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, BackendError> {
        let url = format!("{}/v1/chat/completions", self.endpoint);

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
            stream: Some(false),
        };

        debug!(prompt_len = user_prompt.len(), model = %self.model, "sending chat completion request");

        let start = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("LLM request timed out after {:?}", self.timeout);
                    BackendError::Timeout {
                        seconds: self.timeout.as_secs(),
                    }
                } else if e.is_connect() {
                    error!("cannot connect to LLM service at {}", self.endpoint);
                    BackendError::Network {
                        message: format!("connection failed: {}", e),
                    }
                } else {
                    error!("LLM request error: {}", e);
                    BackendError::Network {
                        message: format!("request failed: {}", e),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            error!("LLM API returned status {}: {}", status, body);

            return Err(BackendError::Api {
                message: format!("HTTP {}: {}", status, body),
                status_code: Some(status.as_u16()),
            });
        }

        let api_response: ChatResponse = response.json().await.map_err(|e| {
            error!("failed to decode LLM response: {}", e);
            BackendError::InvalidResponse {
                message: format!("JSON decode error: {}", e),
            }
        })?;

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            prompt_tokens = api_response.usage.as_ref().map(|u| u.prompt_tokens).unwrap_or(0),
            completion_tokens = api_response
                .usage
                .as_ref()
                .map(|u| u.completion_tokens)
                .unwrap_or(0),
            "chat completion finished"
        );

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content)
            .ok_or_else(|| BackendError::InvalidResponse {
                message: "no content in LLM response".to_string(),
            })
    }
}

#[async_trait]
impl LLMBackend for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, BackendError> {
        self.chat(system_prompt, user_prompt).await
    }

    async fn health_check(&self) -> Result<bool, BackendError> {
        self.check_availability().await
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model_info(&self) -> Option<String> {
        Some(format!("{} @ {}", self.model, self.endpoint))
    }
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // api_key is deliberately omitted.
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> OpenAiClient {
        OpenAiClient::new("sk-test".to_string())
    }

    #[test]
    fn test_client_defaults() {
        let client = test_client();
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.model, DEFAULT_MODEL);
        assert_eq!(client.name(), "openai");
        assert!(client.model_info().unwrap().contains(DEFAULT_MODEL));
    }

    #[test]
    fn test_client_with_config() {
        let client = OpenAiClient::with_config(
            "http://localhost:11434".to_string(),
            "dummy".to_string(),
            "qwen2.5-coder:7b".to_string(),
            Duration::from_secs(120),
        );
        assert_eq!(client.timeout, Duration::from_secs(120));
        let info = client.model_info().unwrap();
        assert!(info.contains("qwen2.5-coder:7b"));
        assert!(info.contains("localhost:11434"));
    }

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "test-model".to_string(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: "You are helpful.".to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: "Hello".to_string(),
                },
            ],
            temperature: Some(TEMPERATURE),
            max_tokens: Some(MAX_TOKENS),
            stream: Some(false),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"role\":\"system\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"max_tokens\":1500"));
    }

    #[test]
    fn test_response_parsing() {
        let body = r#"{
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "finish_reason": "stop",
                "message": {"role": "assistant", "content": "Efficiency: 80"}
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }"#;

        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.choices[0].message.as_ref().unwrap().content,
            "Efficiency: 80"
        );
        assert_eq!(response.usage.unwrap().prompt_tokens, 12);
    }

    #[test]
    fn test_response_without_choices() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(response.choices.is_empty());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let debug_str = format!("{:?}", test_client());
        assert!(!debug_str.contains("sk-test"));
        assert!(debug_str.contains("api.openai.com"));
    }
}
