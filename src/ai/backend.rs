//! LLM backend abstraction
//!
//! The auditor talks to its LLM through this trait so the provider can be
//! swapped (hosted OpenAI, an OpenAI-compatible local server, or a mock in
//! tests). The exchange is a single synchronous request/response: one system
//! instruction, one user message, one text reply. No retry policy lives here;
//! callers recover from failures via the fallback analyzer.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from a backend call.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The API returned a non-success status.
    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Connection or transport failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// The reply arrived but carried no usable content.
    #[error("invalid response from LLM: {message}")]
    InvalidResponse { message: String },

    /// Missing or invalid backend settings.
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

/// A chat-style LLM provider.
#[async_trait]
pub trait LLMBackend: Send + Sync {
    /// Sends one system + user exchange and returns the raw text reply.
    ///
    /// The reply is untrusted free text; callers must not assume it parses
    /// into any particular shape.
    async fn complete(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, BackendError>;

    /// Lightweight availability probe for health reporting.
    async fn health_check(&self) -> Result<bool, BackendError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// Model/endpoint details for logging, if known.
    fn model_info(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BackendError::Api {
            message: "HTTP 500: oops".to_string(),
            status_code: Some(500),
        };
        assert_eq!(err.to_string(), "API error: HTTP 500: oops");

        let err = BackendError::Timeout { seconds: 30 };
        assert_eq!(err.to_string(), "request timed out after 30 seconds");
    }

    #[test]
    fn test_error_is_cloneable() {
        let err = BackendError::Network {
            message: "connection refused".to_string(),
        };
        let cloned = err.clone();
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
