//! codeaudit - AI-powered audit reports for generated code
//!
//! This library analyzes a code snippet with a Large Language Model and
//! distills the unstructured reply into a structured [`AuditResult`]:
//! efficiency and complexity scores, a bug estimate, optimization
//! suggestions, cost metrics, and security red flags.
//!
//! # Core Concepts
//!
//! - **LLM Backend**: pluggable chat-completion provider behind the
//!   [`LLMBackend`] trait; the reply is treated as untrusted free text
//! - **Report Building**: deterministic keyword/regex scans that extract
//!   scores and sections from the reply, with a documented default for every
//!   field that cannot be found
//! - **Fallback Analysis**: a degraded-but-valid report produced locally
//!   whenever the LLM call fails
//! - **Platform Hints**: fixed phrase lists per AI coding platform, appended
//!   to the prompt so the LLM checks for that platform's usual failure modes
//!
//! # Example Usage
//!
//! ```ignore
//! use codeaudit::{AuditConfig, AuditRequest, AuditService};
//!
//! async fn audit() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AuditConfig::default();
//!     let service = AuditService::from_config(&config);
//!
//!     let request = AuditRequest::new("def f():\n    pass", "cursor")
//!         .with_original_prompt("write a no-op function");
//!     let report = service.analyze(request).await?;
//!
//!     println!("Efficiency: {}/100", report.efficiency_score);
//!     println!("Summary: {}", report.summary);
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`ai`]: LLM backend trait and the OpenAI-compatible client
//! - [`audit`]: prompt construction, report building, fallback analysis
//! - [`server`]: axum HTTP façade (`POST /analyze`, `GET /health`)
//! - [`cli`]: clap command-line interface

// Public modules
pub mod ai;
pub mod audit;
pub mod cli;
pub mod config;
pub mod server;
pub mod util;

// Re-export key types for convenient access
pub use ai::backend::{BackendError, LLMBackend};
pub use ai::openai::OpenAiClient;
pub use audit::service::{AuditRequest, AuditService, ServiceError};
pub use audit::types::{AuditResult, CostAnalysis};
pub use config::{AuditConfig, ConfigError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_codeaudit() {
        assert_eq!(NAME, "codeaudit");
    }
}
