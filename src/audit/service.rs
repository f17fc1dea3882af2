//! Audit service orchestration
//!
//! `AuditService` is the single entry point the HTTP façade and the CLI talk
//! to. It is an explicitly constructed, passed-by-reference object (no
//! process-wide globals): missing credentials produce a service without a
//! backend, reported through [`AuditService::is_configured`] rather than a
//! startup failure.
//!
//! A backend failure is never surfaced to the caller; the fallback analyzer
//! produces the report instead. The only errors `analyze` returns are
//! client-visible ones: empty code and an unconfigured auditor.

use crate::ai::backend::LLMBackend;
use crate::audit::fallback::fallback_report;
use crate::audit::platforms::platform_patterns;
use crate::audit::prompt::{PromptBuilder, SYSTEM_PROMPT};
use crate::audit::report::build_report;
use crate::audit::types::AuditResult;
use crate::config::AuditConfig;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced to the caller of [`AuditService::analyze`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// No LLM credential was available when the service was built.
    #[error("code auditor is not available: check your API key configuration")]
    NotConfigured,

    /// The request carried no code to audit.
    #[error("code is required")]
    EmptyCode,
}

/// One audit request: the code plus the metadata that shapes the prompt.
#[derive(Debug, Clone)]
pub struct AuditRequest {
    pub code: String,
    pub platform: String,
    pub language: String,
    pub original_prompt: Option<String>,
}

impl AuditRequest {
    pub fn new(code: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            platform: platform.into(),
            language: "python".to_string(),
            original_prompt: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_original_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.original_prompt = Some(prompt.into());
        self
    }
}

/// Stateless audit service wrapping a single optional LLM backend.
pub struct AuditService {
    backend: Option<Arc<dyn LLMBackend>>,
}

impl AuditService {
    pub fn new(backend: Option<Arc<dyn LLMBackend>>) -> Self {
        Self { backend }
    }

    /// Builds the service from configuration. A missing API key yields an
    /// unconfigured service, not an error.
    pub fn from_config(config: &AuditConfig) -> Self {
        let backend = config
            .create_backend()
            .map(|client| client as Arc<dyn LLMBackend>);
        if backend.is_none() {
            warn!("no LLM credential configured, auditor will be unavailable");
        }
        Self::new(backend)
    }

    /// Whether an LLM backend is available. Used by the health endpoint.
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend(&self) -> Option<&Arc<dyn LLMBackend>> {
        self.backend.as_ref()
    }

    /// Audits one code snippet.
    ///
    /// Backend failures are recovered locally via the fallback analyzer, so a
    /// configured service with non-empty code always yields a report.
    pub async fn analyze(&self, request: AuditRequest) -> Result<AuditResult, ServiceError> {
        if request.code.trim().is_empty() {
            return Err(ServiceError::EmptyCode);
        }

        let backend = self.backend.as_ref().ok_or(ServiceError::NotConfigured)?;

        let hints = platform_patterns(&request.platform);
        let prompt = PromptBuilder::build_audit_prompt(
            &request.code,
            hints,
            request.original_prompt.as_deref(),
            &request.language,
        );

        debug!(
            platform = %request.platform,
            prompt_len = prompt.len(),
            hint_count = hints.len(),
            "sending audit request to {}",
            backend.name()
        );

        let start = Instant::now();
        let result = match backend.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(analysis) => {
                build_report(&analysis, &request.code, request.original_prompt.as_deref())
            }
            Err(e) => fallback_report(&request.code, &e.to_string()),
        };

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            efficiency = result.efficiency_score,
            complexity = result.complexity_score,
            bugs = result.bug_count,
            "audit completed"
        );

        Ok(result)
    }
}

impl std::fmt::Debug for AuditService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuditService")
            .field("configured", &self.is_configured())
            .finish()
    }
}
