//! Code audit domain: prompt construction, report building, fallback analysis

pub mod fallback;
pub mod metrics;
pub mod platforms;
pub mod prompt;
pub mod report;
pub mod service;
pub mod types;

pub use fallback::fallback_report;
pub use metrics::CodeMetrics;
pub use platforms::platform_patterns;
pub use prompt::PromptBuilder;
pub use report::build_report;
pub use service::{AuditRequest, AuditService, ServiceError};
pub use types::{AuditResult, CostAnalysis};
