use serde::{Deserialize, Serialize};
use std::fmt;

/// Cost and structure metrics attached to every audit report.
///
/// All values are deterministic given the audited code and the optional
/// original prompt. `api_error` is only present on reports produced by the
/// fallback path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostAnalysis {
    /// Number of newline-delimited segments in the code (non-blank lines on
    /// the fallback path).
    pub lines_of_code: usize,

    /// "low", "medium", or "unknown" on the fallback path.
    pub estimated_runtime: String,

    /// "good", "needs_improvement", or "requires_analysis" on the fallback path.
    pub maintainability: String,

    /// Prompt word count plus twice the code line count.
    pub estimated_tokens: usize,

    /// `estimated_tokens` at a flat per-token rate, rounded to 4 decimals.
    pub estimated_cost: f64,

    /// Prompt word count divided by code line count, rounded to 2 decimals.
    pub efficiency_ratio: f64,

    /// `estimated_cost` divided by the code line count, rounded to 4 decimals.
    pub cost_per_line: f64,

    /// Deepest block nesting found by the indentation scan.
    pub max_nesting_depth: usize,

    /// The literal error reason, present only when analysis fell back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_error: Option<String>,
}

/// The audit report returned for a single (code, platform) request.
///
/// Immutable value object; nothing persists beyond the request that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditResult {
    /// Efficiency score, clamped to 1-100.
    pub efficiency_score: u32,

    /// Complexity score, clamped to 1-10.
    pub complexity_score: u32,

    /// Estimated bug count, capped at 10.
    pub bug_count: u32,

    /// At most 5 suggestions, in the order they appeared in the analysis.
    pub optimization_suggestions: Vec<String>,

    pub cost_analysis: CostAnalysis,

    /// At most 3 flags, in the order they appeared in the analysis.
    pub red_flags: Vec<String>,

    /// Non-empty free-text summary.
    pub summary: String,
}

impl fmt::Display for AuditResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "efficiency: {}/100, complexity: {}/10, bugs: {}",
            self.efficiency_score, self.complexity_score, self.bug_count
        )
    }
}
