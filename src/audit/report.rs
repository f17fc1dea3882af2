//! Audit report construction from raw analysis text
//!
//! The LLM reply is untrusted free text, so every extraction here is a
//! deterministic text scan with a documented default: `build_report` never
//! fails, whatever the reply looks like. The scan rules (keyword sets,
//! length thresholds, caps, defaults) are pinned legacy behavior and must not
//! be "improved".

use crate::audit::metrics::CodeMetrics;
use crate::audit::types::{AuditResult, CostAnalysis};
use regex::Regex;
use tracing::debug;

/// Efficiency score used when the analysis text never names one.
pub const DEFAULT_EFFICIENCY_SCORE: u32 = 75;

/// Complexity score used when the analysis text never names one.
pub const DEFAULT_COMPLEXITY_SCORE: u32 = 5;

/// Upper bound on the bug count, however noisy the text is.
const MAX_BUG_COUNT: u32 = 10;

const MAX_SUGGESTIONS: usize = 5;
const MAX_RED_FLAGS: usize = 3;

/// Lines shorter than this (trimmed) are ignored by the line extractors.
const MIN_LINE_CHARS: usize = 10;

const BUG_KEYWORDS: [&str; 5] = ["bug", "issue", "problem", "error", "vulnerability"];
const SUGGESTION_KEYWORDS: [&str; 5] = ["suggest", "recommend", "improve", "optimize", "consider"];
const RED_FLAG_KEYWORDS: [&str; 6] = [
    "security",
    "vulnerable",
    "risk",
    "dangerous",
    "warning",
    "critical",
];

const DEFAULT_SUGGESTIONS: [&str; 3] = [
    "Consider adding error handling",
    "Review variable naming conventions",
    "Add documentation and comments",
];

const DEFAULT_SUMMARY: &str = "Code analysis completed. Review detailed metrics for insights.";

/// Builds a structured report from the raw analysis text.
///
/// Pure text scan; every sub-step defaults rather than failing. The original
/// prompt only affects the deterministic cost metrics, never the extracted
/// scores.
pub fn build_report(analysis: &str, code: &str, original_prompt: Option<&str>) -> AuditResult {
    let lowered = analysis.to_lowercase();

    let efficiency_score = extract_score(&lowered, "efficiency", DEFAULT_EFFICIENCY_SCORE, 100);
    let complexity_score = extract_score(&lowered, "complexity", DEFAULT_COMPLEXITY_SCORE, 10);
    let bug_count = count_bug_keywords(&lowered);
    let optimization_suggestions = extract_suggestions(analysis);
    let red_flags = extract_red_flags(analysis);
    let summary = extract_summary(analysis);

    debug!(
        efficiency_score,
        complexity_score, bug_count, "extracted scores from analysis text"
    );

    let metrics = CodeMetrics::measure(code, original_prompt);
    let cost_analysis = CostAnalysis {
        lines_of_code: metrics.total_lines,
        estimated_runtime: if metrics.char_count > 1000 { "medium" } else { "low" }.to_string(),
        maintainability: if efficiency_score > 70 {
            "good"
        } else {
            "needs_improvement"
        }
        .to_string(),
        estimated_tokens: metrics.estimated_tokens,
        estimated_cost: metrics.estimated_cost,
        efficiency_ratio: metrics.efficiency_ratio,
        cost_per_line: metrics.cost_per_line,
        max_nesting_depth: metrics.max_nesting_depth,
        api_error: None,
    };

    AuditResult {
        efficiency_score,
        complexity_score,
        bug_count,
        optimization_suggestions,
        cost_analysis,
        red_flags,
        summary,
    }
}

/// Finds the first integer following the metric name on the same line of the
/// lowercased text and clamps it to [1, max]. Returns the default when the
/// metric is never mentioned with a number.
fn extract_score(lowered: &str, metric: &str, default: u32, max: u32) -> u32 {
    // `metric` is always one of our fixed metric names, so the pattern is
    // statically valid.
    let re = Regex::new(&format!(r"{}.*?(\d+)", metric)).unwrap();

    match re.captures(lowered).and_then(|caps| caps.get(1)) {
        Some(m) => {
            // Absurdly long digit runs overflow; clamp them to the maximum.
            let value = m.as_str().parse::<u64>().unwrap_or(u64::MAX);
            value.clamp(1, u64::from(max)) as u32
        }
        None => default,
    }
}

/// Total case-insensitive occurrences of the bug keywords, capped at 10.
fn count_bug_keywords(lowered: &str) -> u32 {
    let count: usize = BUG_KEYWORDS
        .iter()
        .map(|kw| lowered.matches(kw).count())
        .sum();
    (count as u32).min(MAX_BUG_COUNT)
}

/// Lines mentioning a suggestion keyword, first 5 in order. Falls back to
/// three fixed suggestions when none match.
fn extract_suggestions(analysis: &str) -> Vec<String> {
    let suggestions = matching_lines(analysis, &SUGGESTION_KEYWORDS, MAX_SUGGESTIONS);
    if suggestions.is_empty() {
        DEFAULT_SUGGESTIONS.iter().map(|s| s.to_string()).collect()
    } else {
        suggestions
    }
}

/// Lines mentioning a security/quality keyword, first 3 in order.
fn extract_red_flags(analysis: &str) -> Vec<String> {
    matching_lines(analysis, &RED_FLAG_KEYWORDS, MAX_RED_FLAGS)
}

fn matching_lines(analysis: &str, keywords: &[&str], limit: usize) -> Vec<String> {
    let mut matches = Vec::new();
    for line in analysis.lines() {
        let trimmed = line.trim();
        if trimmed.chars().count() <= MIN_LINE_CHARS {
            continue;
        }
        let lowered = trimmed.to_lowercase();
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            matches.push(trimmed.to_string());
            if matches.len() == limit {
                break;
            }
        }
    }
    matches
}

/// Extracts the summary section, or synthesizes one.
///
/// Joins up to three non-empty lines following the first line containing
/// "summary"; failing that, returns the first line longer than 50 characters;
/// failing that, a fixed sentence.
fn extract_summary(analysis: &str) -> String {
    let lines: Vec<&str> = analysis.lines().collect();

    for (i, line) in lines.iter().enumerate() {
        if line.to_lowercase().contains("summary") {
            let summary = lines
                .iter()
                .skip(i + 1)
                .take(3)
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if !summary.is_empty() {
                return summary;
            }
        }
    }

    for line in &lines {
        let trimmed = line.trim();
        if trimmed.chars().count() > 50 {
            return trimmed.to_string();
        }
    }

    DEFAULT_SUMMARY.to_string()
}
