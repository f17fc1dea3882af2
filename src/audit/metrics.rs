//! Structural code metrics and the token/cost estimator
//!
//! A single forward pass over the audited code computes line counts, an
//! approximate nesting depth, and flat-rate token/cost estimates. These feed
//! the cost section of every report, including fallback reports, and are
//! deterministic given the same (code, prompt) inputs.

/// Flat per-token rate used for the cost estimate.
const COST_PER_TOKEN: f64 = 0.002;

/// Line patterns that open a block for the nesting scan.
const BLOCK_KEYWORDS: [&str; 5] = ["if ", "for ", "while ", "def ", "class "];

/// Metrics measured from the audited code and the optional original prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeMetrics {
    /// Newline-delimited segment count (an empty string counts as one).
    pub total_lines: usize,

    /// Lines with non-whitespace content.
    pub non_blank_lines: usize,

    /// Character count of the code.
    pub char_count: usize,

    /// Whitespace-delimited word count of the original prompt (0 if absent).
    pub prompt_words: usize,

    /// Deepest nesting level found by the indentation scan.
    pub max_nesting_depth: usize,

    /// `prompt_words + 2 * total_lines`.
    pub estimated_tokens: usize,

    /// `estimated_tokens * COST_PER_TOKEN`, rounded to 4 decimals.
    pub estimated_cost: f64,

    /// `prompt_words / total_lines`, rounded to 2 decimals.
    pub efficiency_ratio: f64,

    /// `estimated_cost / max(1, total_lines)`, rounded to 4 decimals.
    pub cost_per_line: f64,
}

impl CodeMetrics {
    /// Measures a code snippet in a single pass.
    pub fn measure(code: &str, original_prompt: Option<&str>) -> Self {
        let total_lines = code.split('\n').count();
        let non_blank_lines = code
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .count();
        let char_count = code.chars().count();
        let prompt_words = original_prompt
            .map(|p| p.split_whitespace().count())
            .unwrap_or(0);

        let max_nesting_depth = max_nesting_depth(code);

        let estimated_tokens = prompt_words + 2 * total_lines;
        let estimated_cost = round4(estimated_tokens as f64 * COST_PER_TOKEN);
        let efficiency_ratio = if total_lines > 0 {
            round2(prompt_words as f64 / total_lines as f64)
        } else {
            0.0
        };
        let cost_per_line = round4(estimated_cost / total_lines.max(1) as f64);

        Self {
            total_lines,
            non_blank_lines,
            char_count,
            prompt_words,
            max_nesting_depth,
            estimated_tokens,
            estimated_cost,
            efficiency_ratio,
            cost_per_line,
        }
    }
}

/// Approximates the deepest block nesting in the code.
///
/// This is a rough line-pattern proxy, not a parser: a line containing a
/// block-opening keyword increments the level, and a blank or under-indented
/// line (four-space unit) decrements it.
fn max_nesting_depth(code: &str) -> usize {
    let mut nesting: usize = 0;
    let mut max_nesting: usize = 0;

    for line in code.split('\n') {
        let stripped = line.trim();
        if BLOCK_KEYWORDS.iter().any(|kw| stripped.contains(kw)) {
            nesting += 1;
            max_nesting = max_nesting.max(nesting);
        }

        let expected_indent = nesting * 4;
        let leading_spaces = line.len() - line.trim_start_matches(' ').len();
        if stripped.is_empty() || leading_spaces < expected_indent {
            nesting = nesting.saturating_sub(1);
        }
    }

    max_nesting
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
