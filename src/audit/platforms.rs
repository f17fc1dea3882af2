//! Known issue patterns for AI coding platforms
//!
//! Each supported platform maps to a fixed list of hint phrases that get
//! appended to the audit prompt so the LLM checks for the platform's usual
//! failure modes. The table is hard-coded; there is no dynamic registration.

static REPLIT_PATTERNS: [&str; 3] = [
    "unnecessary package installations",
    "overly complex file structure",
    "missing error handling for replit environment",
];

static LOVABLE_PATTERNS: [&str; 3] = [
    "redundant react components",
    "inline styles instead of css",
    "missing prop validation",
];

static CURSOR_PATTERNS: [&str; 3] = [
    "excessive commenting",
    "over-engineered solutions",
    "unnecessary abstractions",
];

/// Returns the known issue phrases for a platform identifier.
///
/// Lookup is case-insensitive. Unrecognized or empty identifiers return an
/// empty slice, never an error.
pub fn platform_patterns(platform: &str) -> &'static [&'static str] {
    match platform.trim().to_lowercase().as_str() {
        "replit" => &REPLIT_PATTERNS,
        "lovable" => &LOVABLE_PATTERNS,
        "cursor" => &CURSOR_PATTERNS,
        _ => &[],
    }
}
