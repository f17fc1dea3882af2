//! Audit prompt construction
//!
//! Builds the single chat exchange sent to the LLM: a fixed system
//! instruction plus a user prompt assembled from the code, the language tag,
//! platform hint phrases, and the optional original prompt. Hints and code
//! are interpolated verbatim; the LLM boundary is trusted content, not
//! executed code.

/// System instruction accompanying every audit request.
pub const SYSTEM_PROMPT: &str = "You are an expert code auditor and security analyst.";

pub struct PromptBuilder;

impl PromptBuilder {
    /// Builds the user prompt for an audit request.
    ///
    /// The prompt asks the LLM to evaluate the fixed dimensions the report
    /// covers: efficiency (1-100), complexity (1-10), bugs, optimization
    /// suggestions, cost, security red flags, and a summary. Platform hints
    /// are appended verbatim when non-empty. When an original prompt is
    /// supplied, the LLM is additionally asked whether the code satisfies
    /// that request and whether the solution is overengineered for it.
    pub fn build_audit_prompt(
        code: &str,
        platform_hints: &[&str],
        original_prompt: Option<&str>,
        language: &str,
    ) -> String {
        let mut prompt = format!(
            "Please audit this {language} code and provide a detailed analysis:\n\
             \n\
             CODE:\n\
             {code}\n\
             \n\
             Please analyze for:\n\
             1. Code efficiency (score 1-100)\n\
             2. Complexity score (1-10, where 10 is most complex)\n\
             3. Potential bugs or issues\n\
             4. Optimization suggestions\n\
             5. Cost analysis (performance, maintainability)\n\
             6. Security red flags\n\
             7. Overall summary\n"
        );

        if !platform_hints.is_empty() {
            prompt.push_str(&format!(
                "\nAlso check for these platform-specific issues: {}\n",
                platform_hints.join(", ")
            ));
        }

        if let Some(original) = original_prompt {
            prompt.push_str(&format!(
                "\nORIGINAL PROMPT:\n\
                 {original}\n\
                 \n\
                 Also assess whether the code actually satisfies this original \
                 request, and whether the solution is unnecessarily complex \
                 (overengineered) for it.\n"
            ));
        }

        prompt.push_str("\nFormat your response as structured analysis covering all these points.");
        prompt
    }
}
