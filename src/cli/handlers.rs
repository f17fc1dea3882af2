//! Command handlers
//!
//! Each handler runs one subcommand to completion and returns a process exit
//! code. Errors are printed to stderr; reports go to stdout.

use crate::audit::service::{AuditRequest, AuditService};
use crate::audit::types::AuditResult;
use crate::cli::commands::{AnalyzeArgs, OutputFormatArg, ServeArgs};
use crate::config::AuditConfig;
use crate::server;
use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::error;

pub async fn handle_analyze(args: &AnalyzeArgs) -> i32 {
    match run_analyze(args).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            error!("analyze failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn run_analyze(args: &AnalyzeArgs) -> Result<String> {
    let code = read_code(&args.file)?;

    let config = AuditConfig::default();
    config.validate().context("invalid configuration")?;

    let service = AuditService::from_config(&config);

    let mut request = AuditRequest::new(code, args.platform.clone()).with_language(&args.language);
    if let Some(prompt) = &args.prompt {
        request = request.with_original_prompt(prompt);
    }

    let result = service.analyze(request).await?;

    Ok(match args.format {
        OutputFormatArg::Json => serde_json::to_string_pretty(&result)?,
        OutputFormatArg::Human => render_human(&result),
    })
}

pub async fn handle_serve(args: &ServeArgs) -> i32 {
    let config = AuditConfig::default();
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return 1;
    }

    let port = args.port.unwrap_or(config.port);
    let service = Arc::new(AuditService::from_config(&config));

    match server::serve(service, port).await {
        Ok(()) => 0,
        Err(e) => {
            error!("server failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub async fn handle_health() -> i32 {
    let config = AuditConfig::default();
    let service = AuditService::from_config(&config);

    let Some(backend) = service.backend() else {
        eprintln!("auditor unavailable: no API key configured");
        return 1;
    };

    match backend.health_check().await {
        Ok(true) => {
            println!(
                "{} backend available{}",
                backend.name(),
                backend
                    .model_info()
                    .map(|info| format!(" ({})", info))
                    .unwrap_or_default()
            );
            0
        }
        Ok(false) => {
            eprintln!("{} backend not responding", backend.name());
            1
        }
        Err(e) => {
            eprintln!("health check failed: {}", e);
            1
        }
    }
}

fn read_code(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("failed to read code from stdin")?;
        Ok(code)
    } else {
        std::fs::read_to_string(file)
            .with_context(|| format!("failed to read {}", file.display()))
    }
}

fn render_human(result: &AuditResult) -> String {
    let mut out = String::new();

    out.push_str(&format!("Efficiency score:  {}/100\n", result.efficiency_score));
    out.push_str(&format!("Complexity score:  {}/10\n", result.complexity_score));
    out.push_str(&format!("Potential bugs:    {}\n", result.bug_count));
    out.push_str(&format!(
        "Cost estimate:     ${:.4} ({} tokens, {} lines)\n",
        result.cost_analysis.estimated_cost,
        result.cost_analysis.estimated_tokens,
        result.cost_analysis.lines_of_code
    ));

    if !result.optimization_suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for suggestion in &result.optimization_suggestions {
            out.push_str(&format!("  - {}\n", suggestion));
        }
    }

    if !result.red_flags.is_empty() {
        out.push_str("\nRed flags:\n");
        for flag in &result.red_flags {
            out.push_str(&format!("  ! {}\n", flag));
        }
    }

    out.push_str(&format!("\nSummary: {}", result.summary));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::types::CostAnalysis;

    #[test]
    fn test_render_human() {
        let result = AuditResult {
            efficiency_score: 85,
            complexity_score: 2,
            bug_count: 1,
            optimization_suggestions: vec!["Consider caching".to_string()],
            cost_analysis: CostAnalysis {
                lines_of_code: 4,
                estimated_runtime: "low".to_string(),
                maintainability: "good".to_string(),
                estimated_tokens: 8,
                estimated_cost: 0.016,
                efficiency_ratio: 0.0,
                cost_per_line: 0.004,
                max_nesting_depth: 1,
                api_error: None,
            },
            red_flags: vec!["uses eval on user input".to_string()],
            summary: "Small and readable.".to_string(),
        };

        let rendered = render_human(&result);
        assert!(rendered.contains("85/100"));
        assert!(rendered.contains("2/10"));
        assert!(rendered.contains("- Consider caching"));
        assert!(rendered.contains("! uses eval on user input"));
        assert!(rendered.contains("Summary: Small and readable."));
    }

    #[test]
    fn test_read_code_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snippet.py");
        std::fs::write(&path, "x = 1\n").unwrap();
        assert_eq!(read_code(&path).unwrap(), "x = 1\n");
    }

    #[test]
    fn test_read_code_missing_file() {
        let err = read_code(Path::new("/nonexistent/snippet.py")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/snippet.py"));
    }
}
