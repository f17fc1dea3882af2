use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// AI-powered code audit service
#[derive(Parser, Debug)]
#[command(
    name = "codeaudit",
    about = "Audit AI-generated code for quality, bugs, and cost",
    version,
    long_about = "codeaudit sends a code snippet to an LLM for review and distills the \
                  reply into a structured report: efficiency and complexity scores, a \
                  bug estimate, optimization suggestions, cost metrics, and red flags. \
                  Run it as a one-shot CLI or as an HTTP service."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose output (debug logging)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Audit a code file",
        long_about = "Audits a single code file and prints the report.\n\n\
                      Examples:\n  \
                      codeaudit analyze main.py\n  \
                      codeaudit analyze --platform cursor --format json main.py\n  \
                      cat main.py | codeaudit analyze -"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Run the HTTP audit service",
        long_about = "Starts the JSON API (POST /analyze, GET /health).\n\n\
                      Examples:\n  \
                      codeaudit serve\n  \
                      codeaudit serve --port 8080"
    )]
    Serve(ServeArgs),

    #[command(about = "Check LLM backend availability")]
    Health,
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[arg(value_name = "FILE", help = "Code file to audit ('-' reads stdin)")]
    pub file: PathBuf,

    #[arg(
        short = 'p',
        long,
        default_value = "unknown",
        help = "AI platform that produced the code (replit, lovable, cursor)"
    )]
    pub platform: String,

    #[arg(short = 'l', long, default_value = "python", help = "Language of the code")]
    pub language: String,

    #[arg(
        long,
        value_name = "TEXT",
        help = "Original prompt the code was generated from"
    )]
    pub prompt: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[arg(
        short = 'p',
        long,
        value_name = "PORT",
        help = "Listen port (default: CODEAUDIT_PORT or 5000)"
    )]
    pub port: Option<u16>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Human,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_default_analyze_args() {
        let args = CliArgs::parse_from(["codeaudit", "analyze", "main.py"]);
        match args.command {
            Commands::Analyze(analyze) => {
                assert_eq!(analyze.file, PathBuf::from("main.py"));
                assert_eq!(analyze.platform, "unknown");
                assert_eq!(analyze.language, "python");
                assert!(analyze.prompt.is_none());
                assert_eq!(analyze.format, OutputFormatArg::Human);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_with_options() {
        let args = CliArgs::parse_from([
            "codeaudit",
            "analyze",
            "--platform",
            "cursor",
            "--language",
            "rust",
            "--prompt",
            "write a counter",
            "--format",
            "json",
            "lib.rs",
        ]);
        match args.command {
            Commands::Analyze(analyze) => {
                assert_eq!(analyze.platform, "cursor");
                assert_eq!(analyze.language, "rust");
                assert_eq!(analyze.prompt.as_deref(), Some("write a counter"));
                assert_eq!(analyze.format, OutputFormatArg::Json);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_serve_with_port() {
        let args = CliArgs::parse_from(["codeaudit", "serve", "--port", "8080"]);
        match args.command {
            Commands::Serve(serve) => assert_eq!(serve.port, Some(8080)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_health_command() {
        let args = CliArgs::parse_from(["codeaudit", "health"]);
        assert!(matches!(args.command, Commands::Health));
    }

    #[test]
    fn test_global_flags() {
        let args = CliArgs::parse_from(["codeaudit", "-q", "health"]);
        assert!(args.quiet);
        assert!(!args.verbose);

        let args = CliArgs::parse_from(["codeaudit", "--log-level", "debug", "health"]);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }
}
