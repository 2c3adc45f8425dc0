//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How chunk reports are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One block per chunk with every rubric's decision
    Summary,
    /// The consolidated narrative stored with each report
    Narrative,
    /// One JSON object per chunk report
    Json,
}

/// CLI arguments for review-panel
#[derive(Parser, Debug)]
#[command(name = "review-panel")]
#[command(author, version, about = "Rubric review panel - Independent reviewers audit text chunks")]
#[command(long_about = r#"
Review Panel runs every pending text chunk past a panel of rubric reviewers.

Each reviewer works independently:
1. Generate: ask the generation service for a verdict against its rubric
2. Self-evaluate: ask the evaluator how confident it is in that verdict
3. Route: accept, retry, or escalate to human review

A chunk is Complete only when every reviewer accepted a consistent verdict.
Reports are appended to the results file and the chunk is marked processed,
so a rerun resumes with the remaining chunks.

Configuration files are loaded from (in priority order):
1. REVIEW_PANEL_* environment variables (e.g. REVIEW_PANEL_GENERATOR__MODEL)
2. --config <path>                          Explicit config file
3. ./review-panel.toml                      Project-level config
4. ~/.config/review-panel/config.toml       Global config

Example:
  review-panel --chunks book.jsonl --results review.jsonl
  review-panel --next -o narrative
"#)]
pub struct Cli {
    /// JSONL chunk file (overrides [storage].chunks)
    #[arg(long, value_name = "PATH")]
    pub chunks: Option<PathBuf>,

    /// JSONL results file (overrides [storage].results)
    #[arg(long, value_name = "PATH")]
    pub results: Option<PathBuf>,

    /// Process only the next pending chunk
    #[arg(long)]
    pub next: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators and per-chunk output
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["review-panel"]);
        assert!(!cli.next);
        assert_eq!(cli.output, OutputFormat::Summary);
        assert_eq!(cli.verbose, 0);
        assert!(cli.chunks.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "review-panel",
            "--chunks",
            "in.jsonl",
            "--next",
            "-o",
            "json",
            "-vv",
            "--log-file",
            "run.log",
        ]);
        assert_eq!(cli.chunks, Some(PathBuf::from("in.jsonl")));
        assert!(cli.next);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
    }
}
