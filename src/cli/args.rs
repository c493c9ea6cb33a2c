use crate::constants::verbosity;
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fmt::Display;
use std::path::PathBuf;

/// How collected answers are printed.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq, Default)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// A JSON object keyed by question id.
    #[default]
    Json,
    /// A YAML mapping keyed by question id.
    Yaml,
    /// One `id: answer` line per question.
    Text,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Text => "text",
        };
        write!(f, "{s}")
    }
}

/// Parley - Interactive terminal prompts and surveys.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a survey definition file and print the answers.
    Run(RunArgs),

    /// Ask a single question and print the answer.
    Ask(AskArgs),
}

/// Arguments for the run command.
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Survey file, or a directory containing one.
    #[arg(value_name = "SURVEY")]
    pub survey: PathBuf,

    /// Output format for the collected answers.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Disable going back to the previous question.
    #[arg(long = "no-undo")]
    pub no_undo: bool,

    /// Show a summary and ask for confirmation at the end.
    #[arg(long = "end-card")]
    pub end_card: bool,

    /// Take every default instead of prompting.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,
}

/// Arguments for the ask command.
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// Question to display.
    #[arg(value_name = "LABEL")]
    pub label: String,

    /// Default answer.
    #[arg(short, long)]
    pub default: Option<String>,

    /// Selectable option as `LABEL` or `LABEL=VALUE` (repeatable).
    #[arg(short, long = "option", value_name = "LABEL[=VALUE]")]
    pub options: Vec<String>,

    /// Allow picking several options.
    #[arg(short, long, requires = "options")]
    pub multi: bool,

    /// Ask a yes/no question.
    #[arg(short, long, conflicts_with = "options")]
    pub confirm: bool,

    /// Label of the row that submits a multi-select.
    #[arg(long = "continue-text", value_name = "TEXT")]
    pub continue_text: Option<String>,

    /// Take the default instead of prompting.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn parses_run_with_defaults() {
        let cli = Cli::parse_from(["parley", "run", "survey.yaml"]);
        assert_eq!(cli.verbose, 0);
        let Commands::Run(args) = cli.command else { panic!("expected run") };
        assert_eq!(args.survey, PathBuf::from("survey.yaml"));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(!args.no_undo && !args.end_card && !args.non_interactive);
    }

    #[test]
    fn parses_run_feature_flags() {
        let cli = Cli::parse_from([
            "parley",
            "run",
            "surveys/",
            "--format",
            "yaml",
            "--no-undo",
            "--end-card",
            "--non-interactive",
            "-vv",
        ]);
        assert_eq!(cli.verbose, 2);
        let Commands::Run(args) = cli.command else { panic!("expected run") };
        assert_eq!(args.format, OutputFormat::Yaml);
        assert!(args.no_undo && args.end_card && args.non_interactive);
    }

    #[test]
    fn parses_ask_options() {
        let cli = Cli::parse_from([
            "parley", "ask", "Pick", "-o", "Rust", "--option", "Go=go", "--multi", "-d", "Rust",
        ]);
        let Commands::Ask(args) = cli.command else { panic!("expected ask") };
        assert_eq!(args.label, "Pick");
        assert_eq!(args.options, vec!["Rust", "Go=go"]);
        assert!(args.multi);
        assert_eq!(args.default.as_deref(), Some("Rust"));
    }

    #[test]
    fn rejects_confirm_with_options() {
        let result = Cli::try_parse_from(["parley", "ask", "Ok?", "--confirm", "-o", "a"]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_multi_without_options() {
        let result = Cli::try_parse_from(["parley", "ask", "Pick", "--multi"]);
        assert!(result.is_err());
    }

    #[test]
    fn display_output_formats() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
        assert_eq!(OutputFormat::Text.to_string(), "text");
    }
}
