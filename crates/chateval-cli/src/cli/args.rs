use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "chateval",
    version,
    about = "Evaluate a chatbot endpoint against ideal answers with an LLM judge"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, value_enum, default_value_t, env = "CHATEVAL_LOG_FORMAT")]
    pub log_format: LogFormat,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a registered eval and print the aggregate metrics as JSON
    Run(RunArgs),
    /// List registered evals and completion fns
    List(ListArgs),
    Version,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct RegistryArgs {
    /// Registry YAML merged over the built-in registry
    #[arg(long, env = "CHATEVAL_REGISTRY")]
    pub registry: Option<PathBuf>,
}

#[derive(Parser, Clone, Debug, Default)]
pub struct RunArgs {
    /// Registered eval name [env: CHATEVAL_EVAL]
    #[arg(long)]
    pub eval: Option<String>,

    #[command(flatten)]
    pub registry: RegistryArgs,

    /// Dataset JSONL, overriding the eval's samples_jsonl
    #[arg(long)]
    pub samples: Option<PathBuf>,

    /// Chatbot endpoint URL [env: CHATEVAL_ENDPOINT]
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Chatbot request timeout in seconds [env: CHATEVAL_COMPLETION_TIMEOUT]
    #[arg(long)]
    pub completion_timeout: Option<u64>,

    /// Directory for results.jsonl [env: CHATEVAL_OUTPUT_DIR]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub judge: JudgeArgs,
}

#[derive(clap::Args, Clone, Debug, Default)]
pub struct JudgeArgs {
    /// Judge provider
    /// - openai: live judge calls (needs OPENAI_API_KEY)
    /// - none: exact-match scoring only
    ///
    /// [env: CHATEVAL_JUDGE]
    #[arg(long)]
    pub judge: Option<String>,

    /// Alias for --judge none
    #[arg(long, conflicts_with = "judge")]
    pub no_judge: bool,

    /// Judge model identifier [env: CHATEVAL_JUDGE_MODEL]
    #[arg(long)]
    pub judge_model: Option<String>,

    /// Judge request timeout in seconds [env: CHATEVAL_JUDGE_TIMEOUT]
    #[arg(long)]
    pub judge_timeout: Option<u64>,

    /// Judge API key (OPENAI_API_KEY is primary)
    #[arg(long, hide = true)]
    pub judge_api_key: Option<String>,
}

#[derive(Parser, Clone, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "chateval",
            "run",
            "--eval",
            "arithmetic",
            "--endpoint",
            "http://localhost:8000/ask",
            "--no-judge",
            "--output-dir",
            "out",
        ])
        .unwrap();
        match cli.cmd {
            Command::Run(args) => {
                assert_eq!(args.eval.as_deref(), Some("arithmetic"));
                assert_eq!(args.endpoint.as_deref(), Some("http://localhost:8000/ask"));
                assert!(args.judge.no_judge);
                assert_eq!(args.output_dir, Some(PathBuf::from("out")));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn judge_and_no_judge_conflict() {
        let res = Cli::try_parse_from(["chateval", "run", "--judge", "openai", "--no-judge"]);
        assert!(res.is_err());
    }
}
