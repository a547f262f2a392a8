//! Run configuration.
//!
//! Built once at process start (environment first, CLI flags on top) and
//! passed by reference to whatever needs it.
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `CHATEVAL_EVAL` | Registered eval to run (default: `custom.chatbot_general_knowledge`) |
//! | `CHATEVAL_ENDPOINT` | Chatbot URL (default: `http://127.0.0.1:8000/get-course-info`) |
//! | `CHATEVAL_COMPLETION_TIMEOUT` | Chatbot timeout in seconds (default: 15) |
//! | `CHATEVAL_JUDGE` | Judge provider: `openai` or `none` (default: `openai`) |
//! | `CHATEVAL_JUDGE_MODEL` | Judge model (default: `gpt-4o`) |
//! | `CHATEVAL_JUDGE_TIMEOUT` | Judge timeout in seconds (default: 60) |
//! | `OPENAI_API_KEY` | Judge credential |
//! | `OPENAI_BASE_URL` | Judge API base URL (default: `https://api.openai.com/v1`) |
//! | `CHATEVAL_OUTPUT_DIR` | Results directory (default: `eval_results`) |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, EvalResult};

pub const DEFAULT_EVAL: &str = "custom.chatbot_general_knowledge";

fn default_eval_name() -> String {
    DEFAULT_EVAL.to_string()
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8000/get-course-info".to_string()
}

fn default_completion_timeout() -> u64 {
    15
}

fn default_judge_model() -> String {
    "gpt-4o".to_string()
}

fn default_judge_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

// Judge calls must never be unbounded.
fn default_judge_timeout() -> u64 {
    60
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("eval_results")
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatbotConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[serde(default = "default_completion_timeout")]
    pub timeout_secs: u64,
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_completion_timeout(),
        }
    }
}

impl ChatbotConfig {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("CHATEVAL_ENDPOINT").unwrap_or_else(|_| default_endpoint()),
            timeout_secs: env_u64("CHATEVAL_COMPLETION_TIMEOUT")
                .unwrap_or_else(default_completion_timeout),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A zero timeout makes every request fail immediately.
    pub fn validate(&self) -> EvalResult<()> {
        if self.timeout_secs == 0 {
            return Err(EvalError::config(
                "chatbot timeout must be at least 1 second",
            ));
        }
        Ok(())
    }
}

/// Which judge backs the semantic comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JudgeProvider {
    /// Live judge calls via an OpenAI-compatible chat completions API.
    #[default]
    OpenAi,
    /// No judge; every sample is scored by exact match.
    None,
}

impl FromStr for JudgeProvider {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "none" | "off" => Ok(Self::None),
            other => Err(EvalError::config(format!(
                "unknown judge provider: {} (expected openai|none)",
                other
            ))),
        }
    }
}

impl JudgeProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JudgeConfig {
    #[serde(default)]
    pub provider: JudgeProvider,

    #[serde(default = "default_judge_model")]
    pub model: String,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    #[serde(default = "default_judge_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_judge_timeout")]
    pub timeout_secs: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            provider: JudgeProvider::default(),
            model: default_judge_model(),
            api_key: None,
            base_url: default_judge_base_url(),
            timeout_secs: default_judge_timeout(),
        }
    }
}

impl JudgeConfig {
    /// Reads `CHATEVAL_JUDGE*` and `OPENAI_*`. An unparsable provider falls
    /// back to the default; the CLI validates explicit flags.
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("CHATEVAL_JUDGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            model: std::env::var("CHATEVAL_JUDGE_MODEL").unwrap_or_else(|_| default_judge_model()),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| default_judge_base_url()),
            timeout_secs: env_u64("CHATEVAL_JUDGE_TIMEOUT").unwrap_or_else(default_judge_timeout),
        }
    }

    pub fn disabled() -> Self {
        Self {
            provider: JudgeProvider::None,
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Only checked for a live provider; `none` never makes a request.
    pub fn validate(&self) -> EvalResult<()> {
        if self.provider != JudgeProvider::None && self.timeout_secs == 0 {
            return Err(EvalError::config("judge timeout must be at least 1 second"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvalConfig {
    #[serde(default = "default_eval_name")]
    pub eval_name: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Overrides the dataset path declared in the registry.
    #[serde(default)]
    pub samples_jsonl: Option<PathBuf>,

    #[serde(default)]
    pub chatbot: ChatbotConfig,

    #[serde(default)]
    pub judge: JudgeConfig,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            eval_name: default_eval_name(),
            output_dir: default_output_dir(),
            samples_jsonl: None,
            chatbot: ChatbotConfig::default(),
            judge: JudgeConfig::default(),
        }
    }
}

impl EvalConfig {
    pub fn from_env() -> Self {
        Self {
            eval_name: std::env::var("CHATEVAL_EVAL").unwrap_or_else(|_| default_eval_name()),
            output_dir: std::env::var("CHATEVAL_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_output_dir()),
            samples_jsonl: None,
            chatbot: ChatbotConfig::from_env(),
            judge: JudgeConfig::from_env(),
        }
    }

    pub fn validate(&self) -> EvalResult<()> {
        self.chatbot.validate()?;
        self.judge.validate()
    }
}
