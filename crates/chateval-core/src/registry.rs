//! Evals and completion functions, selected by string key.
//!
//! A registry is plain data (YAML or [`Registry::builtin`]); turning a
//! completion-fn entry into an implementation is a match over its `kind`.
//!
//! ```yaml
//! evals:
//!   custom.chatbot_general_knowledge:
//!     completion_fn: chatbot
//!     samples_jsonl: chat_eval/data/general_knowledge.jsonl
//! completion_fns:
//!   chatbot:
//!     kind: chatbot
//!   dry-run:
//!     kind: fake
//!     answers:
//!       "What is 2+2?": "4"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{ChatbotConfig, DEFAULT_EVAL};
use crate::errors::{EvalError, EvalResult};
use crate::providers::completion::{ChatBotCompletionFn, CompletionFn, FakeCompletionFn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalSpec {
    /// Key into [`Registry::completion_fns`].
    pub completion_fn: String,
    /// Dataset path, relative to the working directory.
    pub samples_jsonl: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Completion fn entry. Unset chatbot fields come from the run's
/// [`ChatbotConfig`] (environment / CLI).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompletionFnSpec {
    Chatbot {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timeout_secs: Option<u64>,
    },
    Fake {
        #[serde(default)]
        answers: BTreeMap<String, String>,
    },
}

impl CompletionFnSpec {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Chatbot { .. } => "chatbot",
            Self::Fake { .. } => "fake",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub evals: BTreeMap<String, EvalSpec>,
    #[serde(default)]
    pub completion_fns: BTreeMap<String, CompletionFnSpec>,
}

impl Registry {
    /// The general-knowledge chatbot eval.
    pub fn builtin() -> Self {
        let mut evals = BTreeMap::new();
        evals.insert(
            DEFAULT_EVAL.to_string(),
            EvalSpec {
                completion_fn: "chatbot".to_string(),
                samples_jsonl: PathBuf::from("chat_eval/data/general_knowledge.jsonl"),
                description: Some("General knowledge questions against the course chatbot".into()),
            },
        );
        let mut completion_fns = BTreeMap::new();
        completion_fns.insert(
            "chatbot".to_string(),
            CompletionFnSpec::Chatbot {
                endpoint: None,
                timeout_secs: None,
            },
        );
        Self {
            evals,
            completion_fns,
        }
    }

    pub fn from_yaml_str(yaml: &str) -> EvalResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| EvalError::registry(format!("failed to parse registry: {}", e)))
    }

    pub fn load(path: &Path) -> EvalResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EvalError::registry(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&raw).map_err(|e| match e {
            EvalError::Registry { message } => {
                EvalError::registry(format!("{} ({})", message, path.display()))
            }
            other => other,
        })
    }

    /// Entries of `other` replace same-named entries of `self`.
    pub fn merge(mut self, other: Registry) -> Self {
        self.evals.extend(other.evals);
        self.completion_fns.extend(other.completion_fns);
        self
    }

    pub fn get_eval(&self, name: &str) -> EvalResult<&EvalSpec> {
        self.evals.get(name).ok_or_else(|| {
            EvalError::registry(format!(
                "unknown eval: {} (registered: {})",
                name,
                join_keys(self.evals.keys())
            ))
        })
    }

    pub fn get_completion_fn(&self, name: &str) -> EvalResult<&CompletionFnSpec> {
        self.completion_fns.get(name).ok_or_else(|| {
            EvalError::registry(format!(
                "unknown completion fn: {} (registered: {})",
                name,
                join_keys(self.completion_fns.keys())
            ))
        })
    }

    pub fn build_completion_fn(
        &self,
        name: &str,
        base: &ChatbotConfig,
    ) -> EvalResult<Arc<dyn CompletionFn>> {
        match self.get_completion_fn(name)? {
            CompletionFnSpec::Chatbot {
                endpoint,
                timeout_secs,
            } => {
                let cfg = resolve_chatbot_config(endpoint.as_deref(), *timeout_secs, base);
                Ok(Arc::new(ChatBotCompletionFn::new(&cfg)?))
            }
            CompletionFnSpec::Fake { answers } => {
                Ok(Arc::new(FakeCompletionFn::new(answers.clone())))
            }
        }
    }
}

/// Fields set in a registry entry win over `base`; a differing `base` value
/// is logged.
fn resolve_chatbot_config(
    endpoint: Option<&str>,
    timeout_secs: Option<u64>,
    base: &ChatbotConfig,
) -> ChatbotConfig {
    let mut cfg = base.clone();
    if let Some(endpoint) = endpoint {
        if endpoint != base.endpoint {
            warn!(
                registry = endpoint,
                ignored = %base.endpoint,
                "registry entry overrides chatbot endpoint"
            );
        }
        cfg.endpoint = endpoint.to_string();
    }
    if let Some(secs) = timeout_secs {
        if secs != base.timeout_secs {
            warn!(
                registry = secs,
                ignored = base.timeout_secs,
                "registry entry overrides chatbot timeout"
            );
        }
        cfg.timeout_secs = secs;
    }
    cfg
}

fn join_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    let keys: Vec<&str> = keys.map(String::as_str).collect();
    if keys.is_empty() {
        "none".to_string()
    } else {
        keys.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
evals:
  arithmetic:
    completion_fn: dry-run
    samples_jsonl: data/arithmetic.jsonl
completion_fns:
  dry-run:
    kind: fake
    answers:
      "What is 2+2?": "4"
  staging-bot:
    kind: chatbot
    endpoint: http://staging.local/ask
"#;

    #[test]
    fn builtin_has_default_eval() {
        let reg = Registry::builtin();
        let spec = reg.get_eval(DEFAULT_EVAL).unwrap();
        assert_eq!(spec.completion_fn, "chatbot");
        assert_eq!(reg.get_completion_fn("chatbot").unwrap().kind(), "chatbot");
    }

    #[test]
    fn parses_yaml_registry() {
        let reg = Registry::from_yaml_str(YAML).unwrap();
        assert_eq!(
            reg.get_eval("arithmetic").unwrap().samples_jsonl,
            PathBuf::from("data/arithmetic.jsonl")
        );
        match reg.get_completion_fn("staging-bot").unwrap() {
            CompletionFnSpec::Chatbot {
                endpoint,
                timeout_secs,
            } => {
                assert_eq!(endpoint.as_deref(), Some("http://staging.local/ask"));
                assert_eq!(*timeout_secs, None);
            }
            other => panic!("unexpected spec: {other:?}"),
        }
    }

    #[test]
    fn unknown_keys_list_registered_names() {
        let reg = Registry::builtin();
        let err = reg.get_eval("custom.nope").unwrap_err().to_string();
        assert!(err.contains("unknown eval: custom.nope"));
        assert!(err.contains(DEFAULT_EVAL));
        let err = reg.get_completion_fn("gpt").unwrap_err().to_string();
        assert!(err.contains("registered: chatbot"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Registry::from_yaml_str("completion_fns:\n  x:\n    kind: telepathy\n")
            .unwrap_err();
        assert!(matches!(err, EvalError::Registry { .. }));
    }

    #[test]
    fn merge_overrides_builtin_entries() {
        let reg = Registry::builtin().merge(Registry::from_yaml_str(YAML).unwrap());
        assert!(reg.get_eval(DEFAULT_EVAL).is_ok());
        assert!(reg.get_eval("arithmetic").is_ok());
        assert_eq!(reg.completion_fns.len(), 3);
    }

    #[tokio::test]
    async fn builds_fake_completion_fn() {
        let reg = Registry::from_yaml_str(YAML).unwrap();
        let f = reg
            .build_completion_fn("dry-run", &ChatbotConfig::default())
            .unwrap();
        assert_eq!(f.name(), "fake");
        assert_eq!(f.complete("What is 2+2?").await.completion, "4");
    }

    #[test]
    fn chatbot_spec_falls_back_to_base_config() {
        let base = ChatbotConfig {
            endpoint: "http://bot.local/ask".into(),
            timeout_secs: 7,
        };
        assert_eq!(resolve_chatbot_config(None, None, &base), base);

        let f = Registry::builtin()
            .build_completion_fn("chatbot", &base)
            .unwrap();
        assert_eq!(f.name(), "chatbot");
    }

    #[test]
    fn registry_chatbot_fields_win_over_base() {
        let base = ChatbotConfig {
            endpoint: "http://bot.local/ask".into(),
            timeout_secs: 7,
        };
        let reg = Registry::from_yaml_str(YAML).unwrap();
        let CompletionFnSpec::Chatbot {
            endpoint,
            timeout_secs,
        } = reg.get_completion_fn("staging-bot").unwrap()
        else {
            panic!("staging-bot must be a chatbot entry");
        };

        let cfg = resolve_chatbot_config(endpoint.as_deref(), *timeout_secs, &base);
        assert_eq!(cfg.endpoint, "http://staging.local/ask");
        assert_eq!(cfg.timeout_secs, 7, "unset timeout comes from base");

        let cfg = resolve_chatbot_config(None, Some(30), &base);
        assert_eq!(cfg.endpoint, "http://bot.local/ask");
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn registry_zero_timeout_is_rejected() {
        let reg = Registry::from_yaml_str(
            "completion_fns:\n  bot:\n    kind: chatbot\n    timeout_secs: 0\n",
        )
        .unwrap();
        let err = reg
            .build_completion_fn("bot", &ChatbotConfig::default())
            .err()
            .expect("zero timeout must fail");
        assert_eq!(err.exit_code(), 1);
    }
}
