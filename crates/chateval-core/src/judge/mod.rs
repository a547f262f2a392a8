//! LLM-as-judge scoring with an exact-match fallback.

mod parse;
mod prompt;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::{JudgeConfig, JudgeProvider};
use crate::errors::{EvalError, EvalResult};
use crate::model::JudgeVerdict;
use crate::providers::llm::openai::OpenAIClient;
use crate::providers::llm::LlmClient;

#[derive(Clone)]
pub struct JudgeService {
    client: Option<Arc<dyn LlmClient>>,
}

impl JudgeService {
    pub fn new(client: Option<Arc<dyn LlmClient>>) -> Self {
        Self { client }
    }

    /// Every sample is scored by exact match.
    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn from_config(cfg: &JudgeConfig) -> EvalResult<Self> {
        cfg.validate()?;
        match cfg.provider {
            JudgeProvider::None => Ok(Self::disabled()),
            JudgeProvider::OpenAi => {
                let client =
                    OpenAIClient::from_config(cfg).map_err(|e| EvalError::config(e.to_string()))?;
                Ok(Self::new(Some(Arc::new(client))))
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Scores `sampled` against `expected`. Never fails: any judge error
    /// degrades to [`JudgeVerdict::exact_match`].
    pub async fn judge(&self, sampled: &str, expected: &str) -> JudgeVerdict {
        let Some(client) = self.client.as_ref() else {
            debug!("judge disabled; using exact match");
            return JudgeVerdict::exact_match(sampled, expected);
        };

        match self.call_judge(client.as_ref(), sampled, expected).await {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(
                    provider = client.provider_name(),
                    error = %e,
                    "judge evaluation failed; falling back to exact match"
                );
                JudgeVerdict::exact_match(sampled, expected)
            }
        }
    }

    async fn call_judge(
        &self,
        client: &dyn LlmClient,
        sampled: &str,
        expected: &str,
    ) -> anyhow::Result<JudgeVerdict> {
        let prompt = prompt::build_prompt(sampled, expected);
        let resp = client.complete(&prompt).await?;
        parse::parse_verdict(&resp.text)
    }
}
