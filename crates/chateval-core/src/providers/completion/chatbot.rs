use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use super::CompletionFn;
use crate::config::ChatbotConfig;
use crate::errors::EvalResult;
use crate::model::CompletionResult;

/// HTTP chatbot client: `POST {"query": prompt}` -> `{"response": answer}`.
#[derive(Debug, Clone)]
pub struct ChatBotCompletionFn {
    endpoint: String,
    client: reqwest::Client,
}

impl ChatBotCompletionFn {
    pub fn new(config: &ChatbotConfig) -> EvalResult<Self> {
        config.validate()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            client: crate::providers::http_client(config.timeout())?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch(&self, prompt: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({ "query": prompt }))
            .send()
            .await?
            .error_for_status()?;

        let body: serde_json::Value = response.json().await?;
        Ok(body
            .get("response")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

#[async_trait]
impl CompletionFn for ChatBotCompletionFn {
    async fn complete(&self, prompt: &str) -> CompletionResult {
        debug!(endpoint = %self.endpoint, "querying chatbot");
        match self.fetch(prompt).await {
            Ok(answer) => CompletionResult::ok(answer),
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "chatbot request failed");
                CompletionResult::from_error(e.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "chatbot"
    }
}
