use super::LlmClient;
use crate::config::JudgeConfig;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

pub struct OpenAIClient {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
    /// Request `response_format: json_object`.
    pub json_output: bool,
    pub client: reqwest::Client,
}

impl OpenAIClient {
    pub fn new(model: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            model,
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            json_output: false,
            client: crate::providers::http_client(timeout)?,
        })
    }

    /// Judge client: JSON output, model/base URL/timeout from config.
    pub fn from_config(cfg: &JudgeConfig) -> anyhow::Result<Self> {
        let key = cfg
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Judge enabled (openai) but OPENAI_API_KEY not set"))?;
        Ok(Self::new(cfg.model.clone(), key, cfg.timeout())?
            .with_base_url(cfg.base_url.clone())
            .with_json_output())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let mut body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": prompt
            }],
        });
        if self.json_output {
            body["response_format"] = json!({ "type": "json_object" });
        }

        let resp = self
            .client
            .post(self.url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let error_text = resp.text().await.unwrap_or_default();
            anyhow::bail!(
                "OpenAI chat API error (status {}): {}",
                status.as_u16(),
                error_text
            );
        }

        let json: serde_json::Value = resp.json().await?;

        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("OpenAI API response missing content"))?
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "openai".to_string(),
            model: self.model.clone(),
            meta: json.get("usage").cloned().unwrap_or(serde_json::Value::Null),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
