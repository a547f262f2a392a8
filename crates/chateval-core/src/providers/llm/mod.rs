pub mod fake;
pub mod openai;

use async_trait::async_trait;

use crate::model::LlmResponse;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Single-turn completion of `prompt`.
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}
