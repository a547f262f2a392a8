use std::collections::BTreeMap;

use async_trait::async_trait;

use super::CompletionFn;
use crate::model::CompletionResult;

/// Canned answers keyed by prompt, for dry runs without a chatbot.
/// Unknown prompts get an empty answer.
#[derive(Debug, Clone, Default)]
pub struct FakeCompletionFn {
    answers: BTreeMap<String, String>,
}

impl FakeCompletionFn {
    pub fn new(answers: BTreeMap<String, String>) -> Self {
        Self { answers }
    }

    pub fn with_answer(mut self, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        self.answers.insert(prompt.into(), answer.into());
        self
    }
}

#[async_trait]
impl CompletionFn for FakeCompletionFn {
    async fn complete(&self, prompt: &str) -> CompletionResult {
        CompletionResult::ok(self.answers.get(prompt).cloned().unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}
