//! Completion functions: the system under evaluation.

pub mod chatbot;
pub mod fake;

use async_trait::async_trait;

use crate::model::CompletionResult;

pub use chatbot::ChatBotCompletionFn;
pub use fake::FakeCompletionFn;

/// Produces an answer for a prompt.
///
/// Implementations are infallible by contract: transport failures are
/// reported through [`CompletionResult::metadata`], never as an error.
#[async_trait]
pub trait CompletionFn: Send + Sync {
    async fn complete(&self, prompt: &str) -> CompletionResult;

    fn name(&self) -> &'static str;
}
