use serde::{Deserialize, Serialize};

/// One line of a sample dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub input: String,
    pub ideal: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMeta {
    pub error: Option<String>,
}

/// Normalized outcome of a single chatbot call.
///
/// Transport failures are folded into the value: `metadata.error` carries the
/// failure and `completion` holds a synthetic `"Error: ..."` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult {
    pub completion: String,
    pub metadata: CompletionMeta,
}

impl CompletionResult {
    pub fn ok(completion: impl Into<String>) -> Self {
        Self {
            completion: completion.into(),
            metadata: CompletionMeta::default(),
        }
    }

    pub fn from_error(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            completion: format!("Error: {}", error),
            metadata: CompletionMeta { error: Some(error) },
        }
    }

    /// Candidate completions; a chatbot call always yields exactly one.
    pub fn completions(&self) -> Vec<&str> {
        vec![self.completion.as_str()]
    }

    pub fn is_error(&self) -> bool {
        self.metadata.error.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    Judge,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeVerdict {
    pub is_correct: bool,
    pub similarity: f64,
    pub source: VerdictSource,
}

impl JudgeVerdict {
    /// Deterministic comparator used whenever the judge cannot answer.
    pub fn exact_match(sampled: &str, expected: &str) -> Self {
        let is_correct = sampled == expected;
        Self {
            is_correct,
            similarity: if is_correct { 1.0 } else { 0.0 },
            source: VerdictSource::Fallback,
        }
    }
}

/// One evaluated sample, as persisted to `results.jsonl`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub correct: bool,
    pub sampled: String,
    pub expected: String,
    pub picked: String,
    pub prompt: String,
    pub sample_id: String,
    pub similarity: f64,
}

/// Response of an LLM provider call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    #[serde(default)]
    pub meta: serde_json::Value,
}
