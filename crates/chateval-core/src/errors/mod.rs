//! Error types for the evaluation harness.
//!
//! Only configuration, dataset and recording failures are errors. Chatbot
//! and judge failures never surface here: they degrade into values (see
//! [`crate::model::CompletionResult::from_error`] and
//! [`crate::model::JudgeVerdict::exact_match`]).

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// Invalid or incomplete configuration.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Unknown eval or completion fn, or an unreadable registry file.
    #[error("registry error: {message}")]
    Registry { message: String },

    /// Dataset file missing or malformed.
    #[error("dataset error in {path} (line {line}): {message}")]
    Dataset {
        path: String,
        line: usize,
        message: String,
    },

    /// Appending to the results store failed. Fatal by contract.
    #[error("failed to record match to {path}: {source}")]
    Record {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client construction failed.
    #[error("http client error: {message}")]
    Http { message: String },
}

impl EvalError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn registry(message: impl Into<String>) -> Self {
        Self::Registry {
            message: message.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::Registry { .. } | Self::Dataset { .. } => 1,
            Self::Http { .. } => 1,
            Self::Record { .. } | Self::Io { .. } => 2,
        }
    }
}

/// Result type for harness operations.
pub type EvalResult<T> = Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_failures_are_fatal_exit() {
        let err = EvalError::Record {
            path: "eval_results/results.jsonl".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("results.jsonl"));
    }

    #[test]
    fn config_errors_map_to_one() {
        assert_eq!(EvalError::config("missing key").exit_code(), 1);
        assert_eq!(
            EvalError::Dataset {
                path: "d.jsonl".into(),
                line: 3,
                message: "bad".into()
            }
            .to_string(),
            "dataset error in d.jsonl (line 3): bad"
        );
    }
}
