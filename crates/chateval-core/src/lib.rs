//! Chatbot evaluation harness.
//!
//! Sends every sample of a dataset to a chatbot endpoint, asks an LLM judge
//! whether the answer is semantically equivalent to the ideal answer, and
//! records one match per sample:
//!
//! - [`providers::completion`]: chatbot client (`POST {"query": ...}`)
//! - [`judge`]: LLM-as-judge with exact-match fallback
//! - [`record`]: append-only JSONL match recorder
//! - [`engine::runner`]: the sequential evaluation driver
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use chateval_core::config::EvalConfig;
//! use chateval_core::engine::runner::Runner;
//! use chateval_core::judge::JudgeService;
//! use chateval_core::record::FileRecorder;
//! use chateval_core::registry::Registry;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = EvalConfig::from_env();
//! let registry = Registry::builtin();
//! let spec = registry.get_eval(&config.eval_name)?;
//! let completion_fn = registry.build_completion_fn(&spec.completion_fn, &config.chatbot)?;
//! let samples = chateval_core::dataset::load_samples(&spec.samples_jsonl)?;
//!
//! let runner = Runner::new(
//!     config.eval_name.clone(),
//!     completion_fn,
//!     JudgeService::from_config(&config.judge)?,
//!     Arc::new(FileRecorder::in_dir(&config.output_dir)?),
//! );
//! let metrics = runner.run(&samples).await?;
//! println!("accuracy: {}", metrics.accuracy);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dataset;
pub mod engine;
pub mod errors;
pub mod judge;
pub mod metrics;
pub mod model;
pub mod providers;
pub mod record;
pub mod registry;

pub use errors::{EvalError, EvalResult};
pub use metrics::AggregateMetrics;
pub use model::{CompletionMeta, CompletionResult, JudgeVerdict, MatchRecord, Sample};
