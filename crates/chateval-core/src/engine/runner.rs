use std::sync::Arc;

use tracing::info;

use crate::errors::EvalResult;
use crate::judge::JudgeService;
use crate::metrics::{self, AggregateMetrics};
use crate::model::{MatchRecord, Sample};
use crate::providers::completion::CompletionFn;
use crate::record::Recorder;

/// Sequential evaluation driver.
///
/// Each sample is fetched, judged and recorded before the next one starts.
/// Chatbot and judge failures have fallback values, so the loop always
/// covers every sample; only a recording failure aborts the run.
pub struct Runner {
    pub eval_name: String,
    pub completion_fn: Arc<dyn CompletionFn>,
    pub judge: JudgeService,
    pub recorder: Arc<dyn Recorder>,
}

impl Runner {
    pub fn new(
        eval_name: impl Into<String>,
        completion_fn: Arc<dyn CompletionFn>,
        judge: JudgeService,
        recorder: Arc<dyn Recorder>,
    ) -> Self {
        Self {
            eval_name: eval_name.into(),
            completion_fn,
            judge,
            recorder,
        }
    }

    /// Evaluates all samples, then aggregates over everything recorded.
    pub async fn run(&self, samples: &[Sample]) -> EvalResult<AggregateMetrics> {
        info!(
            eval = %self.eval_name,
            samples = samples.len(),
            completion_fn = self.completion_fn.name(),
            judge_enabled = self.judge.is_enabled(),
            "starting evaluation"
        );

        for (index, sample) in samples.iter().enumerate() {
            self.eval_sample(index, sample).await?;
        }
        self.recorder.finalize()?;

        let matches = self.recorder.matches();
        let result = AggregateMetrics::from_records(&matches);
        info!(
            eval = %self.eval_name,
            correct = metrics::correct_count(&matches),
            total = matches.len(),
            accuracy = result.accuracy,
            avg_similarity = result.avg_similarity,
            "evaluation complete"
        );
        Ok(result)
    }

    /// Fetch, judge and record a single sample.
    pub async fn eval_sample(&self, index: usize, sample: &Sample) -> EvalResult<MatchRecord> {
        let prompt = sample.input.as_str();
        let sample_id = sample
            .sample_id
            .clone()
            .unwrap_or_else(|| format!("{}.{}", self.eval_name, index));

        let result = self.completion_fn.complete(prompt).await;
        let answer = result
            .completions()
            .first()
            .map(|c| c.to_string())
            .unwrap_or_default();

        let verdict = self.judge.judge(&answer, &sample.ideal).await;

        let record = MatchRecord {
            correct: verdict.is_correct,
            sampled: answer.clone(),
            expected: sample.ideal.clone(),
            picked: answer,
            prompt: sample.input.clone(),
            sample_id,
            similarity: verdict.similarity,
        };
        self.recorder.record_match(record.clone())?;

        info!(
            sample_id = %record.sample_id,
            prompt = %record.prompt,
            expected = %record.expected,
            sampled = %record.sampled,
            correct = record.correct,
            similarity = record.similarity,
            verdict_source = ?verdict.source,
            completion_error = result.metadata.error.as_deref().unwrap_or(""),
            "sample evaluated"
        );
        Ok(record)
    }
}
