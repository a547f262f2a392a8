use std::sync::Arc;

use chateval_core::config::{EvalConfig, JudgeProvider};
use chateval_core::dataset::load_samples;
use chateval_core::engine::runner::Runner;
use chateval_core::judge::JudgeService;
use chateval_core::model::Sample;
use chateval_core::record::FileRecorder;
use chateval_core::registry::Registry;
use chateval_core::EvalResult;
use tracing::info;

use super::super::args::{RegistryArgs, RunArgs};

/// Environment first, explicit flags on top.
pub(crate) fn build_config(args: &RunArgs) -> EvalResult<EvalConfig> {
    let mut cfg = EvalConfig::from_env();

    if let Some(eval) = &args.eval {
        cfg.eval_name = eval.clone();
    }
    if let Some(samples) = &args.samples {
        cfg.samples_jsonl = Some(samples.clone());
    }
    if let Some(endpoint) = &args.endpoint {
        cfg.chatbot.endpoint = endpoint.clone();
    }
    if let Some(secs) = args.completion_timeout {
        cfg.chatbot.timeout_secs = secs;
    }
    if let Some(dir) = &args.output_dir {
        cfg.output_dir = dir.clone();
    }

    let judge = &args.judge;
    if judge.no_judge {
        cfg.judge.provider = JudgeProvider::None;
    } else if let Some(provider) = &judge.judge {
        cfg.judge.provider = provider.parse()?;
    }
    if let Some(model) = &judge.judge_model {
        cfg.judge.model = model.clone();
    }
    if let Some(secs) = judge.judge_timeout {
        cfg.judge.timeout_secs = secs;
    }
    if let Some(key) = &judge.judge_api_key {
        cfg.judge.api_key = Some(key.clone());
    }

    cfg.validate()?;
    Ok(cfg)
}

pub(crate) fn load_registry(args: &RegistryArgs) -> EvalResult<Registry> {
    let builtin = Registry::builtin();
    match &args.registry {
        Some(path) => Ok(builtin.merge(Registry::load(path)?)),
        None => Ok(builtin),
    }
}

/// Resolves the eval, loads its samples and wires the runner. Fails before
/// any sample is evaluated.
pub(crate) fn build_runner(
    cfg: &EvalConfig,
    registry: &Registry,
) -> EvalResult<(Runner, Vec<Sample>)> {
    let spec = registry.get_eval(&cfg.eval_name)?;
    let samples_path = cfg.samples_jsonl.as_ref().unwrap_or(&spec.samples_jsonl);
    let samples = load_samples(samples_path)?;

    let completion_fn = registry.build_completion_fn(&spec.completion_fn, &cfg.chatbot)?;
    let judge = JudgeService::from_config(&cfg.judge)?;
    let recorder = FileRecorder::in_dir(&cfg.output_dir)?;

    info!(
        eval = %cfg.eval_name,
        samples_path = %samples_path.display(),
        judge = cfg.judge.provider.as_str(),
        judge_model = %cfg.judge.model,
        results = %recorder.path().display(),
        "runner ready"
    );

    Ok((
        Runner::new(
            cfg.eval_name.clone(),
            completion_fn,
            judge,
            Arc::new(recorder),
        ),
        samples,
    ))
}
