use super::super::args::ListArgs;
use super::runner_builder::load_registry;
use crate::exit_codes::SUCCESS;

pub(crate) fn run(args: ListArgs) -> anyhow::Result<i32> {
    let registry = load_registry(&args.registry)?;

    println!("evals:");
    for (name, spec) in &registry.evals {
        println!(
            "  {}  completion_fn={}  samples={}",
            name,
            spec.completion_fn,
            spec.samples_jsonl.display()
        );
    }
    println!("completion_fns:");
    for (name, spec) in &registry.completion_fns {
        println!("  {}  kind={}", name, spec.kind());
    }
    Ok(SUCCESS)
}
