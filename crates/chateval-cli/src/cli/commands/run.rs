use super::super::args::RunArgs;
use super::runner_builder::{build_config, build_runner, load_registry};
use crate::exit_codes::SUCCESS;

pub(crate) async fn run(args: RunArgs) -> anyhow::Result<i32> {
    let config = build_config(&args)?;
    let registry = load_registry(&args.registry)?;
    let (runner, samples) = build_runner(&config, &registry)?;

    let metrics = runner.run(&samples).await?;
    println!("{}", serde_json::to_string(&metrics)?);
    Ok(SUCCESS)
}
