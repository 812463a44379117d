use clap::ArgMatches;

use crate::app::SuitePlan;
use crate::args::BenchArgs;
use crate::config::{apply_config, load_config};
use crate::error::AppResult;
use crate::scenario::ModeRequirements;

use super::types::RunPlan;

pub(crate) fn build_plan(mut args: BenchArgs, matches: &ArgMatches) -> AppResult<RunPlan> {
    let config = load_config(args.config.as_deref())?;
    if let Some(config) = config.as_ref() {
        apply_config(&mut args, matches, config)?;
    }

    if args.compare_only {
        return Ok(RunPlan::CompareOnly {
            results_dir: args.results_dir,
        });
    }

    args.apply_preset();
    announce(&args);

    let requirements = config.as_ref().map_or_else(
        || ModeRequirements::for_mode(args.mode),
        |config| config.requirements_for(args.mode),
    );

    Ok(RunPlan::Suite(Box::new(SuitePlan { args, requirements })))
}

fn announce(args: &BenchArgs) {
    println!(
        "Running {} test ({} connections, {} requests)...",
        args.preset().as_str(),
        args.connections.get(),
        args.requests.get()
    );
}
