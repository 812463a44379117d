mod plan;

#[cfg(test)]
mod tests;

use std::process::ExitCode;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::BenchArgs;
use crate::error::AppResult;
use plan::{build_plan, execute_plan};

/// Parses arguments, applies config, and runs the selected plan. The exit
/// code is success only when every functional check passed.
///
/// # Errors
///
/// Returns an error for invalid arguments or config, a runtime that cannot
/// be built, or a compare-only run without enough records.
pub fn run() -> AppResult<ExitCode> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose);

    let plan = build_plan(args, &matches)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let passed = runtime.block_on(execute_plan(&plan))?;
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn parse_args() -> AppResult<(BenchArgs, ArgMatches)> {
    let matches = BenchArgs::command().get_matches();
    let args = BenchArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}
