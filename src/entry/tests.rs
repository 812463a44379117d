use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tempfile::{TempDir, tempdir};

use super::plan::{RunPlan, build_plan};
use crate::args::BenchArgs;
use crate::scenario::{RequirementMetric, ScenarioMode};

fn config_file(content: &str) -> Result<(TempDir, String), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apibench.toml");
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    let path = path
        .to_str()
        .ok_or_else(|| "non-utf8 temp path".to_owned())?
        .to_owned();
    Ok((dir, path))
}

fn parse(argv: &[&str]) -> Result<(BenchArgs, ArgMatches), String> {
    let matches = BenchArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = BenchArgs::from_arg_matches(&matches)
        .map_err(|err| format!("from matches failed: {}", err))?;
    Ok((args, matches))
}

#[test]
fn quick_preset_wins_over_config_load() -> Result<(), String> {
    let (_dir, path) = config_file("connections = 64\nrequests = 9000\n")?;
    let (args, matches) = parse(&["apibench", "--quick", "--config", &path])?;
    let plan = build_plan(args, &matches).map_err(|err| err.to_string())?;
    let RunPlan::Suite(plan) = plan else {
        return Err("Expected suite plan".to_owned());
    };
    if plan.args.connections.get() != 10 || plan.args.requests.get() != 100 {
        return Err(format!(
            "Unexpected load: {}/{}",
            plan.args.connections.get(),
            plan.args.requests.get()
        ));
    }
    Ok(())
}

#[test]
fn config_requirements_reach_the_plan() -> Result<(), String> {
    let (_dir, path) = config_file("mode = \"api\"\n\n[requirements.api]\nmax_ms = 500\n")?;
    let (args, matches) = parse(&["apibench", "--config", &path])?;
    let plan = build_plan(args, &matches).map_err(|err| err.to_string())?;
    let RunPlan::Suite(plan) = plan else {
        return Err("Expected suite plan".to_owned());
    };
    if plan.args.mode != ScenarioMode::Api || plan.requirements.mode != ScenarioMode::Api {
        return Err(format!("Unexpected mode: {:?}", plan.args.mode));
    }
    let max = plan
        .requirements
        .requirements
        .iter()
        .find(|req| req.metric == RequirementMetric::Max)
        .ok_or_else(|| "Missing max requirement".to_owned())?;
    if (max.limit - 500.0).abs() > f64::EPSILON {
        return Err(format!("Unexpected max limit: {}", max.limit));
    }
    Ok(())
}

#[test]
fn compare_only_skips_suite() -> Result<(), String> {
    let (_dir, path) = config_file("results_dir = \"from-config\"\n")?;
    let (args, matches) = parse(&["apibench", "--compare-only", "--config", &path])?;
    match build_plan(args, &matches).map_err(|err| err.to_string())? {
        RunPlan::CompareOnly { results_dir } => {
            if results_dir.as_deref() != Some("from-config") {
                return Err(format!("Unexpected results dir: {:?}", results_dir));
            }
            Ok(())
        }
        RunPlan::Suite(_) => Err("Expected compare-only plan".to_owned()),
    }
}
