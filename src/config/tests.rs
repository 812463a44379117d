use super::apply_config;
use super::types::{ConfigFile, DEFAULT_CONFIG_FILES};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::BenchArgs;
use crate::scenario::{RequirementMetric, ScenarioMode};

fn parse_args(argv: &[&str]) -> Result<(BenchArgs, clap::ArgMatches), String> {
    let matches = BenchArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let args = BenchArgs::from_arg_matches(&matches)
        .map_err(|err| format!("from matches failed: {}", err))?;
    Ok((args, matches))
}

fn write_config(name: &str, content: &str) -> Result<(tempfile::TempDir, ConfigFile), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join(name);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    let config = ConfigFile::from_path(&path).map_err(|err| err.to_string())?;
    Ok((dir, config))
}

#[test]
fn parse_toml_config_with_requirements() -> Result<(), String> {
    let (_dir, config) = write_config(
        "apibench.toml",
        r#"
url = "http://bench-host:9000"
connections = 40
requests = 500
mode = "mixed"
timeout = "5s"

[requirements.data]
p99_ms = 12.5
requests_per_sec = 800
"#,
    )?;

    if config.url.as_deref() != Some("http://bench-host:9000") {
        return Err("Unexpected url".to_owned());
    }
    if config.connections != Some(40) || config.requests != Some(500) {
        return Err("Unexpected load values".to_owned());
    }
    if config.mode != Some(ScenarioMode::Mixed) {
        return Err(format!("Unexpected mode: {:?}", config.mode));
    }
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| "Expected timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_secs(5) {
        return Err(format!("Unexpected timeout: {:?}", timeout));
    }

    let data = config.requirements_for(ScenarioMode::Data);
    let p99 = data
        .requirements
        .iter()
        .find(|req| req.metric == RequirementMetric::P99)
        .ok_or_else(|| "Missing p99 requirement".to_owned())?;
    if (p99.limit - 12.5).abs() > f64::EPSILON {
        return Err(format!("Unexpected p99 limit: {}", p99.limit));
    }
    let rps = data
        .requirements
        .iter()
        .find(|req| req.metric == RequirementMetric::RequestsPerSec)
        .ok_or_else(|| "Missing rps requirement".to_owned())?;
    if (rps.limit - 800.0).abs() > f64::EPSILON {
        return Err(format!("Unexpected rps limit: {}", rps.limit));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let (_dir, config) = write_config(
        "apibench.json",
        r#"{
  "url": "http://localhost:3000",
  "concurrency": 8,
  "timeout": 2,
  "baseline": "base.json"
}"#,
    )?;
    if config.connections != Some(8) {
        return Err("Expected concurrency alias to set connections".to_owned());
    }
    if config.baseline.as_deref() != Some("base.json") {
        return Err("Unexpected baseline".to_owned());
    }
    let timeout = config
        .timeout
        .as_ref()
        .ok_or_else(|| "Expected timeout".to_owned())?
        .to_duration()
        .map_err(|err| err.to_string())?;
    if timeout != Duration::from_secs(2) {
        return Err(format!("Unexpected timeout: {:?}", timeout));
    }
    Ok(())
}

#[test]
fn unknown_keys_are_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apibench.toml");
    std::fs::write(&path, "urll = \"http://x\"\n").map_err(|err| format!("write failed: {}", err))?;
    if ConfigFile::from_path(&path).is_ok() {
        return Err("Expected unknown key to fail".to_owned());
    }
    Ok(())
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("apibench.yaml");
    std::fs::write(&path, "url: x\n").map_err(|err| format!("write failed: {}", err))?;
    match ConfigFile::from_path(&path) {
        Ok(_) => Err("Expected yaml to be rejected".to_owned()),
        Err(err) if err.to_string().contains("yaml") => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
    }
}

#[test]
fn config_fills_values_not_given_on_cli() -> Result<(), String> {
    let (mut args, matches) = parse_args(&["apibench", "--connections", "5"])?;
    let config = ConfigFile {
        url: Some("http://other:8080".to_owned()),
        connections: Some(50),
        requests: Some(300),
        mode: Some(ScenarioMode::Status),
        ..ConfigFile::default()
    };
    apply_config(&mut args, &matches, &config).map_err(|err| err.to_string())?;

    if args.connections.get() != 5 {
        return Err(format!(
            "CLI connections should win, got {}",
            args.connections.get()
        ));
    }
    if args.requests.get() != 300 {
        return Err(format!("Expected config requests, got {}", args.requests.get()));
    }
    if args.url != "http://other:8080" {
        return Err(format!("Expected config url, got {}", args.url));
    }
    if args.mode != ScenarioMode::Status {
        return Err(format!("Expected config mode, got {:?}", args.mode));
    }
    Ok(())
}

#[test]
fn zero_connections_in_config_is_rejected() -> Result<(), String> {
    let (mut args, matches) = parse_args(&["apibench"])?;
    let config = ConfigFile {
        connections: Some(0),
        ..ConfigFile::default()
    };
    match apply_config(&mut args, &matches, &config) {
        Ok(()) => Err("Expected zero connections to fail".to_owned()),
        Err(err) if err.to_string().contains("connections") => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
    }
}

#[test]
fn requirements_without_overrides_use_builtins() -> Result<(), String> {
    let config = ConfigFile::default();
    let mixed = config.requirements_for(ScenarioMode::Mixed);
    if mixed.requirements.len() != 4 {
        return Err(format!(
            "Expected 3 latency limits plus success rate, got {}",
            mixed.requirements.len()
        ));
    }
    Ok(())
}

#[test]
fn discovery_prefers_toml_over_json() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    std::fs::write(dir.path().join("apibench.json"), r#"{"requests": 20}"#)
        .map_err(|err| format!("write failed: {}", err))?;
    std::fs::write(dir.path().join("apibench.toml"), "requests = 10\n")
        .map_err(|err| format!("write failed: {}", err))?;

    let (path, config) = ConfigFile::discover(None, dir.path())
        .map_err(|err| err.to_string())?
        .ok_or_else(|| "Expected a config file".to_owned())?;
    if path != dir.path().join(DEFAULT_CONFIG_FILES[0]) || config.requests != Some(10) {
        return Err(format!("Unexpected pick: {} {:?}", path.display(), config.requests));
    }
    Ok(())
}

#[test]
fn discovery_without_files_is_none_but_explicit_missing_file_fails() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let found = ConfigFile::discover(None, dir.path()).map_err(|err| err.to_string())?;
    if found.is_some() {
        return Err("Expected no config".to_owned());
    }
    let missing = dir.path().join("absent.toml");
    match ConfigFile::discover(Some(&missing), dir.path()) {
        Err(crate::error::ConfigError::ReadConfig { path, .. }) if path == missing => Ok(()),
        other => Err(format!("Expected a read error, got {:?}", other.map(|_| ()))),
    }
}
