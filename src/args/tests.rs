use clap::Parser;
use std::time::Duration;

use super::*;
use crate::scenario::ScenarioMode;

fn parse(args: &[&str]) -> Result<BenchArgs, String> {
    let mut argv = vec!["apibench"];
    argv.extend_from_slice(args);
    BenchArgs::try_parse_from(argv).map_err(|err| format!("parse failed: {}", err))
}

#[test]
fn defaults_match_standard_level() -> Result<(), String> {
    let args = parse(&[])?;
    if args.url != DEFAULT_URL {
        return Err(format!("Unexpected url: {}", args.url));
    }
    if args.connections.get() != DEFAULT_CONNECTIONS {
        return Err(format!("Unexpected connections: {}", args.connections.get()));
    }
    if args.requests.get() != DEFAULT_REQUESTS {
        return Err(format!("Unexpected requests: {}", args.requests.get()));
    }
    if args.mode != ScenarioMode::Data {
        return Err("Expected data mode by default".to_owned());
    }
    if args.request_timeout != Duration::from_secs(30) {
        return Err("Expected 30s default timeout".to_owned());
    }
    if args.preset() != TestPreset::Custom {
        return Err("Expected no preset".to_owned());
    }
    Ok(())
}

#[test]
fn quick_preset_overrides_load() -> Result<(), String> {
    let mut args = parse(&["--quick", "-c", "99"])?;
    args.apply_preset();
    if args.connections.get() != 10 || args.requests.get() != 100 {
        return Err(format!(
            "Unexpected quick load: {}/{}",
            args.connections.get(),
            args.requests.get()
        ));
    }
    Ok(())
}

#[test]
fn endurance_preset_overrides_load() -> Result<(), String> {
    let mut args = parse(&["--endurance"])?;
    args.apply_preset();
    if args.connections.get() != 30 || args.requests.get() != 5000 {
        return Err("Unexpected endurance load".to_owned());
    }
    Ok(())
}

#[test]
fn presets_conflict() -> Result<(), String> {
    if parse(&["--quick", "--endurance"]).is_ok() {
        return Err("Expected conflicting presets to fail".to_owned());
    }
    Ok(())
}

#[test]
fn mode_parses_case_insensitively() -> Result<(), String> {
    let args = parse(&["--mode", "MIXED"])?;
    if args.mode != ScenarioMode::Mixed {
        return Err("Expected mixed mode".to_owned());
    }
    let args = parse(&["-m", "api"])?;
    if args.mode != ScenarioMode::Api {
        return Err("Expected api mode".to_owned());
    }
    Ok(())
}

#[test]
fn zero_connections_rejected() -> Result<(), String> {
    if parse(&["-c", "0"]).is_ok() {
        return Err("Expected zero connections to fail".to_owned());
    }
    Ok(())
}

#[test]
fn parse_duration_units() -> Result<(), String> {
    let cases = [
        ("250ms", Duration::from_millis(250)),
        ("5", Duration::from_secs(5)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (raw, expected) in cases {
        let parsed = parse_duration(raw).map_err(|err| format!("{}: {}", raw, err))?;
        if parsed != expected {
            return Err(format!("Unexpected duration for {}: {:?}", raw, parsed));
        }
    }
    if parse_duration("0s").is_ok() {
        return Err("Expected zero duration to fail".to_owned());
    }
    if parse_duration("10d").is_ok() {
        return Err("Expected unknown unit to fail".to_owned());
    }
    Ok(())
}
