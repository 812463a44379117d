use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::args::parse_duration;
use crate::error::{ConfigError, ValidationError};
use crate::scenario::{ModeRequirements, RequirementOverrides, ScenarioMode};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    #[serde(alias = "concurrency")]
    pub connections: Option<usize>,
    pub requests: Option<usize>,
    pub mode: Option<ScenarioMode>,
    pub timeout: Option<DurationValue>,
    pub results_dir: Option<String>,
    pub baseline: Option<String>,
    pub skip_functional: Option<bool>,
    pub no_color: Option<bool>,
    #[serde(default)]
    pub requirements: BTreeMap<ScenarioMode, RequirementOverrides>,
}

/// Looked up in this order when `--config` is not given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["apibench.toml", "apibench.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(ext) => Err(ConfigError::UnsupportedExtension {
                ext: ext.to_owned(),
            }),
            None => Err(ConfigError::MissingExtension),
        }
    }
}

impl ConfigFile {
    /// Reads the explicit file, or the first of [`DEFAULT_CONFIG_FILES`]
    /// present in `dir`. Returns the path that was used with the parsed file.
    ///
    /// # Errors
    ///
    /// Returns an error when the chosen file cannot be read or parsed. A
    /// missing default file is not an error.
    pub fn discover(
        explicit: Option<&Path>,
        dir: &Path,
    ) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let chosen = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => DEFAULT_CONFIG_FILES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file()),
        };
        let Some(path) = chosen else {
            debug!("No config file in {}", dir.display());
            return Ok(None);
        };
        let config = Self::from_path(&path)?;
        debug!(
            "Loaded config from {} ({} requirement tables)",
            path.display(),
            config.requirements.len()
        );
        Ok(Some((path, config)))
    }

    /// Parses a `.toml` or `.json` config file.
    ///
    /// # Errors
    ///
    /// Returns an error for an unreadable file, an unknown extension, or
    /// content that does not match the config schema.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        match format {
            ConfigFormat::Toml => {
                toml::from_str(&content).map_err(|source| ConfigError::ParseToml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|source| ConfigError::ParseJson {
                    path: path.to_path_buf(),
                    source,
                })
            }
        }
    }

    /// Built-in limits for `mode` with any `[requirements.<mode>]` table applied.
    #[must_use]
    pub fn requirements_for(&self, mode: ScenarioMode) -> ModeRequirements {
        self.requirements.get(&mode).map_or_else(
            || ModeRequirements::for_mode(mode),
            |overrides| ModeRequirements::for_mode(mode).with_overrides(overrides),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration(text),
        }
    }
}
