//! Configuration loading and application.
mod apply;
pub mod types;

#[cfg(test)]
mod tests;

use std::path::Path;

use crate::error::AppResult;

pub use apply::apply_config;
pub use types::ConfigFile;

/// Loads `--config` when given, else an `apibench.*` file from the working
/// directory.
///
/// # Errors
///
/// Returns an error when the selected file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    let found = ConfigFile::discover(path.map(Path::new), Path::new("."))?;
    Ok(found.map(|(_, config)| config))
}
