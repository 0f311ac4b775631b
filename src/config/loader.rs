//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DoctorError, Result};

use super::schema::EngineConfig;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".extdoctor.yml";

/// Find the config file in `dir`, if there is one.
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load a single config file and parse it into EngineConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<EngineConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DoctorError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            DoctorError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into EngineConfig.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<EngineConfig> {
    if content.trim().is_empty() {
        return Ok(EngineConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| DoctorError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// An explicit override must exist. Without one, `.extdoctor.yml` in
/// `working_dir` is used when present and defaults otherwise.
pub fn load_config(working_dir: &Path, config_override: Option<&Path>) -> Result<EngineConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => match discover_config(working_dir) {
            Some(path) => load_config_file(&path)?,
            None => EngineConfig::default(),
        },
    };
    super::validate(&config)?;
    Ok(config)
}
