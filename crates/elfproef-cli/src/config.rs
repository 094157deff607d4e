use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use elfproef_core::{BsnLength, DEFAULT_LENGTH};
use elfproef_generate::EngineOptions;

use crate::{CliError, CliResult};

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_PATH: &str = "elfproef.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Where generated and excluded numbers are kept between runs.
    pub state_path: PathBuf,
    pub default_length: usize,
    pub engine: EngineOptions,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_path: PathBuf::from(".elfproef/state.json"),
            default_length: DEFAULT_LENGTH,
            engine: EngineOptions::default(),
        }
    }
}

/// Loads an explicit config file, or the default one if it exists.
pub fn load_config(path: Option<&Path>) -> CliResult<CliConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok(CliConfig::default());
            }
            default
        }
    };
    let content = std::fs::read_to_string(path)?;
    let config: CliConfig = toml::from_str(&content)?;
    config.check()?;
    Ok(config)
}

impl CliConfig {
    fn check(&self) -> CliResult<()> {
        if BsnLength::new(self.default_length).is_err() {
            return Err(CliError::InvalidConfig(format!(
                "default_length must be between 6 and 9, got {}",
                self.default_length
            )));
        }
        if self.engine.max_attempts == 0 {
            return Err(CliError::InvalidConfig(
                "engine.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
