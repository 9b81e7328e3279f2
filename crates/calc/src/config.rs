use anyhow::{Context, Result};
use cmdtree::ExitCodes;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "calc.json";
pub const CONFIG_PATH_ENV: &str = "CALC_CONFIG";

/// Host configuration. Currently only the parse-failure exit codes are
/// overridable; unset fields keep the library defaults (1-4).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub exit_codes: ExitCodes,
}

impl Config {
    /// Load configuration from the file named by `CALC_CONFIG`, falling
    /// back to `calc.json` in the current directory. A missing default
    /// file is not an error; an explicitly configured path must exist.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => {
                let path = Path::new(DEFAULT_CONFIG_NAME);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse config JSON: {}", path.display()))
    }
}
