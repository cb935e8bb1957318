use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::context::BuildContext;

pub const CONFIG_FILE_NAME: &str = ".modgraphrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding the `*.modules.json` unit definitions.
    #[serde(default = "default_definitions_root")]
    pub definitions_root: String,

    /// Path the graph artifact is written to.
    #[serde(default = "default_output")]
    pub output: String,

    /// Unit-name prefixes excluded from scanning.
    #[serde(default = "default_skip_units")]
    pub skip_units: Vec<String>,

    /// Module descriptor excluded from the scan (the one hosting the
    /// scan, when the graph run is triggered from inside a build).
    #[serde(default)]
    pub exclude_module: Option<String>,

    /// Default build context; individual fields can be overridden per
    /// invocation.
    #[serde(default)]
    pub context: BuildContext,
}

fn default_definitions_root() -> String {
    "./modules".to_string()
}

fn default_output() -> String {
    "./ModuleDependency.txt".to_string()
}

fn default_skip_units() -> Vec<String> {
    vec!["System".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            definitions_root: default_definitions_root(),
            output: default_output(),
            skip_units: default_skip_units(),
            exclude_module: None,
            context: BuildContext::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error on empty paths or empty skip prefixes, which
    /// would silently skip every unit.
    pub fn validate(&self) -> Result<()> {
        if self.definitions_root.trim().is_empty() {
            bail!("'definitionsRoot' must not be empty");
        }
        if self.output.trim().is_empty() {
            bail!("'output' must not be empty");
        }
        for prefix in &self.skip_units {
            if prefix.is_empty() {
                bail!("'skipUnits' entries must not be empty (an empty prefix matches every unit)");
            }
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    serde_json::to_string_pretty(&Config::default())
        .context("Failed to serialize default configuration")
}

/// Walk from `start_dir` towards the filesystem root looking for a
/// config file, stopping at the repository boundary (a directory that
/// contains `.git`).
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").exists() {
            return None;
        }
    }
    None
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    let Some(path) = find_config_file(start_dir) else {
        return Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        });
    };

    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;
    Ok(ConfigLoadResult {
        config,
        from_file: true,
    })
}
