//! Configuration for gloc.
//!
//! Settings come from an optional YAML file. Every field has a default, so
//! an empty file (or no file at all) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::RowOrder;
use crate::source::DEFAULT_PREFIX;

/// Config file names looked up in the current directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["gloc.yaml", ".gloc.yaml"];

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// URL prefixes a repository reference must start with
    pub allowed_prefixes: Vec<String>,
    /// Command used to fetch repositories
    pub git: String,
    /// Command used to count lines
    pub cloc: String,
    /// Extra arguments passed to the analyzer before the target directory
    pub cloc_args: Vec<String>,
    /// Shallow clone depth; full history when unset
    pub clone_depth: Option<u32>,
    /// Default row order for the summary
    pub sort: RowOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_prefixes: vec![DEFAULT_PREFIX.to_string()],
            git: "git".to_string(),
            cloc: "cloc".to_string(),
            cloc_args: Vec::new(),
            clone_depth: None,
            sort: RowOrder::Name,
        }
    }
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::parse_str(&content)
    }

    /// Parse a config from YAML text. Blank input yields the defaults.
    pub fn parse_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(content)?;
        validate(&config)?;
        Ok(config)
    }

    /// Load the config from `explicit` if given, otherwise from the first
    /// file found by [`discover`]. Falls back to defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => discover(Path::new("."), user_config_file().as_deref()),
        };

        match path {
            Some(p) => {
                let config = Self::parse_file(&p).map_err(|e| {
                    anyhow::anyhow!("failed to load config {}: {}", p.display(), e)
                })?;
                Ok((config, Some(p)))
            }
            None => Ok((Self::default(), None)),
        }
    }
}

/// Check values that deserialize fine but can't work.
pub fn validate(config: &Config) -> anyhow::Result<()> {
    if config.allowed_prefixes.is_empty() {
        anyhow::bail!("allowed_prefixes must not be empty");
    }
    if config.allowed_prefixes.iter().any(|p| p.trim().is_empty()) {
        anyhow::bail!("allowed_prefixes must not contain empty entries");
    }
    if config.git.trim().is_empty() {
        anyhow::bail!("git command must not be empty");
    }
    if config.cloc.trim().is_empty() {
        anyhow::bail!("cloc command must not be empty");
    }
    if config.clone_depth == Some(0) {
        anyhow::bail!("clone_depth must be at least 1");
    }
    Ok(())
}

/// Find a config file in `dir`, then fall back to `user_file` if it exists.
pub fn discover(dir: &Path, user_file: Option<&Path>) -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = dir.join(name);
        if path.is_file() {
            return Some(path);
        }
    }
    user_file.filter(|p| p.is_file()).map(Path::to_path_buf)
}

/// Per-user config file, e.g. `~/.config/gloc/config.yaml`.
fn user_config_file() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "gloc").map(|d| d.config_dir().join("config.yaml"))
}
