use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants;

mod env;

pub use env::CiEnv;


/// File at the repository root holding [`Config`]
pub const CONFIG_FILE: &str = "monobuild.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// File that marks a directory as a service
    #[serde(default = "default_descriptor_file")]
    pub descriptor_file: String,

    /// Platforms used by services that do not declare their own
    #[serde(default = "default_platforms")]
    pub default_platforms: Vec<String>,

    /// Remote the base revision is fetched from
    #[serde(default = "default_remote")]
    pub remote: String,
}

fn default_descriptor_file() -> String {
    constants::service::DESCRIPTOR_FILE.to_string()
}

fn default_platforms() -> Vec<String> {
    vec![constants::platform::LINUX_AMD64.to_string()]
}

fn default_remote() -> String {
    constants::git::DEFAULT_REMOTE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            descriptor_file: default_descriptor_file(),
            default_platforms: default_platforms(),
            remote: default_remote(),
        }
    }
}

impl Config {
    /// Load `monobuild.toml` from the repository root, falling back to defaults
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let config_path = root.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        Ok(config)
    }
}
