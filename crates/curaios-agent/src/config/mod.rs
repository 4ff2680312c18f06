//! Configuration loading for CurAIos.
//! Reads curaios.toml from the current directory or the path in CURAIOS_CONFIG,
//! then applies environment overrides.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use curaios_authority::NcbiSettings;
use curaios_core::ResolverSettings;
use curaios_llm::LlmSettings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub ncbi: NcbiSettings,
    #[serde(default)]
    pub resolver: ResolverSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Config {
    /// CURAIOS_CONFIG if set, else ./curaios.toml.
    pub fn path() -> PathBuf {
        std::env::var("CURAIOS_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("curaios.toml"))
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read the file at `path`. `Ok(None)` when it does not exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(config))
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = set("CURAIOS_LLM_API_KEY").or_else(|| set("OPENROUTER_API_KEY")) {
            self.llm.api_key = key;
        }
        if let Some(model) = set("CURAIOS_LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(key) = set("CURAIOS_NCBI_API_KEY") {
            self.ncbi.api_key = key;
        }
        if let Some(email) = set("CURAIOS_NCBI_EMAIL") {
            self.ncbi.email = email;
        }
        if let Some(level) = set("CURAIOS_LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}
