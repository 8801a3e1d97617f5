//! Optional TOML configuration.
//!
//! Located by `--config`, then `SHAPES_CONFIG`; absent means defaults
//! (built-in facts, no classifier, default synonyms).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub facts: FactsConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Extra phrase → identifier entries merged over the built-in table.
    #[serde(default)]
    pub synonyms: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactsConfig {
    /// `.toml` or `.json` fact base; the built-in one when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifierConfig {
    /// Inference endpoint; no classifier when unset.
    pub endpoint: Option<String>,
    /// Name of the environment variable holding a bearer token.
    #[serde(default = "ClassifierConfig::default_token_env")]
    pub token_env: String,
    #[serde(default = "ClassifierConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            token_env: Self::default_token_env(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

impl ClassifierConfig {
    fn default_token_env() -> String {
        "SHAPES_CLASSIFIER_TOKEN".to_string()
    }

    const fn default_timeout_ms() -> u64 {
        2000
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
        }
    }
}

impl ServerConfig {
    fn default_bind() -> String {
        "127.0.0.1:5000".to_string()
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Explicit path, else `SHAPES_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("SHAPES_CONFIG").ok().map(PathBuf::from));
        match path {
            Some(path) => {
                tracing::debug!("loading config from {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
