use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use git_fetch_negotiate::refspec::Refspec;
use serde::{Deserialize, Serialize};

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(s) = path.to_str() {
        if let Some(stripped) = s.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if s == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

/// Configuration for git-fetch-negotiate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NegotiateConfig {
    /// Local repository directory
    pub repository: PathBuf,
    /// Where to write the protocol transcript (stdout if unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<PathBuf>,
    /// Known remotes by name
    #[serde(default)]
    pub remotes: BTreeMap<String, RemoteConfig>,
}

/// A remote we can fetch from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteConfig {
    /// Directory of the remote repository
    pub url: PathBuf,
    /// Fetch refspec, e.g. `+refs/heads/*:refs/remotes/origin/*`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<String>,
}

impl RemoteConfig {
    /// Parse the configured fetch refspec, if any
    pub fn refspec(&self) -> Result<Option<Refspec>> {
        self.fetch
            .as_deref()
            .map(Refspec::parse)
            .transpose()
            .with_context(|| format!("Invalid fetch refspec for {:?}", self.url))
    }
}

impl NegotiateConfig {
    /// Load configuration from `path` (or the default location) and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_file_path()?,
        };
        tracing::debug!("loading git-fetch-negotiate config from {:?}", config_path);
        if !config_path.exists() {
            anyhow::bail!("config file not found at {:?}", config_path);
        }
        let mut config = Self::load_from_file(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Override fields from environment variables
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var("GIT_FETCH_NEGOTIATE_REPOSITORY") {
            self.repository = expand_tilde(&PathBuf::from(path));
        }

        if let Ok(path) = env::var("GIT_FETCH_NEGOTIATE_TRANSCRIPT") {
            self.transcript = Some(expand_tilde(&PathBuf::from(path)));
        }
    }

    /// Load configuration from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let mut config: NegotiateConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        // Expand tildes in all path fields
        config.repository = expand_tilde(&config.repository);
        if let Some(ref transcript) = config.transcript {
            config.transcript = Some(expand_tilde(transcript));
        }
        for remote in config.remotes.values_mut() {
            remote.url = expand_tilde(&remote.url);
        }

        Ok(config)
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }

    /// Get default config file path
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".config/git-fetch-negotiate/config.yaml"))
            .context("Could not determine home directory for config file")
    }

    /// Look up a remote by name
    pub fn remote(&self, name: &str) -> Result<&RemoteConfig> {
        self.remotes
            .get(name)
            .with_context(|| format!("No remote named '{}' in config", name))
    }
}
