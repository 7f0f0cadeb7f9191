//! Configuration loader with tier-based merging.

use super::merge::deep_merge_all;
use super::types::Config;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const ENV_CONFIG_PATH: &str = "TASK_STORE_CONFIG_PATH";
pub const ENV_USER_DIR: &str = "TASK_STORE_USER_DIR";
pub const ENV_PROJECT_DIR: &str = "TASK_STORE_PROJECT_DIR";
pub const ENV_DB_PATH: &str = "TASK_STORE_DB_PATH";
pub const ENV_HOST: &str = "TASK_STORE_HOST";
pub const ENV_PORT: &str = "TASK_STORE_PORT";

const CONFIG_FILE: &str = "config.yaml";

/// Configuration tier priority (lowest to highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigTier {
    /// Built-in defaults
    Defaults = 0,
    /// `$CWD/task-store/config.yaml`
    Project = 1,
    /// `~/.task-store/config.yaml`
    User = 2,
    /// `--config` or `TASK_STORE_CONFIG_PATH`, replacing the file tiers
    Explicit = 3,
    /// `TASK_STORE_*` variables
    Environment = 4,
}

impl std::fmt::Display for ConfigTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigTier::Defaults => write!(f, "defaults"),
            ConfigTier::Project => write!(f, "project"),
            ConfigTier::User => write!(f, "user"),
            ConfigTier::Explicit => write!(f, "explicit"),
            ConfigTier::Environment => write!(f, "environment"),
        }
    }
}

/// Directories searched for `config.yaml`.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub project_dir: Option<PathBuf>,
    pub user_dir: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover configuration paths from environment and defaults.
    pub fn discover() -> Self {
        let user_dir = std::env::var(ENV_USER_DIR)
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".task-store")));

        let project_dir = std::env::var(ENV_PROJECT_DIR)
            .ok()
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from("task-store")));

        Self {
            project_dir,
            user_dir,
        }
    }

    pub fn with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> Self {
        Self {
            project_dir,
            user_dir,
        }
    }
}

/// Loads configuration from every tier and merges it.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    pub paths: ConfigPaths,
    config: Config,
    /// Files that contributed to the configuration, lowest tier first.
    sources: Vec<(ConfigTier, PathBuf)>,
}

impl ConfigLoader {
    /// Load from the discovered tiers, or from the single file named by
    /// `TASK_STORE_CONFIG_PATH` if it is set.
    pub fn load() -> Result<Self> {
        if let Ok(explicit_path) = std::env::var(ENV_CONFIG_PATH) {
            return Self::load_file(explicit_path);
        }
        Self::load_with_paths(ConfigPaths::discover())
    }

    /// Load a single explicit config file. Tier files are skipped; environment
    /// overrides still apply.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut config = Config::load(&path)
            .with_context(|| format!("failed to load config file {}", path.display()))?;
        apply_overrides(&mut config, env_lookup)?;

        Ok(Self {
            paths: ConfigPaths::default(),
            config,
            sources: vec![(ConfigTier::Explicit, path)],
        })
    }

    /// Load configuration with explicit tier directories.
    pub fn load_with_paths(paths: ConfigPaths) -> Result<Self> {
        let mut loader = Self::merge_tiers(paths)?;
        apply_overrides(&mut loader.config, env_lookup)?;
        Ok(loader)
    }

    /// Merge defaults, project and user tiers without environment overrides.
    pub fn merge_tiers(paths: ConfigPaths) -> Result<Self> {
        let mut layers: Vec<Value> = vec![serde_json::to_value(Config::default())?];
        let mut sources = Vec::new();

        let tiers = [
            (ConfigTier::Project, paths.project_dir.as_deref()),
            (ConfigTier::User, paths.user_dir.as_deref()),
        ];
        for (tier, dir) in tiers {
            let Some(dir) = dir else { continue };
            let file = dir.join(CONFIG_FILE);
            if let Some(layer) = read_layer(&file, tier) {
                layers.push(layer);
                sources.push((tier, file));
            }
        }

        let config: Config = serde_json::from_value(deep_merge_all(layers))
            .context("merged configuration is invalid")?;

        Ok(Self {
            paths,
            config,
            sources,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Files that contributed to the loaded configuration.
    pub fn sources(&self) -> &[(ConfigTier, PathBuf)] {
        &self.sources
    }
}

/// Parse one tier file. Missing files are skipped silently, unreadable or
/// malformed ones with a warning.
fn read_layer(file: &Path, tier: ConfigTier) -> Option<Value> {
    if !file.exists() {
        return None;
    }
    let content = match std::fs::read_to_string(file) {
        Ok(content) => content,
        Err(e) => {
            warn!(%tier, path = %file.display(), "Skipping unreadable config: {}", e);
            return None;
        }
    };
    match serde_yaml::from_str::<Value>(&content) {
        Ok(value) => {
            debug!(%tier, path = %file.display(), "Loaded config layer");
            Some(value)
        }
        Err(e) => {
            warn!(%tier, path = %file.display(), "Skipping malformed config: {}", e);
            None
        }
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Apply `TASK_STORE_*` overrides using `lookup` to read variables.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(db_path) = lookup(ENV_DB_PATH) {
        config.server.db_path = PathBuf::from(db_path);
    }

    if let Some(host) = lookup(ENV_HOST) {
        config.server.host = host;
    }

    if let Some(port) = lookup(ENV_PORT) {
        config.server.port = port
            .parse()
            .with_context(|| format!("{ENV_PORT} must be a port number, got '{port}'"))?;
    }

    Ok(())
}
