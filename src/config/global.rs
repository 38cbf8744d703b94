//! User-wide configuration file (`~/.autodeps/config.toml`).

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::AutodepsError;

fn default_venv_dir() -> String {
    ".venv".to_string()
}

fn default_python() -> String {
    "python3".to_string()
}

/// Settings read from the configuration file. Every key is optional.
///
/// ```rust,no_run
/// use autodeps_cli::config::GlobalConfig;
///
/// let config: GlobalConfig = toml::from_str(r#"skip_dirs = ["node_modules"]"#).unwrap();
/// assert_eq!(config.venv_dir, ".venv");
/// assert_eq!(config.skip_dirs, vec!["node_modules"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GlobalConfig {
    /// Default category allow-list, used when `--only` is not given.
    #[serde(default)]
    pub only: Vec<String>,

    /// Directory names the walk does not descend into (matched against the
    /// final path component, e.g. `node_modules`).
    #[serde(default)]
    pub skip_dirs: Vec<String>,

    /// Name of the Python virtual environment marker directory.
    #[serde(default = "default_venv_dir")]
    pub venv_dir: String,

    /// Interpreter used to create a missing virtual environment.
    #[serde(default = "default_python")]
    pub python: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            only: Vec::new(),
            skip_dirs: Vec::new(),
            venv_dir: default_venv_dir(),
            python: default_python(),
        }
    }
}

impl GlobalConfig {
    /// Load from an explicit path, or from the default location.
    ///
    /// An explicit path must exist; a missing file at the default location
    /// yields [`GlobalConfig::default`].
    ///
    /// # Errors
    ///
    /// [`AutodepsError::ConfigError`] when the file cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(&path).await,
            None => match Self::default_path() {
                Ok(path) if path.exists() => Self::load_from(&path).await,
                Ok(path) => {
                    tracing::debug!("No config file at {}, using defaults", path.display());
                    Ok(Self::default())
                }
                Err(e) => {
                    tracing::debug!("Cannot determine config location ({}), using defaults", e);
                    Ok(Self::default())
                }
            },
        }
    }

    /// Load from a specific file.
    ///
    /// # Errors
    ///
    /// [`AutodepsError::ConfigError`] when the file cannot be read or parsed.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await.map_err(|e| AutodepsError::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| AutodepsError::ConfigError {
            message: format!("invalid TOML in {}: {}", path.display(), e.message()),
        })?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Default configuration file location.
    ///
    /// # Errors
    ///
    /// Fails when the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("autodeps")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".autodeps")
        };

        Ok(config_dir.join("config.toml"))
    }
}
