//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable overriding the root data folder
pub const ROOT_FOLDER_ENV: &str = "DREAMTELL_ROOT_FOLDER";

/// Database file name inside the root folder
const DB_FILE_NAME: &str = "dreamtell.db";

/// Optional TOML configuration file contents
///
/// Missing files and missing keys fall back to defaults; a present but
/// unparsable file is an error so typos don't silently vanish.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Root data folder (overridden by CLI arg and environment)
    pub root_folder: Option<String>,
    /// API key for the hosted LLM used for story generation
    pub llm_api_key: Option<String>,
    /// Base URL of the OpenAI-compatible chat completions API
    pub llm_base_url: Option<String>,
    /// Model identifier for story generation
    pub llm_model: Option<String>,
    /// Allowed CORS origins ("*" for any)
    pub cors_origins: Option<Vec<String>>,
}

impl TomlConfig {
    /// Load the platform config file, falling back to defaults when absent.
    ///
    /// Missing config files must not prevent startup; a warning is logged
    /// and compiled defaults apply.
    pub fn load() -> Self {
        let Some(path) = config_file_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unreadable config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read config failed: {}", e)))?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Parse config failed: {}", e)))
    }
}

/// Default configuration file path for the platform
///
/// Linux prefers the user config dir, then /etc/dreamtell.
pub fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("dreamtell").join("dreamtell.toml"));

    if cfg!(target_os = "linux") {
        if let Some(path) = &user_config {
            if path.exists() {
                return user_config;
            }
        }
        let system_config = PathBuf::from("/etc/dreamtell/dreamtell.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    user_config
}

/// Resolve the root data folder.
///
/// Priority order:
/// 1. Command-line argument (highest priority)
/// 2. `DREAMTELL_ROOT_FOLDER` environment variable
/// 3. TOML config file `root_folder`
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.root_folder {
        return PathBuf::from(path);
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("dreamtell"))
        .unwrap_or_else(|| PathBuf::from("/var/lib/dreamtell"))
}

/// Create the root folder if it does not exist yet
pub fn ensure_root_folder(root: &Path) -> Result<()> {
    std::fs::create_dir_all(root)
        .map_err(|e| Error::Config(format!("Failed to create root folder {}: {}", root.display(), e)))
}

/// Database file path inside the root folder
pub fn database_path(root: &Path) -> PathBuf {
    root.join(DB_FILE_NAME)
}
