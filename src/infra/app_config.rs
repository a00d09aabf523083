use crate::domain::{COMPAT_IMPORT, FUTURE_IMPORT_PREFIX};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Patcher settings. The defaults are what downstream files rely on.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PatchConfig {
    /// Line inserted into each file, without its terminator.
    pub import_line: String,
    /// Lines starting with this prefix must stay above the inserted line.
    pub anchor_prefix: String,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            import_line: COMPAT_IMPORT.to_string(),
            anchor_prefix: FUTURE_IMPORT_PREFIX.to_string(),
        }
    }
}

impl PatchConfig {
    /// The import line with any trailing line break removed.
    pub fn import_line(&self) -> &str {
        self.import_line.trim_end_matches(['\n', '\r'])
    }
}

pub fn load_config() -> PatchConfig {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> PatchConfig {
    let Ok(contents) = std::fs::read_to_string(path) else {
        return PatchConfig::default();
    };
    match toml::from_str(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", path.display());
            config
        }
        Err(err) => {
            log::warn!("Ignoring invalid config {}: {err}", path.display());
            PatchConfig::default()
        }
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("TFCOMPAT_CONFIG_PATH") {
        return PathBuf::from(path);
    }

    dirs::config_dir()
        .unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(".config")
        })
        .join("tfcompat")
        .join("config.toml")
}
