/// Host platform configuration
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// First platform level exposing structured document handles
pub const DOCUMENT_HANDLES_MIN_SDK: u32 = 19;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub sdk_level: u32,
    pub external_storage_root: String,
    /// Volume hosting the public `Download` folder; falls back to the external storage root
    pub downloads_directory: Option<String>,
    pub secondary_storage_prefix: String,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            sdk_level: 30,
            external_storage_root: "/storage/emulated/0".to_string(),
            downloads_directory: None,
            secondary_storage_prefix: "/storage".to_string(),
        }
    }
}

impl PlatformConfig {
    /// Load a JSON config file; missing fields take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .context(format!("Failed to read config at {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .context(format!("Invalid platform config in {}", path.display()))?;

        tracing::debug!("Loaded platform config from {}", path.display());
        Ok(config)
    }

    /// Get the default config path (~/.contentpath/platform.json)
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".contentpath").join("platform.json"))
    }

    /// Load the default config file if one exists, otherwise use defaults
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn supports_document_handles(&self) -> bool {
        self.sdk_level >= DOCUMENT_HANDLES_MIN_SDK
    }

    pub fn downloads_directory(&self) -> &str {
        self.downloads_directory
            .as_deref()
            .unwrap_or(&self.external_storage_root)
    }
}
