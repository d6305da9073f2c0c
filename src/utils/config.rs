use crate::utils::errors::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk portal configuration. All fields are optional; command-line
/// flags and environment variables take precedence.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Full URL of the certificate download endpoint
    pub endpoint: Option<String>,

    /// Directory holding the page fragments
    pub site_dir: Option<PathBuf>,
}

impl PortalConfig {
    /// Load configuration from a YAML file. A missing file is not an
    /// error and yields the default (empty) configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: PortalConfig = serde_yaml::from_str(&content)?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
