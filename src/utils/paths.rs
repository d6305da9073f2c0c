use crate::utils::errors::{CertPortalError, Result};
use dirs;
use std::fs;
use std::path::PathBuf;

pub struct CertPortalPaths;
const PROGRAM_NAME: &str = "cert-portal";

impl CertPortalPaths {
    /// Get the config directory: ~/.config/cert-portal/
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(PROGRAM_NAME))
            .ok_or_else(|| CertPortalError::Config("Cannot determine config directory".to_string()))
    }

    /// Get the config file path: ~/.config/cert-portal/config.yaml
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Get the runtime directory: $XDG_RUNTIME_DIR/cert-portal/
    pub fn runtime_dir() -> Result<PathBuf> {
        if let Some(runtime_dir) = std::env::var_os("XDG_RUNTIME_DIR") {
            Ok(PathBuf::from(runtime_dir).join(PROGRAM_NAME))
        } else {
            // Fallback to temp directory with user-specific path
            let user_id = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
            Ok(PathBuf::from(format!("/tmp/{PROGRAM_NAME}-{user_id}")))
        }
    }

    /// Ensure a directory exists with proper permissions
    pub fn ensure_dir_exists(path: &PathBuf) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)?;

            // Set restrictive permissions on data directories (700)
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = fs::metadata(path)?.permissions();
                perms.set_mode(0o700);
                fs::set_permissions(path, perms)?;
            }
        }
        Ok(())
    }

    /// Ensure all necessary directories exist
    pub fn ensure_all_dirs() -> Result<()> {
        Self::ensure_dir_exists(&Self::config_dir()?)?;
        Self::ensure_dir_exists(&Self::runtime_dir()?)?;
        Ok(())
    }
}
