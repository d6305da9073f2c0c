use crate::utils::errors::Result;
use std::fs;
use std::path::Path;

/// Write a fetched certificate file to disk. Credential files get
/// owner-only permissions, matching what the storage system's native
/// client tools set on stored certificates.
pub fn write_certificate(path: &Path, pem: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let mut perms = fs::metadata(parent)?.permissions();
                perms.set_mode(0o700);
                fs::set_permissions(parent, perms)?;
            }
        }
    }

    fs::write(path, pem)?;

    // Owner read/write only (600)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }

    tracing::debug!("Wrote certificate to {}", path.display());
    Ok(())
}
