use crate::dispatch::client::{Credentials, DownloadClient};
use crate::dispatch::request::{CertificateRequest, ExpirationDays};
use crate::storage::local;
use crate::utils::errors::{CertPortalError, Result};
use std::path::PathBuf;

/// Where a fetched certificate file ends up
pub enum DeliveryTarget {
    Stdout,
    File(PathBuf),
}

pub struct DownloadService {
    client: DownloadClient,
}

impl DownloadService {
    pub fn new(endpoint: String) -> Result<Self> {
        Ok(Self {
            client: DownloadClient::new(endpoint)?,
        })
    }

    /// Request the long-lived user certificate. Always a valid request.
    pub async fn fetch_user_certificate(
        &self,
        credentials: Option<&Credentials>,
        target: &DeliveryTarget,
    ) -> Result<()> {
        self.fetch(&CertificateRequest::User, credentials, target)
            .await
    }

    /// Request a proxy certificate for `raw_days` days. The raw value is
    /// validated before anything is sent; invalid input never reaches the
    /// endpoint.
    pub async fn fetch_proxy_certificate(
        &self,
        raw_days: &str,
        credentials: Option<&Credentials>,
        target: &DeliveryTarget,
    ) -> Result<()> {
        let days = ExpirationDays::parse(raw_days)?;
        self.fetch(&CertificateRequest::proxy(days), credentials, target)
            .await
    }

    async fn fetch(
        &self,
        request: &CertificateRequest,
        credentials: Option<&Credentials>,
        target: &DeliveryTarget,
    ) -> Result<()> {
        tracing::info!("Requesting {} from {}", request, self.client.endpoint());

        let body = self.client.fetch(request, credentials).await?;
        let pem = Self::require_pem(&body)?;

        match target {
            DeliveryTarget::Stdout => {
                print!("{pem}");
            }
            DeliveryTarget::File(path) => {
                local::write_certificate(path, pem)?;
                eprintln!("Saved {} to {}", request, path.display());
            }
        }

        Ok(())
    }

    /// The endpoint streams PEM certificate files. Anything else (an HTML
    /// error page served with status 200, for example) is rejected here.
    fn require_pem(body: &str) -> Result<&str> {
        let trimmed = body.trim_start();
        if trimmed.starts_with("-----BEGIN") {
            Ok(body)
        } else {
            Err(CertPortalError::CertParsing(
                "Download endpoint did not return a PEM certificate".to_string(),
            ))
        }
    }
}
