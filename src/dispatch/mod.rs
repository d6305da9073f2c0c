pub mod client;
pub mod request;
pub mod service;

pub use client::DownloadClient;
pub use request::{CertificateRequest, ExpirationDays, MAX_PROXY_DAYS, MIN_PROXY_DAYS};
pub use service::{DeliveryTarget, DownloadService};

use reqwest::Client;

/// Create a standardized HTTP client with security best practices
pub fn create_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .use_rustls_tls() // Use rustls with system certificate store
        .build()
}
