use crate::dispatch::request::CertificateRequest;
use crate::utils::errors::{CertPortalError, Result};
use reqwest::{Client, Response};

/// Optional HTTP Basic credentials forwarded to the issuance endpoint.
/// The endpoint authenticates the user; the portal only relays.
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub struct DownloadClient {
    client: Client,
    endpoint: String,
}

impl DownloadClient {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = super::create_http_client()?;

        Ok(Self { client, endpoint })
    }

    /// Get the configured download endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the request URL for a certificate request. Parameter values
    /// are validated integers and fixed tokens, so no escaping is needed.
    pub fn request_url(&self, request: &CertificateRequest) -> String {
        let query = request
            .query_params()
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.endpoint, query)
    }

    /// Dispatch a certificate request and return the streamed file body
    pub async fn fetch(
        &self,
        request: &CertificateRequest,
        credentials: Option<&Credentials>,
    ) -> Result<String> {
        let url = self.request_url(request);
        tracing::debug!("Requesting {} from {}", request.kind(), url);

        let mut http_request = self.client.get(&url);

        if let Some(creds) = credentials {
            http_request = http_request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = http_request.send().await?;

        tracing::debug!("Response status: {}", response.status());
        self.handle_response(response).await
    }

    /// Handle HTTP response from the download endpoint
    async fn handle_response(&self, response: Response) -> Result<String> {
        let status = response.status();

        if status.is_success() {
            Ok(response.text().await?)
        } else if status == 401 || status == 403 {
            Err(CertPortalError::Auth(
                "Invalid username or password. Contact your system administrator for assistance."
                    .to_string(),
            ))
        } else if status == 404 {
            Err(CertPortalError::Config(format!(
                "Download endpoint not found at {}",
                self.endpoint
            )))
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            Err(CertPortalError::Config(format!(
                "Download endpoint error ({status}): {error_text}"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::request::ExpirationDays;

    fn client() -> DownloadClient {
        DownloadClient::new("https://certs.example.org/cgi-bin/download.pl".to_string()).unwrap()
    }

    #[test]
    fn test_user_request_url() {
        let url = client().request_url(&CertificateRequest::User);
        assert_eq!(url, "https://certs.example.org/cgi-bin/download.pl?t=user");
    }

    #[test]
    fn test_proxy_request_url_carries_expiration() {
        let days = ExpirationDays::parse("7").unwrap();
        let url = client().request_url(&CertificateRequest::proxy(days));
        assert_eq!(
            url,
            "https://certs.example.org/cgi-bin/download.pl?t=proxy&exp=7"
        );
    }
}
