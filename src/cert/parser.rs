use crate::utils::errors::{CertPortalError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use x509_parser::prelude::*;

/// Summary of a downloaded certificate file
#[derive(Debug, Clone, Serialize)]
pub struct CertificateSummary {
    pub subject: String,
    pub cn: String,
    pub issuer: String,
    pub serial: String,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    pub days_remaining: i64,
}

pub struct CertificateParser;

impl CertificateParser {
    /// Parse a PEM certificate file into a summary
    pub fn parse_pem(pem_data: &str) -> Result<CertificateSummary> {
        let (_, pem) = parse_x509_pem(pem_data.as_bytes())
            .map_err(|e| CertPortalError::CertParsing(format!("Failed to parse PEM: {e}")))?;

        let (_, cert) = parse_x509_certificate(&pem.contents)
            .map_err(|e| CertPortalError::CertParsing(format!("Failed to parse X.509: {e}")))?;

        Self::summarize(&cert)
    }

    fn summarize(cert: &X509Certificate) -> Result<CertificateSummary> {
        let serial = hex::encode(cert.raw_serial());

        // Extract subject CN
        let cn = cert
            .subject()
            .iter_common_name()
            .next()
            .and_then(|cn| cn.as_str().ok())
            .unwrap_or("Unknown")
            .to_string();

        let subject = cert.subject().to_string();
        let issuer = cert.issuer().to_string();

        // Extract validity dates
        let not_before = DateTime::from_timestamp(cert.validity().not_before.timestamp(), 0)
            .unwrap_or_else(Utc::now);
        let not_after = DateTime::from_timestamp(cert.validity().not_after.timestamp(), 0)
            .unwrap_or_else(Utc::now);

        let days_remaining = (not_after - Utc::now()).num_days();

        Ok(CertificateSummary {
            subject,
            cn,
            issuer,
            serial,
            not_before,
            not_after,
            days_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_non_pem_input() {
        let result = CertificateParser::parse_pem("<html>not a certificate</html>");
        assert!(matches!(result, Err(CertPortalError::CertParsing(_))));
    }

    #[test]
    fn test_parse_rejects_truncated_pem() {
        let truncated = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";
        let result = CertificateParser::parse_pem(truncated);
        assert!(matches!(result, Err(CertPortalError::CertParsing(_))));
    }
}
