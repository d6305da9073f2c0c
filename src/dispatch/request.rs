use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Shortest proxy certificate lifetime the portal will request, in days.
pub const MIN_PROXY_DAYS: u32 = 1;
/// Longest proxy certificate lifetime the portal will request, in days.
/// The issuance endpoint enforces its own limit authoritatively.
pub const MAX_PROXY_DAYS: u32 = 14;

/// Validated proxy certificate lifetime, in whole days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpirationDays(u32);

#[derive(Error, Debug)]
pub enum ExpirationParseError {
    #[error("'{0}' is an invalid number")]
    InvalidNumber(String),

    #[error("Expiration must be at least {MIN_PROXY_DAYS} day")]
    BelowMinimum,

    #[error("Expiration exceeds maximum of {MAX_PROXY_DAYS} days")]
    ExceedsMaximum,
}

pub type Result<T> = std::result::Result<T, ExpirationParseError>;

impl From<ExpirationParseError> for crate::utils::errors::CertPortalError {
    fn from(err: ExpirationParseError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

impl ExpirationDays {
    /// Validate a raw expiration value as entered by the user
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();

        let days: i64 = trimmed
            .parse()
            .map_err(|_| ExpirationParseError::InvalidNumber(input.to_string()))?;

        if days < MIN_PROXY_DAYS as i64 {
            return Err(ExpirationParseError::BelowMinimum);
        }
        if days > MAX_PROXY_DAYS as i64 {
            return Err(ExpirationParseError::ExceedsMaximum);
        }

        Ok(Self(days as u32))
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ExpirationDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpirationDays {
    type Err = ExpirationParseError;
    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A single certificate download request. Ephemeral: built from user
/// input, turned into query parameters, and discarded once dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateRequest {
    /// Long-lived credential identifying a person to the storage system
    User,
    /// Short-lived delegated credential, valid for a bounded number of days
    Proxy { days: ExpirationDays },
}

impl CertificateRequest {
    pub fn proxy(days: ExpirationDays) -> Self {
        Self::Proxy { days }
    }

    /// Query parameters understood by the download endpoint
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::User => vec![("t", "user".to_string())],
            Self::Proxy { days } => {
                vec![("t", "proxy".to_string()), ("exp", days.to_string())]
            }
        }
    }

    /// Kind label used in log lines and default file names
    pub fn kind(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Proxy { .. } => "proxy",
        }
    }
}

impl fmt::Display for CertificateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user certificate"),
            Self::Proxy { days } => write!(f, "proxy certificate ({days} days)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_full_valid_range() {
        for d in MIN_PROXY_DAYS..=MAX_PROXY_DAYS {
            let days = ExpirationDays::parse(&d.to_string()).unwrap();
            assert_eq!(days.as_u32(), d);
        }
    }

    #[test]
    fn test_expiration_accepts_surrounding_whitespace() {
        let days = ExpirationDays::parse(" 7 ").unwrap();
        assert_eq!(days.as_u32(), 7);
    }

    #[test]
    fn test_expiration_rejects_non_numeric() {
        assert!(matches!(
            ExpirationDays::parse("fortnight"),
            Err(ExpirationParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            ExpirationDays::parse(""),
            Err(ExpirationParseError::InvalidNumber(_))
        ));
        assert!(matches!(
            ExpirationDays::parse("7.5"),
            Err(ExpirationParseError::InvalidNumber(_))
        ));
    }

    #[test]
    fn test_expiration_rejects_below_minimum() {
        assert!(matches!(
            ExpirationDays::parse("0"),
            Err(ExpirationParseError::BelowMinimum)
        ));
        assert!(matches!(
            ExpirationDays::parse("-3"),
            Err(ExpirationParseError::BelowMinimum)
        ));
    }

    #[test]
    fn test_expiration_rejects_above_maximum() {
        assert!(matches!(
            ExpirationDays::parse("15"),
            Err(ExpirationParseError::ExceedsMaximum)
        ));
        assert!(matches!(
            ExpirationDays::parse("10000"),
            Err(ExpirationParseError::ExceedsMaximum)
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = ExpirationDays::parse("abc").unwrap_err();
        assert_eq!(err.to_string(), "'abc' is an invalid number");

        let err = ExpirationDays::parse("15").unwrap_err();
        assert_eq!(err.to_string(), "Expiration exceeds maximum of 14 days");

        let err = ExpirationDays::parse("0").unwrap_err();
        assert_eq!(err.to_string(), "Expiration must be at least 1 day");
    }

    #[test]
    fn test_user_request_params() {
        let params = CertificateRequest::User.query_params();
        assert_eq!(params, vec![("t", "user".to_string())]);
    }

    #[test]
    fn test_proxy_request_params_carry_days() {
        for d in MIN_PROXY_DAYS..=MAX_PROXY_DAYS {
            let days = ExpirationDays::parse(&d.to_string()).unwrap();
            let params = CertificateRequest::proxy(days).query_params();
            assert_eq!(
                params,
                vec![("t", "proxy".to_string()), ("exp", d.to_string())]
            );
        }
    }

    #[test]
    fn test_request_kind_labels() {
        assert_eq!(CertificateRequest::User.kind(), "user");
        let days = ExpirationDays::parse("3").unwrap();
        assert_eq!(CertificateRequest::proxy(days).kind(), "proxy");
    }
}
