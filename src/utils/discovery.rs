use crate::utils::errors::{CertPortalError, Result};
use ordermap::OrderSet;
use serde::{Deserialize, Serialize};
use std::fs;
use trust_dns_resolver::TokioAsyncResolver;

/// Path the issuance CGI is conventionally served under. SRV discovery
/// only yields scheme, host and port.
const DEFAULT_DOWNLOAD_PATH: &str = "/cgi-bin/download.pl";

#[derive(Serialize, Deserialize)]
struct CachedEndpoint {
    url: String,
    cached_at: u64, // Unix timestamp
    ttl_seconds: u64,
}

/// Discover the certificate download endpoint using DNS SRV records with caching
pub async fn discover_endpoint() -> Result<String> {
    // Check cache first
    if let Ok(cached_url) = get_cached_endpoint() {
        tracing::debug!("Using cached download endpoint: {cached_url}");
        return Ok(cached_url);
    }

    // Parse search domains from /etc/resolv.conf
    let search_domains = parse_resolv_conf_search_domains()?;

    tracing::debug!(
        "Searching for certificate service SRV records in domains: {:?}",
        search_domains
    );

    // Create DNS resolver with system configuration
    let resolver = TokioAsyncResolver::tokio_from_system_conf()
        .map_err(|e| CertPortalError::Config(format!("Failed to create DNS resolver: {e}")))?;

    // Try each search domain
    for domain in search_domains {
        let srv_name = format!("_certs._tcp.{domain}");
        tracing::debug!("Querying SRV record: {srv_name}");

        match resolver.srv_lookup(&srv_name).await {
            Ok(srv_response) => {
                // Use the first SRV record found
                if let Some(srv_record) = srv_response.iter().next() {
                    let host = srv_record.target().to_string();
                    let port = srv_record.port();

                    // Remove trailing dot from DNS name if present
                    let clean_host = host.trim_end_matches('.');
                    let endpoint =
                        format!("https://{clean_host}:{port}{DEFAULT_DOWNLOAD_PATH}");

                    // Get TTL from the first record - use a reasonable default if not available
                    let ttl = srv_response
                        .as_lookup()
                        .records()
                        .first()
                        .map(|record| record.ttl())
                        .unwrap_or(300); // Default to 5 minutes if TTL unavailable

                    tracing::info!(
                        "Discovered download endpoint via DNS: {endpoint} (TTL: {ttl}s)"
                    );

                    // Cache the discovered endpoint with its TTL
                    if let Err(e) = cache_endpoint(&endpoint, ttl) {
                        tracing::warn!("Failed to cache download endpoint: {e}");
                    }

                    return Ok(endpoint);
                }
            }
            Err(e) => {
                tracing::debug!("No SRV record found for {srv_name}: {e}");
                continue;
            }
        }
    }

    Err(CertPortalError::Config(
        "Could not discover the download endpoint via DNS. No SRV records found for _certs._tcp in any search domain.".to_string()
    ))
}

/// Parse search domains from /etc/resolv.conf
fn parse_resolv_conf_search_domains() -> Result<OrderSet<String>> {
    let resolv_conf = fs::read_to_string("/etc/resolv.conf")
        .map_err(|e| CertPortalError::Config(format!("Failed to read /etc/resolv.conf: {e}")))?;

    let mut search_domains = OrderSet::new();

    for line in resolv_conf.lines() {
        let line = line.trim();

        // Parse "search" lines
        if let Some(domains_str) = line.strip_prefix("search ") {
            let domains: Vec<String> = domains_str
                .split_whitespace()
                .map(|s| s.to_string())
                .collect();
            search_domains.extend(domains);
        }

        // Parse "domain" lines (legacy format)
        if let Some(domain) = line.strip_prefix("domain ") {
            search_domains.insert(domain.trim().to_string());
        }
    }

    if search_domains.is_empty() {
        return Err(CertPortalError::Config(
            "No search domains found in /etc/resolv.conf".to_string(),
        ));
    }

    tracing::debug!(
        "Parsed search domains from /etc/resolv.conf: {:?}",
        search_domains
    );
    Ok(search_domains)
}

/// Get cache file path for the DNS-discovered endpoint
fn get_cache_file_path() -> Result<std::path::PathBuf> {
    Ok(crate::utils::paths::CertPortalPaths::runtime_dir()?.join("dns_endpoint.yaml"))
}

/// Get cached endpoint if available and not expired based on DNS TTL
fn get_cached_endpoint() -> Result<String> {
    let cache_file = get_cache_file_path()?;

    if !cache_file.exists() {
        return Err(CertPortalError::Config(
            "No cached download endpoint".to_string(),
        ));
    }

    let cache_content = fs::read_to_string(&cache_file)
        .map_err(|e| CertPortalError::Config(format!("Failed to read cached endpoint: {e}")))?;

    let cached: CachedEndpoint = serde_yaml::from_str(&cache_content)
        .map_err(|e| CertPortalError::Config(format!("Failed to parse cached endpoint: {e}")))?;

    // Check if cache has expired based on DNS TTL
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let expires_at = cached.cached_at + cached.ttl_seconds;

    if now >= expires_at {
        let age = now - cached.cached_at;
        tracing::debug!(
            "DNS cache expired (age: {}s, TTL: {}s), will refresh",
            age,
            cached.ttl_seconds
        );
        return Err(CertPortalError::Config(
            "Cache expired based on DNS TTL".to_string(),
        ));
    }

    let remaining_ttl = expires_at - now;
    tracing::debug!(
        "Using cached download endpoint (TTL remaining: {}s)",
        remaining_ttl
    );

    Ok(cached.url)
}

/// Cache the discovered endpoint with its DNS TTL
fn cache_endpoint(endpoint: &str, ttl_seconds: u32) -> Result<()> {
    let cache_file = get_cache_file_path()?;

    // Ensure cache directory exists
    if let Some(parent) = cache_file.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CertPortalError::Config(format!("Failed to create cache directory: {e}")))?;
    }

    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let cached = CachedEndpoint {
        url: endpoint.to_string(),
        cached_at: now,
        ttl_seconds: ttl_seconds as u64,
    };

    let cache_content = serde_yaml::to_string(&cached)
        .map_err(|e| CertPortalError::Config(format!("Failed to serialize cache data: {e}")))?;

    fs::write(&cache_file, cache_content)
        .map_err(|e| CertPortalError::Config(format!("Failed to cache endpoint: {e}")))?;

    tracing::debug!(
        "Cached download endpoint to: {} (TTL: {}s)",
        cache_file.display(),
        ttl_seconds
    );
    Ok(())
}

/// Remove the cached endpoint, forcing rediscovery on next use
pub fn clear_cached_endpoint() -> Result<bool> {
    let cache_file = get_cache_file_path()?;

    if cache_file.exists() {
        fs::remove_file(&cache_file)?;
        return Ok(true);
    }

    Ok(false)
}
