use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use folio_core::error::AppError;
use folio_core::traits::Fetcher;
use reqwest::Client;
use url::{Host, Url};

/// Timeout applied when none is configured.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP fetcher using reqwest.
///
/// Downloads raw HTML from URLs with a fixed User-Agent and a request timeout.
/// Redirects follow reqwest's default policy. SSRF protection is **disabled**
/// by default; [`block_private_urls`](Self::block_private_urls) turns it on
/// for deployments where callers should not reach internal addresses.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
    ssrf_protection: bool,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(DEFAULT_FETCH_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .user_agent("Folio/0.1 (Page Summarizer)")
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
            ssrf_protection: false,
        })
    }

    /// Refuse requests to private/reserved IPs and non-http(s) schemes.
    pub fn block_private_urls(mut self) -> Self {
        self.ssrf_protection = true;
        self
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        if self.ssrf_protection {
            ensure_public_target(url).await?;
        }

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Upstream returned non-success for {}", url);
            return Err(AppError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
    }
}

// ---------------------------------------------------------------------------
// Private address guard
// ---------------------------------------------------------------------------

/// Refuse URLs that are not http(s) or whose host points at an internal address.
///
/// Domain names are resolved and every returned address must be public.
async fn ensure_public_target(url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(url).map_err(|e| AppError::HttpError(format!("Invalid URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(AppError::HttpError(format!(
            "URL scheme '{}' is not allowed (only http/https)",
            parsed.scheme()
        )));
    }

    let port = parsed.port_or_known_default().unwrap_or(80);
    let addrs: Vec<IpAddr> = match parsed.host() {
        Some(Host::Ipv4(v4)) => vec![IpAddr::V4(v4)],
        Some(Host::Ipv6(v6)) => vec![IpAddr::V6(v6)],
        Some(Host::Domain(domain)) => tokio::net::lookup_host((domain, port))
            .await
            .map_err(|e| AppError::NetworkError(format!("DNS resolution failed for {domain}: {e}")))?
            .map(|addr| addr.ip())
            .collect(),
        None => return Err(AppError::HttpError("URL has no host".to_string())),
    };

    if addrs.is_empty() {
        return Err(AppError::NetworkError(format!(
            "DNS resolution returned no addresses for {url}"
        )));
    }

    match addrs.into_iter().find(|ip| is_internal(*ip)) {
        Some(ip) => Err(AppError::HttpError(format!(
            "SSRF blocked: {url} resolves to private/reserved IP {ip}"
        ))),
        None => Ok(()),
    }
}

fn is_internal(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_internal_v4(v4),
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => is_internal_v4(v4),
            None => {
                let first = v6.segments()[0];
                v6.is_loopback()
                    || v6.is_unspecified()
                    || (first & 0xFFC0) == 0xFE80 // fe80::/10
                    || (first & 0xFE00) == 0xFC00 // fc00::/7
            }
        },
    }
}

fn is_internal_v4(v4: Ipv4Addr) -> bool {
    let [a, b, ..] = v4.octets();
    v4.is_loopback()
        || v4.is_private()
        || v4.is_link_local()
        || v4.is_unspecified()
        || v4.is_broadcast()
        || v4.is_documentation()
        || (a == 100 && (b & 0xC0) == 64) // 100.64.0.0/10
}
