//! URL parsing and canonicalisation.
//!
//! Submitted URLs are stored in one canonical form so that resubmitting the
//! same destination with different host casing or an explicit default port is
//! recognised as a duplicate.

use url::Url;

/// Longest URL accepted for shortening.
pub const MAX_URL_LENGTH: usize = 2083;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL exceeds maximum length of {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// A parsed, canonical URL together with its lower-cased host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedUrl {
    pub url: String,
    pub host: String,
}

/// Normalizes a URL to a canonical form.
///
/// # Normalization Rules
///
/// 1. **Protocol**: Only HTTP and HTTPS are allowed
/// 2. **Hostname**: Converted to lowercase, must be present
/// 3. **Default ports**: Removed (80 for HTTP, 443 for HTTPS)
/// 4. **Empty path**: Becomes `/`
/// 5. **Path, query and fragment**: Preserved as-is
///
/// # Errors
///
/// Returns [`UrlNormalizationError::TooLong`] for inputs over [`MAX_URL_LENGTH`].
/// Returns [`UrlNormalizationError::InvalidFormat`] for malformed URLs.
/// Returns [`UrlNormalizationError::UnsupportedProtocol`] for non-HTTP(S) schemes.
/// Returns [`UrlNormalizationError::MissingHost`] when no host is present.
pub fn normalize_url(input: &str) -> Result<NormalizedUrl, UrlNormalizationError> {
    let input = input.trim();
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    let url = Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or(UrlNormalizationError::MissingHost)?
        .to_ascii_lowercase();

    Ok(NormalizedUrl {
        url: url.to_string(),
        host,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_simple_https() {
        let result = normalize_url("https://example.com").unwrap();
        assert_eq!(result.url, "https://example.com/");
        assert_eq!(result.host, "example.com");
    }

    #[test]
    fn test_normalize_canonical_url_unchanged() {
        let result = normalize_url("https://example.com/page").unwrap();
        assert_eq!(result.url, "https://example.com/page");
    }

    #[test]
    fn test_normalize_uppercase_host() {
        let result = normalize_url("https://EXAMPLE.COM/Path").unwrap();
        assert_eq!(result.url, "https://example.com/Path");
        assert_eq!(result.host, "example.com");
    }

    #[test]
    fn test_normalize_remove_default_https_port() {
        let result = normalize_url("https://example.com:443/path").unwrap();
        assert_eq!(result.url, "https://example.com/path");
    }

    #[test]
    fn test_normalize_remove_default_http_port() {
        let result = normalize_url("http://example.com:80/path").unwrap();
        assert_eq!(result.url, "http://example.com/path");
    }

    #[test]
    fn test_normalize_keep_custom_port() {
        let result = normalize_url("http://example.com:8080/path").unwrap();
        assert_eq!(result.url, "http://example.com:8080/path");
        assert_eq!(result.host, "example.com");
    }

    #[test]
    fn test_normalize_keeps_query_and_fragment() {
        let result = normalize_url("https://example.com/page?key=value#section").unwrap();
        assert_eq!(result.url, "https://example.com/page?key=value#section");
    }

    #[test]
    fn test_normalize_trims_whitespace() {
        let result = normalize_url("  https://example.com/a  ").unwrap();
        assert_eq!(result.url, "https://example.com/a");
    }

    #[test]
    fn test_normalize_ip_address() {
        let result = normalize_url("http://192.168.1.1:8080/api").unwrap();
        assert_eq!(result.host, "192.168.1.1");
    }

    #[test]
    fn test_normalize_ipv6_host() {
        let result = normalize_url("http://[::1]:8080/").unwrap();
        assert_eq!(result.host, "[::1]");
    }

    #[test]
    fn test_normalize_invalid_url() {
        assert!(matches!(
            normalize_url("not a valid url").unwrap_err(),
            UrlNormalizationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_normalize_no_protocol() {
        assert!(matches!(
            normalize_url("example.com").unwrap_err(),
            UrlNormalizationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_normalize_empty_string() {
        assert!(matches!(
            normalize_url("").unwrap_err(),
            UrlNormalizationError::InvalidFormat(_)
        ));
    }

    #[test]
    fn test_normalize_ftp_protocol() {
        assert!(matches!(
            normalize_url("ftp://example.com/file.txt").unwrap_err(),
            UrlNormalizationError::UnsupportedProtocol
        ));
    }

    #[test]
    fn test_normalize_javascript_protocol() {
        assert!(matches!(
            normalize_url("javascript:alert('xss')").unwrap_err(),
            UrlNormalizationError::UnsupportedProtocol
        ));
    }

    #[test]
    fn test_normalize_too_long() {
        let url = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(matches!(
            normalize_url(&url).unwrap_err(),
            UrlNormalizationError::TooLong
        ));
    }

    #[test]
    fn test_normalize_long_but_allowed() {
        let url = format!("https://example.com/{}", "a".repeat(2000));
        assert!(normalize_url(&url).is_ok());
    }
}
