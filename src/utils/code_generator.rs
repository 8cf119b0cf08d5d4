//! Short code token generation and shape checks.
//!
//! A short URL is the configured base domain followed by a fixed-length
//! alphanumeric token, e.g. `myurlshortener.live/Xq4Lp0aZ7`.

use rand::Rng;

/// Number of characters in a generated token.
pub const TOKEN_LENGTH: usize = 9;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random 9-character alphanumeric token.
///
/// 62^9 (about 1.35e16) possible tokens; collisions are still possible and are
/// handled by the caller retrying against the store's unique index.
pub fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Joins the base domain and a token into a short URL.
pub fn build_short_url(base_domain: &str, token: &str) -> String {
    format!("{base_domain}{token}")
}

/// Returns the token of `short_url` if it has the shape `<base_domain><token>`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(token_of("sho.rt/", "sho.rt/abcDEF123"), Some("abcDEF123"));
/// assert_eq!(token_of("sho.rt/", "sho.rt/abc"), None);
/// assert_eq!(token_of("sho.rt/", "other.io/abcDEF123"), None);
/// ```
pub fn token_of<'a>(base_domain: &str, short_url: &'a str) -> Option<&'a str> {
    let token = short_url.strip_prefix(base_domain)?;

    if token.len() == TOKEN_LENGTH && token.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Some(token)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_token_has_correct_length() {
        assert_eq!(generate_token().len(), TOKEN_LENGTH);
    }

    #[test]
    fn test_generate_token_alphanumeric() {
        for _ in 0..100 {
            assert!(generate_token().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_token_produces_unique_tokens() {
        let tokens: HashSet<String> = (0..1000).map(|_| generate_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }

    #[test]
    fn test_build_short_url() {
        assert_eq!(
            build_short_url("myurlshortener.live/", "abcDEF123"),
            "myurlshortener.live/abcDEF123"
        );
    }

    #[test]
    fn test_short_url_total_length() {
        let short_url = build_short_url("myurlshortener.live/", &generate_token());
        assert_eq!(short_url.len(), 29);
    }

    #[test]
    fn test_token_of_valid() {
        assert_eq!(
            token_of("myurlshortener.live/", "myurlshortener.live/abcDEF123"),
            Some("abcDEF123")
        );
    }

    #[test]
    fn test_token_of_wrong_prefix() {
        assert_eq!(token_of("myurlshortener.live/", "example.com/abcDEF123"), None);
    }

    #[test]
    fn test_token_of_wrong_length() {
        assert_eq!(token_of("myurlshortener.live/", "myurlshortener.live/abc"), None);
        assert_eq!(
            token_of("myurlshortener.live/", "myurlshortener.live/abcDEF1234"),
            None
        );
    }

    #[test]
    fn test_token_of_rejects_symbols() {
        assert_eq!(
            token_of("myurlshortener.live/", "myurlshortener.live/abc-EF12_"),
            None
        );
    }

    #[test]
    fn test_token_of_empty() {
        assert_eq!(token_of("myurlshortener.live/", ""), None);
    }
}
