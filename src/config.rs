//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//! Nothing here is global: the short-link policy is handed to the services as a
//! [`ShortLinkSettings`] value at construction time.
//!
//! ## Variables
//!
//! - `DATABASE_URL` - SQLite connection string (default: `sqlite://shortlink.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BASE_DOMAIN` - Prefix of generated short URLs (default: `myurlshortener.live/`)
//! - `DEFAULT_EXPIRY_DAYS` / `MIN_EXPIRY_DAYS` / `MAX_EXPIRY_DAYS` - Expiry policy
//!   (default: 365 / 1 / 1825)
//! - `CODE_MAX_ATTEMPTS` - Short code collision retries (default: 5)
//! - `DNS_TIMEOUT_MS` - Host name lookup timeout (default: 2000)
//! - `DB_MAX_CONNECTIONS` / `DB_CONNECT_TIMEOUT` - Pool settings (default: 5 / 30s)

use anyhow::Result;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_DOMAIN: &str = "myurlshortener.live/";
pub const DEFAULT_EXPIRY_DAYS: i64 = 365;
pub const MIN_EXPIRY_DAYS: i64 = 1;
pub const MAX_EXPIRY_DAYS: i64 = 1825;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub base_domain: String,
    pub default_expiry_days: i64,
    pub min_expiry_days: i64,
    pub max_expiry_days: i64,
    pub code_max_attempts: usize,
    /// Upper bound on a single host name lookup, in milliseconds.
    pub dns_timeout_ms: u64,
    pub db_max_connections: u32,
    /// Timeout for acquiring a pooled connection, in seconds.
    pub db_connect_timeout: u64,
}

/// Lifetime bounds applied to new short links, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    pub default_days: i64,
    pub min_days: i64,
    pub max_days: i64,
}

impl ExpiryPolicy {
    /// Returns the requested lifetime, or the default when none was given.
    ///
    /// Out-of-range values are rejected rather than clamped; `Err` carries the
    /// offending value.
    pub fn resolve(&self, requested: Option<i64>) -> Result<i64, i64> {
        let days = requested.unwrap_or(self.default_days);
        if (self.min_days..=self.max_days).contains(&days) {
            Ok(days)
        } else {
            Err(days)
        }
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self {
            default_days: DEFAULT_EXPIRY_DAYS,
            min_days: MIN_EXPIRY_DAYS,
            max_days: MAX_EXPIRY_DAYS,
        }
    }
}

/// Short-link policy shared by the validator and the services.
#[derive(Debug, Clone)]
pub struct ShortLinkSettings {
    /// Prefix of every short URL, e.g. `myurlshortener.live/`.
    pub base_domain: String,
    pub expiry: ExpiryPolicy,
    pub code_max_attempts: usize,
    pub dns_timeout: Duration,
}

impl ShortLinkSettings {
    /// Host part of the base domain as `url` parses it (`myurlshortener.live`).
    ///
    /// Internationalised names come back punycode-encoded and IPv6 hosts keep
    /// their brackets, matching the host of a normalised candidate URL.
    /// Returns `None` if the base domain has no parseable host.
    pub fn base_host(&self) -> Option<String> {
        parse_base_host(&self.base_domain)
    }
}

fn parse_base_host(base_domain: &str) -> Option<String> {
    let url = Url::parse(&format!("http://{base_domain}")).ok()?;
    url.host_str()
        .filter(|host| !host.is_empty())
        .map(|host| host.trim_end_matches('.').to_ascii_lowercase())
}

impl Default for ShortLinkSettings {
    fn default() -> Self {
        Self {
            base_domain: DEFAULT_BASE_DOMAIN.to_string(),
            expiry: ExpiryPolicy::default(),
            code_max_attempts: 5,
            dns_timeout: Duration::from_millis(2000),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://shortlink.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let base_domain =
            env::var("BASE_DOMAIN").unwrap_or_else(|_| DEFAULT_BASE_DOMAIN.to_string());

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            base_domain,
            default_expiry_days: parse_var("DEFAULT_EXPIRY_DAYS", DEFAULT_EXPIRY_DAYS)?,
            min_expiry_days: parse_var("MIN_EXPIRY_DAYS", MIN_EXPIRY_DAYS)?,
            max_expiry_days: parse_var("MAX_EXPIRY_DAYS", MAX_EXPIRY_DAYS)?,
            code_max_attempts: parse_var("CODE_MAX_ATTEMPTS", 5)?,
            dns_timeout_ms: parse_var("DNS_TIMEOUT_MS", 2000)?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            db_connect_timeout: parse_var("DB_CONNECT_TIMEOUT", 30)?,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - expiry bounds are not ordered `1 <= min <= default <= max`
    /// - `base_domain` is empty, carries a scheme, contains whitespace or has no valid host
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` or `database_url` is malformed
    /// - a retry, timeout or pool setting is zero or out of range
    pub fn validate(&self) -> Result<()> {
        if self.min_expiry_days < 1 {
            anyhow::bail!(
                "MIN_EXPIRY_DAYS must be at least 1, got {}",
                self.min_expiry_days
            );
        }

        if !(self.min_expiry_days..=self.max_expiry_days).contains(&self.default_expiry_days) {
            anyhow::bail!(
                "DEFAULT_EXPIRY_DAYS must lie within [{}, {}], got {}",
                self.min_expiry_days,
                self.max_expiry_days,
                self.default_expiry_days
            );
        }

        if self.base_domain.trim().is_empty() {
            anyhow::bail!("BASE_DOMAIN must not be empty");
        }

        if self.base_domain.contains("://") || self.base_domain.chars().any(char::is_whitespace)
        {
            anyhow::bail!(
                "BASE_DOMAIN must be a bare host prefix like 'sho.rt/', got '{}'",
                self.base_domain
            );
        }

        if parse_base_host(&self.base_domain).is_none() {
            anyhow::bail!(
                "BASE_DOMAIN must start with a valid host, got '{}'",
                self.base_domain
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.code_max_attempts == 0 || self.code_max_attempts > 100 {
            anyhow::bail!(
                "CODE_MAX_ATTEMPTS must be between 1 and 100, got {}",
                self.code_max_attempts
            );
        }

        if self.dns_timeout_ms == 0 {
            anyhow::bail!("DNS_TIMEOUT_MS must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Builds the policy handed to the validator and services.
    pub fn short_link_settings(&self) -> ShortLinkSettings {
        ShortLinkSettings {
            base_domain: self.base_domain.clone(),
            expiry: ExpiryPolicy {
                default_days: self.default_expiry_days,
                min_days: self.min_expiry_days,
                max_days: self.max_expiry_days,
            },
            code_max_attempts: self.code_max_attempts,
            dns_timeout: Duration::from_millis(self.dns_timeout_ms),
        }
    }

    /// Logs the effective configuration once at startup.
    pub fn print_summary(&self) {
        tracing::info!(
            listen = %self.listen_addr,
            database = %describe_database(&self.database_url),
            db_max_connections = self.db_max_connections,
            "Server configuration"
        );
        tracing::info!(
            base_domain = %self.base_domain,
            default_expiry_days = self.default_expiry_days,
            min_expiry_days = self.min_expiry_days,
            max_expiry_days = self.max_expiry_days,
            code_max_attempts = self.code_max_attempts,
            dns_timeout_ms = self.dns_timeout_ms,
            "Short link policy"
        );
        tracing::debug!(level = %self.log_level, format = %self.log_format, "Logging");
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{name} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// Short human-readable form of a SQLite URL: the file path, or `in-memory`.
///
/// Connection parameters after `?` are dropped.
fn describe_database(url: &str) -> String {
    if url.contains(":memory:") {
        return "in-memory".to_string();
    }

    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);

    path.split('?').next().unwrap_or(path).to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
