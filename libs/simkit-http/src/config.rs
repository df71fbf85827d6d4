use std::time::Duration;

/// Default User-Agent string for outbound requests
pub const DEFAULT_USER_AGENT: &str = concat!("simkit-http/", env!("CARGO_PKG_VERSION"));

/// Default TTL for cached GET responses (5 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Retry policy with linear backoff.
///
/// A transient failure (no response, attempt timeout, 5xx) is re-attempted
/// until `max_attempts` total calls have been made; the delay before retry
/// *n* (1-based) is `base_delay * n`. The final error is surfaced unchanged
/// in kind — retry suppresses attempts, never the outcome.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total number of calls, including the initial attempt (default: 3)
    pub max_attempts: usize,

    /// Base delay for the linear backoff ramp (default: 1s)
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryConfig {
    /// Create config with no retries (single attempt)
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// Create fast backoff for testing (1ms base)
    #[must_use]
    pub fn fast() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    /// Delay to apply after `completed_attempts` calls have failed.
    #[must_use]
    pub fn backoff_for(&self, completed_attempts: usize) -> Duration {
        self.base_delay
            .saturating_mul(u32::try_from(completed_attempts).unwrap_or(u32::MAX))
    }
}

/// Response envelope convention used by the backend.
///
/// Both shapes exist in the wild; the style is configured per client rather
/// than sniffed per response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum EnvelopeStyle {
    /// `{code, message, data}` — `code == 0` is success and yields `data`;
    /// any other code is a backend rejection.
    #[default]
    Coded,
    /// Plain HTTP statuses: 2xx yields the body (or its `data` field when
    /// present); error bodies carry `{message}` or `{error}`.
    Plain,
}

/// Transport security configuration
///
/// Controls whether the client enforces TLS or allows insecure HTTP.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportSecurity {
    /// Require TLS for all connections (HTTPS only) - default and recommended
    #[default]
    TlsOnly,
    /// Allow insecure HTTP connections (for testing with mock servers only)
    AllowInsecureHttp,
}

/// Overall data-client configuration
#[derive(Debug, Clone)]
pub struct DataClientConfig {
    /// Base URL every request path is resolved against (no trailing slash)
    pub base_url: String,

    /// Per-attempt timeout enforced by the transport itself (default: 10s).
    /// Independent of retry backoff; each retry attempt gets its own timeout.
    pub request_timeout: Duration,

    /// Retry policy (linear backoff)
    pub retry: RetryConfig,

    /// Response envelope convention (default: `Coded`)
    pub envelope: EnvelopeStyle,

    /// Default TTL for cached GET responses (default: 5 minutes)
    pub default_ttl: Duration,

    /// User-Agent header value
    pub user_agent: String,

    /// Transport security mode (default: `TlsOnly`)
    pub transport: TransportSecurity,
}

impl Default for DataClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout: Duration::from_secs(10),
            retry: RetryConfig::default(),
            envelope: EnvelopeStyle::default(),
            default_ttl: DEFAULT_CACHE_TTL,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            transport: TransportSecurity::TlsOnly,
        }
    }
}

impl DataClientConfig {
    /// Create configuration for testing with mock servers (allows insecure
    /// HTTP, no retries, fast timeouts).
    ///
    /// **WARNING**: never use in production; traffic is not encrypted.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            request_timeout: Duration::from_secs(5),
            retry: RetryConfig::disabled(),
            transport: TransportSecurity::AllowInsecureHttp,
            ..Default::default()
        }
    }
}
