use crate::client::DataClient;
use crate::config::{DataClientConfig, EnvelopeStyle, RetryConfig, TransportSecurity};
use crate::error::ApiError;
use crate::security::{NoAuth, SharedAuthContext};
use crate::transport::Transport;
use std::sync::Arc;
use std::time::Duration;

/// Builder for constructing a [`DataClient`].
pub struct DataClientBuilder {
    config: DataClientConfig,
    auth: Option<SharedAuthContext>,
}

impl DataClientBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DataClientConfig::default(),
            auth: None,
        }
    }

    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: DataClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the base URL all request paths resolve against
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the per-attempt timeout enforced by the transport
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the retry policy
    #[must_use]
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the response envelope convention
    #[must_use]
    pub fn envelope(mut self, envelope: EnvelopeStyle) -> Self {
        self.config.envelope = envelope;
        self
    }

    /// Set the default TTL for cached GET responses
    #[must_use]
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.config.default_ttl = ttl;
        self
    }

    /// Set the User-Agent header value
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the auth context supplying the init-data header
    #[must_use]
    pub fn auth_context(mut self, auth: SharedAuthContext) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Allow insecure HTTP connections (for testing only)
    ///
    /// **WARNING**: only for local testing with mock servers. Never use in
    /// production as it exposes traffic to interception.
    ///
    /// Only available in debug builds or with the `allow-insecure-http`
    /// feature, so it cannot slip into a release binary by accident.
    #[must_use]
    #[cfg(any(debug_assertions, feature = "allow-insecure-http"))]
    pub fn allow_insecure_http(mut self) -> Self {
        tracing::warn!(
            target: "simkit_http::security",
            "allow_insecure_http() called - HTTP traffic will NOT be encrypted"
        );
        self.config.transport = TransportSecurity::AllowInsecureHttp;
        self
    }

    /// Build the data client.
    ///
    /// # Errors
    /// Returns an error if the base URL is missing, a header value is
    /// malformed, or TLS initialization fails.
    pub fn build(self) -> Result<DataClient, ApiError> {
        if self.config.transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!(
                "insecure HTTP enabled (TransportSecurity::AllowInsecureHttp); \
                 use only for testing with mock servers"
            );
        }

        let auth = self.auth.unwrap_or_else(|| Arc::new(NoAuth));
        let transport = Transport::new(&self.config, auth)?;
        Ok(DataClient::from_parts(
            transport,
            self.config.retry,
            self.config.default_ttl,
        ))
    }
}

impl Default for DataClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
