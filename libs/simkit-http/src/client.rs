use crate::builder::DataClientBuilder;
use crate::cache::CacheStore;
use crate::coalesce::RequestCoalescer;
use crate::config::RetryConfig;
use crate::error::ApiError;
use crate::retry::send_with_retry;
use crate::transport::Transport;
use http::Method;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Flat string-keyed request parameters.
///
/// A `BTreeMap` keeps the serialized query string canonical (key-sorted), so
/// equivalent parameter sets always produce the same cache/coalescing key.
pub type Params = BTreeMap<String, String>;

/// Per-call options for [`DataClient::get_with`].
#[derive(Debug, Clone, Copy)]
pub struct GetOptions {
    /// Serve a live cached value without touching the network (default: true)
    pub use_cache: bool,
    /// TTL for the stored response; `None` uses the client default
    pub ttl: Option<Duration>,
}

impl Default for GetOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            ttl: None,
        }
    }
}

impl GetOptions {
    /// Skip the cache read; the fetched value still refreshes the store.
    #[must_use]
    pub fn no_cache() -> Self {
        Self {
            use_cache: false,
            ..Default::default()
        }
    }

    /// Default options with an explicit TTL.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            use_cache: true,
            ttl: Some(ttl),
        }
    }
}

/// The single entry point for all feature call-sites.
///
/// GETs are cached with TTL and coalesced per canonical key: every concurrent
/// caller sharing one physical call observes the exact same resolved value
/// (the same `Arc`) or the exact same failure, and at most one network call
/// is in flight per key at any instant. Mutating verbs never touch the cache
/// or the coalescer. All verbs go through the linear-backoff retry policy,
/// which only re-attempts no-response and 5xx failures.
///
/// There is deliberately no alternate code path around the cache/coalescer
/// for GETs — that is the whole discipline the shared maps require.
///
/// # Example
///
/// ```ignore
/// let client = DataClient::builder()
///     .base_url("https://api.simlink.app/api")
///     .build()?;
///
/// let products = client.get("/products", &Params::new()).await?;
/// ```
pub struct DataClient {
    transport: Transport,
    retry: RetryConfig,
    cache: Arc<CacheStore<Arc<Value>>>,
    inflight: RequestCoalescer<Arc<Value>, ApiError>,
    default_ttl: Duration,
}

impl DataClient {
    /// Create a builder for configuring the client
    #[must_use]
    pub fn builder() -> DataClientBuilder {
        DataClientBuilder::new()
    }

    pub(crate) fn from_parts(
        transport: Transport,
        retry: RetryConfig,
        default_ttl: Duration,
    ) -> Self {
        Self {
            transport,
            retry,
            cache: Arc::new(CacheStore::new()),
            inflight: RequestCoalescer::new(),
            default_ttl,
        }
    }

    /// GET with default options (cache read enabled, default TTL).
    ///
    /// # Errors
    /// Returns the typed transport failure after retries are exhausted.
    pub async fn get(&self, path: &str, params: &Params) -> Result<Arc<Value>, ApiError> {
        self.get_with(path, params, GetOptions::default()).await
    }

    /// GET with explicit cache options.
    ///
    /// # Errors
    /// Returns the typed transport failure after retries are exhausted.
    pub async fn get_with(
        &self,
        path: &str,
        params: &Params,
        options: GetOptions,
    ) -> Result<Arc<Value>, ApiError> {
        let query = canonical_query(path, params)?;
        let key = cache_key(path, &query);

        if options.use_cache {
            if let Some(hit) = self.cache.get(&key) {
                tracing::trace!(key = %key, "cache hit");
                return Ok(hit);
            }
        }

        let ttl = options.ttl.unwrap_or(self.default_ttl);
        let transport = self.transport.clone();
        let retry = self.retry.clone();
        let cache = Arc::clone(&self.cache);
        let store_key = key.clone();
        let owned_path = path.to_owned();

        self.inflight
            .run(&key, move || async move {
                let value = send_with_retry(
                    &transport,
                    &retry,
                    Method::GET,
                    &owned_path,
                    Some(&query),
                    None,
                )
                .await?;
                let value = Arc::new(value);
                cache.set(&store_key, Arc::clone(&value), ttl);
                Ok(value)
            })
            .await
    }

    /// POST with a JSON body. Never cached, never coalesced.
    ///
    /// # Errors
    /// Returns the typed transport failure after retries are exhausted.
    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// PUT with a JSON body. Never cached, never coalesced.
    ///
    /// # Errors
    /// Returns the typed transport failure after retries are exhausted.
    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// PATCH with a JSON body. Never cached, never coalesced.
    ///
    /// # Errors
    /// Returns the typed transport failure after retries are exhausted.
    pub async fn patch(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.send(Method::PATCH, path, Some(body)).await
    }

    /// DELETE. Never cached, never coalesced.
    ///
    /// # Errors
    /// Returns the typed transport failure after retries are exhausted.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.send(Method::DELETE, path, None).await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        send_with_retry(&self.transport, &self.retry, method, path, None, body).await
    }

    /// Drop the cached response for one GET key.
    ///
    /// # Errors
    /// Returns `InvalidUri` if the parameters cannot be serialized.
    pub fn invalidate(&self, path: &str, params: &Params) -> Result<(), ApiError> {
        let query = canonical_query(path, params)?;
        self.cache.invalidate(&cache_key(path, &query));
        Ok(())
    }

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
    }

    /// Number of in-flight coalesced GETs (diagnostics).
    #[must_use]
    pub fn inflight_len(&self) -> usize {
        self.inflight.inflight_len()
    }
}

fn canonical_query(path: &str, params: &Params) -> Result<String, ApiError> {
    serde_urlencoded::to_string(params).map_err(|e| ApiError::InvalidUri {
        url: path.to_owned(),
        reason: format!("failed to encode query parameters: {e}"),
    })
}

fn cache_key(path: &str, canonical_query: &str) -> String {
    format!("GET {path}?{canonical_query}")
}
