//! Single-attempt HTTP execution.
//!
//! The transport owns the hyper client, attaches the context headers
//! (auth init data, anti-replay timestamp) and classifies every outcome
//! into a typed [`ApiError`]. Retries, caching and coalescing live above
//! it in [`DataClient`](crate::DataClient).

use crate::config::{DataClientConfig, EnvelopeStyle, TransportSecurity};
use crate::envelope;
use crate::error::ApiError;
use crate::security::{INIT_DATA_HEADER, REQUEST_TIME_HEADER, SharedAuthContext};
use bytes::Bytes;
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::{HeaderValue, Method, Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

type HyperClient = Client<HttpsConnector<HttpConnector>, Full<Bytes>>;

fn application_json() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

/// Performs one HTTP request per call; no retry, no caching.
#[derive(Clone)]
pub(crate) struct Transport {
    client: HyperClient,
    base_url: String,
    request_timeout: Duration,
    envelope: EnvelopeStyle,
    transport_security: TransportSecurity,
    auth: SharedAuthContext,
    user_agent: HeaderValue,
}

impl Transport {
    pub(crate) fn new(
        config: &DataClientConfig,
        auth: SharedAuthContext,
    ) -> Result<Self, ApiError> {
        if config.base_url.is_empty() {
            return Err(ApiError::InvalidUri {
                url: String::new(),
                reason: "base URL is required".to_owned(),
            });
        }

        let user_agent =
            HeaderValue::try_from(config.user_agent.as_str()).map_err(|_| {
                ApiError::InvalidHeader {
                    name: USER_AGENT.as_str().to_owned(),
                }
            })?;

        let https = build_https_connector(config.transport)?;
        let client = Client::builder(TokioExecutor::new()).build::<_, Full<Bytes>>(https);

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            request_timeout: config.request_timeout,
            envelope: config.envelope,
            transport_security: config.transport,
            auth,
            user_agent,
        })
    }

    /// Execute a single attempt and decode the response envelope.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = self.assemble_url(path, query);
        let uri = self.validate_uri(&url)?;

        tracing::debug!(method = %method, url = %url, "sending request");

        let request = self.build_request(method, uri, &url, body)?;

        let response = match tokio::time::timeout(
            self.request_timeout,
            self.client.request(request),
        )
        .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(ApiError::Network(e.to_string())),
            Err(_) => return Err(ApiError::Timeout(self.request_timeout)),
        };

        let (parts, body) = response.into_parts();
        let bytes = body
            .collect()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read response body: {e}")))?
            .to_bytes();

        envelope::decode(self.envelope, parts.status, &bytes)
    }

    fn assemble_url(&self, path: &str, query: Option<&str>) -> String {
        match query {
            Some(query) if !query.is_empty() => format!("{}{path}?{query}", self.base_url),
            _ => format!("{}{path}", self.base_url),
        }
    }

    fn validate_uri(&self, url: &str) -> Result<Uri, ApiError> {
        let uri = Uri::try_from(url).map_err(|e| ApiError::InvalidUri {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        let Some(scheme) = uri.scheme_str() else {
            return Err(ApiError::InvalidUri {
                url: url.to_owned(),
                reason: "URL must be absolute with a scheme".to_owned(),
            });
        };
        if uri.authority().is_none() {
            return Err(ApiError::InvalidUri {
                url: url.to_owned(),
                reason: "URL must include a host".to_owned(),
            });
        }
        if scheme == "http" && self.transport_security == TransportSecurity::TlsOnly {
            return Err(ApiError::InvalidUri {
                url: url.to_owned(),
                reason: "plain HTTP is not allowed (TransportSecurity::TlsOnly)".to_owned(),
            });
        }

        Ok(uri)
    }

    fn build_request(
        &self,
        method: Method,
        uri: Uri,
        url: &str,
        body: Option<&Value>,
    ) -> Result<Request<Full<Bytes>>, ApiError> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(ACCEPT, application_json())
            .header(USER_AGENT, self.user_agent.clone())
            .header(
                REQUEST_TIME_HEADER,
                chrono::Utc::now().timestamp_millis().to_string(),
            );

        if let Some(init_data) = self.auth.init_data() {
            let value =
                HeaderValue::try_from(init_data).map_err(|_| ApiError::InvalidHeader {
                    name: INIT_DATA_HEADER.to_owned(),
                })?;
            builder = builder.header(INIT_DATA_HEADER, value);
        }

        let bytes = match body {
            Some(value) => {
                builder = builder.header(CONTENT_TYPE, application_json());
                Bytes::from(value.to_string())
            }
            None => Bytes::new(),
        };

        builder
            .body(Full::new(bytes))
            .map_err(|e| ApiError::InvalidUri {
                url: url.to_owned(),
                reason: e.to_string(),
            })
    }
}

/// Get the crypto provider for TLS connections.
///
/// Uses the globally installed default when present, otherwise a fresh
/// aws-lc-rs provider without installing it globally.
fn crypto_provider() -> Arc<rustls::crypto::CryptoProvider> {
    rustls::crypto::CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::aws_lc_rs::default_provider()))
}

fn build_https_connector(
    transport: TransportSecurity,
) -> Result<HttpsConnector<HttpConnector>, ApiError> {
    let builder = hyper_rustls::HttpsConnectorBuilder::new()
        .with_provider_and_webpki_roots(crypto_provider())
        .map_err(|e| ApiError::Tls(e.to_string()))?;

    let connector = match transport {
        TransportSecurity::AllowInsecureHttp => {
            builder.https_or_http().enable_all_versions().build()
        }
        TransportSecurity::TlsOnly => builder.https_only().enable_all_versions().build(),
    };
    Ok(connector)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::security::NoAuth;
    use http::Method;
    use httpmock::prelude::*;
    use serde_json::json;

    fn test_transport(base_url: &str) -> Transport {
        let config = DataClientConfig {
            base_url: base_url.to_owned(),
            ..DataClientConfig::for_testing()
        };
        Transport::new(&config, Arc::new(NoAuth)).unwrap()
    }

    #[test]
    fn test_requires_base_url() {
        let config = DataClientConfig::for_testing();
        let result = Transport::new(&config, Arc::new(NoAuth));
        assert!(matches!(result, Err(ApiError::InvalidUri { .. })));
    }

    #[test]
    fn test_tls_only_rejects_http_urls() {
        let config = DataClientConfig {
            base_url: "http://api.example.com".to_owned(),
            ..DataClientConfig::default()
        };
        let transport = Transport::new(&config, Arc::new(NoAuth)).unwrap();
        let result = transport.validate_uri("http://api.example.com/products");
        assert!(matches!(result, Err(ApiError::InvalidUri { .. })));
    }

    #[tokio::test]
    async fn test_context_headers_are_attached() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/ping")
                .header("x-init-data", "user=42&hash=beef")
                .header_exists("x-request-time")
                .header_exists("user-agent");
            then.status(200).json_body(json!({"code": 0, "data": "pong"}));
        });

        let config = DataClientConfig {
            base_url: server.base_url(),
            ..DataClientConfig::for_testing()
        };
        let transport = Transport::new(
            &config,
            Arc::new(crate::security::StaticInitData("user=42&hash=beef".to_owned())),
        )
        .unwrap();

        let value = transport
            .execute(Method::GET, "/ping", None, None)
            .await
            .unwrap();
        assert_eq!(value, json!("pong"));
        mock.assert();
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Nothing listens on this port.
        let transport = test_transport("http://127.0.0.1:9");
        let err = transport
            .execute(Method::GET, "/unreachable", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_attempt_timeout_is_enforced() {
        let server = MockServer::start();
        let _slow = server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_millis(500))
                .json_body(json!({"code": 0}));
        });

        let config = DataClientConfig {
            base_url: server.base_url(),
            request_timeout: Duration::from_millis(50),
            ..DataClientConfig::for_testing()
        };
        let transport = Transport::new(&config, Arc::new(NoAuth)).unwrap();

        let err = transport
            .execute(Method::GET, "/slow", None, None)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Timeout(Duration::from_millis(50)));
    }

    #[tokio::test]
    async fn test_body_is_serialized_as_json() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/orders")
                .header("content-type", "application/json")
                .json_body(json!({"product_id": 3}));
            then.status(200)
                .json_body(json!({"code": 0, "data": {"id": 11}}));
        });

        let transport = test_transport(&server.base_url());
        let value = transport
            .execute(Method::POST, "/orders", None, Some(&json!({"product_id": 3})))
            .await
            .unwrap();
        assert_eq!(value, json!({"id": 11}));
        mock.assert();
    }
}
