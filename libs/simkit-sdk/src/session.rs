//! Session establishment against the mini-app auth endpoint.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use simkit_http::DataClient;
use simkit_nav::{Session, SessionBackend, SessionError};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct SessionPayload {
    user_id: String,
    #[serde(default)]
    capabilities: Vec<String>,
}

/// Establishes a session by letting the backend verify the init-data header
/// the transport already attaches to every request.
pub struct MiniappSessionBackend {
    client: Arc<DataClient>,
}

impl MiniappSessionBackend {
    #[must_use]
    pub fn new(client: Arc<DataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SessionBackend for MiniappSessionBackend {
    async fn establish(&self) -> Result<Session, SessionError> {
        let value = self
            .client
            .post("/auth/session", &json!({}))
            .await
            .map_err(|e| SessionError::Establish(e.to_string()))?;

        let payload: SessionPayload = serde_json::from_value(value)
            .map_err(|e| SessionError::Establish(format!("unexpected session payload: {e}")))?;

        let mut capabilities: HashSet<String> = payload.capabilities.into_iter().collect();
        // Every verified user holds the baseline capability.
        capabilities.insert("basic".to_owned());

        Ok(Session {
            user_id: payload.user_id,
            capabilities,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::testutil::client_for;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_establish_builds_session() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/session");
            then.status(200).json_body(json!({
                "code": 0,
                "data": {"user_id": "u42", "capabilities": ["wallet"]}
            }));
        });

        let backend = MiniappSessionBackend::new(Arc::new(client_for(&server)));
        let session = backend.establish().await.unwrap();
        assert_eq!(session.user_id, "u42");
        assert!(session.capabilities.contains("basic"));
        assert!(session.capabilities.contains("wallet"));
    }

    #[tokio::test]
    async fn test_rejected_init_data_is_an_establish_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/auth/session");
            then.status(200)
                .json_body(json!({"code": 401, "message": "invalid init data"}));
        });

        let backend = MiniappSessionBackend::new(Arc::new(client_for(&server)));
        let err = backend.establish().await.unwrap_err();
        assert!(err.to_string().contains("invalid init data"));
    }
}
