//! Retry loop with linear backoff.
//!
//! Policy knobs live in [`RetryConfig`](crate::config::RetryConfig);
//! retryability is decided by [`ApiError::is_retryable`]. The loop suppresses
//! attempts only — the last error always surfaces unchanged in kind.

use crate::config::RetryConfig;
use crate::error::ApiError;
use crate::transport::Transport;
use http::Method;
use serde_json::Value;

pub(crate) async fn send_with_retry(
    transport: &Transport,
    retry: &RetryConfig,
    method: Method,
    path: &str,
    query: Option<&str>,
    body: Option<&Value>,
) -> Result<Value, ApiError> {
    let max_attempts = retry.max_attempts.max(1);
    let mut attempt = 1usize;
    loop {
        match transport
            .execute(method.clone(), path, query, body)
            .await
        {
            Ok(value) => return Ok(value),
            Err(err) if attempt < max_attempts && err.is_retryable() => {
                let backoff = retry.backoff_for(attempt);
                tracing::debug!(
                    attempt,
                    max_attempts,
                    method = %method,
                    path,
                    backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "retrying request after transient failure"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
