//! System endpoints.

use crate::decode;
use crate::types::Health;
use simkit_http::{ApiError, DataClient, GetOptions, Params};

/// Health check. Never served from cache — a stale "ok" is worse than no
/// answer.
///
/// # Errors
/// Propagates the client's typed failure, or `Protocol` on payload mismatch.
pub async fn health(client: &DataClient) -> Result<Health, ApiError> {
    decode(
        client
            .get_with("/system/health", &Params::new(), GetOptions::no_cache())
            .await?,
    )
}
