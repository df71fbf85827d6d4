#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Typed Simlink API wrappers
//!
//! Thin delegation over the shared [`DataClient`](simkit_http::DataClient):
//! one module per backend resource, DTOs for the wire payloads, plus the two
//! collaborators the navigation core needs wired in — the route preloader
//! and the session backend. No caching, retry or coalescing logic lives
//! here; that is all the client's job.

pub mod esim;
pub mod orders;
mod preload;
pub mod products;
pub mod regions;
mod session;
pub mod system;
pub mod types;
pub mod user;
pub mod wallet;

pub use preload::ApiPreloader;
pub use session::MiniappSessionBackend;

use serde::de::DeserializeOwned;
use serde_json::Value;
use simkit_http::ApiError;
use std::sync::Arc;

/// Decode a client payload into a DTO.
pub(crate) fn decode<T: DeserializeOwned>(value: Arc<Value>) -> Result<T, ApiError> {
    serde_json::from_value((*value).clone())
        .map_err(|e| ApiError::Protocol(format!("unexpected payload shape: {e}")))
}

/// Same, for mutating-verb payloads (owned values).
pub(crate) fn decode_owned<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value)
        .map_err(|e| ApiError::Protocol(format!("unexpected payload shape: {e}")))
}
