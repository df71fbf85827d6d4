#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Data-access core for the Simlink mini-app
//!
//! This crate provides the single HTTP entry point every feature call-site
//! uses:
//! - Typed error classification (network / timeout / status / protocol /
//!   backend rejection)
//! - Linear-backoff retry for transient failures only
//! - TTL cache for GET responses
//! - In-flight request coalescing per canonical key
//! - Context headers (opaque auth init data, anti-replay timestamp)
//! - Both observed response-envelope conventions, selected by config
//!
//! # Example
//!
//! ```ignore
//! use simkit_http::{DataClient, Params};
//!
//! let client = DataClient::builder()
//!     .base_url("https://api.simlink.app/api")
//!     .build()?;
//!
//! let mut params = Params::new();
//! params.insert("type".into(), "all".into());
//!
//! // Cached + coalesced; concurrent identical calls share one request.
//! let products = client.get("/products", &params).await?;
//! ```

mod builder;
mod cache;
mod client;
mod coalesce;
mod config;
mod envelope;
mod error;
mod retry;
pub mod security;
mod transport;

pub use builder::DataClientBuilder;
pub use cache::CacheStore;
pub use client::{DataClient, GetOptions, Params};
pub use coalesce::RequestCoalescer;
pub use config::{
    DEFAULT_CACHE_TTL, DEFAULT_USER_AGENT, DataClientConfig, EnvelopeStyle, RetryConfig,
    TransportSecurity,
};
pub use error::ApiError;
pub use security::{AuthContext, NoAuth, SharedAuthContext, StaticInitData};
