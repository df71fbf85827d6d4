//! Route preloading over the typed wrappers.

use crate::{orders, products, wallet};
use anyhow::Context;
use async_trait::async_trait;
use simkit_http::DataClient;
use simkit_nav::{NavigationContext, PreloadKind, Preloader};
use std::sync::Arc;

/// Bridges the navigation core's preload declarations to the API wrappers.
///
/// Fetched data lands in the shared client's cache, so the page controller
/// that mounts right after finds it warm. Failures surface to the
/// `PreloadGuard`, which treats them as non-fatal by design.
pub struct ApiPreloader {
    client: Arc<DataClient>,
}

impl ApiPreloader {
    #[must_use]
    pub fn new(client: Arc<DataClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Preloader for ApiPreloader {
    async fn preload(&self, kind: PreloadKind, ctx: &NavigationContext) -> anyhow::Result<()> {
        tracing::debug!(kind = ?kind, to = %ctx.to_path, "preloading route data");
        match kind {
            PreloadKind::ProductList => {
                products::list(&self.client, products::ProductFilter::default()).await?;
            }
            PreloadKind::ProductById => {
                let id = ctx.param("id").context("route is missing an `id` param")?;
                products::by_id(&self.client, id).await?;
            }
            PreloadKind::OrderList => {
                orders::list(&self.client, orders::OrderFilter::default()).await?;
            }
            PreloadKind::OrderById => {
                let id = ctx.param("id").context("route is missing an `id` param")?;
                orders::by_id(&self.client, id).await?;
            }
            PreloadKind::WalletBalance => {
                wallet::balance(&self.client).await?;
            }
            // `PreloadKind` is `#[non_exhaustive]`; future kinds this SDK does
            // not yet recognize are a best-effort no-op.
            _ => {}
        }
        Ok(())
    }
}
