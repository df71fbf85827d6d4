use super::{GuardContext, GuardResult, NavigationGuard};
use crate::context::NavigationContext;
use crate::notify::{Notifier, NotifyLevel};
use crate::route::PreloadKind;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Feature-specific data prefetcher invoked while entering a route.
///
/// Implementations delegate to the shared data client; timeout semantics are
/// the client's.
#[async_trait]
pub trait Preloader: Send + Sync {
    async fn preload(&self, kind: PreloadKind, ctx: &NavigationContext) -> anyhow::Result<()>;
}

/// Best-effort prefetch of the route's declared data.
///
/// A preload failure never blocks navigation — partial data beats a blocked
/// page — it only raises a short-lived warning.
pub struct PreloadGuard {
    preloader: Arc<dyn Preloader>,
    notifier: Arc<dyn Notifier>,
}

impl PreloadGuard {
    #[must_use]
    pub fn new(preloader: Arc<dyn Preloader>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            preloader,
            notifier,
        }
    }
}

#[async_trait]
impl NavigationGuard for PreloadGuard {
    fn name(&self) -> &'static str {
        "preload"
    }

    async fn check(&self, ctx: &GuardContext<'_>) -> GuardResult {
        let Some(kind) = ctx.to_meta.preload else {
            return GuardResult::Proceed;
        };

        if let Err(err) = self.preloader.preload(kind, ctx.nav).await {
            tracing::warn!(
                guard = self.name(),
                to = %ctx.nav.to_path,
                kind = ?kind,
                error = %err,
                "preload failed; continuing without data"
            );
            self.notifier.transient(
                NotifyLevel::Warning,
                "Some data failed to load",
                Duration::from_secs(4),
            );
        }

        GuardResult::Proceed
    }
}
