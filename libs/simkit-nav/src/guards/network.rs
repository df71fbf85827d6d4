use super::{GuardContext, GuardResult, NavigationGuard};
use crate::error::GuardRejectionKind;
use crate::notify::{Notifier, NotifyLevel};
use crate::state::Connectivity;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Gate for offline navigation.
///
/// While offline, only routes declared `offline_safe` are reachable. If the
/// currently mounted route is itself offline-safe the attempt is aborted in
/// place; otherwise the user is sent home.
pub struct NetworkGuard {
    connectivity: Arc<Connectivity>,
    notifier: Arc<dyn Notifier>,
    home: String,
}

impl NetworkGuard {
    #[must_use]
    pub fn new(
        connectivity: Arc<Connectivity>,
        notifier: Arc<dyn Notifier>,
        home: impl Into<String>,
    ) -> Self {
        Self {
            connectivity,
            notifier,
            home: home.into(),
        }
    }
}

#[async_trait]
impl NavigationGuard for NetworkGuard {
    fn name(&self) -> &'static str {
        "network"
    }

    async fn check(&self, ctx: &GuardContext<'_>) -> GuardResult {
        if self.connectivity.is_online() || ctx.to_meta.offline_safe {
            return GuardResult::Proceed;
        }

        tracing::warn!(
            guard = self.name(),
            rejection = GuardRejectionKind::Network.as_str(),
            to = %ctx.nav.to_path,
            "offline and target is not offline-safe"
        );
        self.notifier.transient(
            NotifyLevel::Warning,
            "You are offline; this page needs a connection",
            Duration::from_secs(3),
        );

        let current_is_safe = ctx.from_meta.is_some_and(|meta| meta.offline_safe);
        if current_is_safe {
            GuardResult::Abort
        } else {
            GuardResult::Redirect(self.home.clone())
        }
    }
}
