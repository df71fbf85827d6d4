use super::{GuardContext, GuardResult, NavigationGuard};
use crate::error::GuardRejectionKind;
use crate::notify::{Notifier, NotifyLevel};
use crate::session::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Baseline capability required when a route asks for auth but names none.
const DEFAULT_CAPABILITY: &str = "basic";

/// Gate for the route's required capability.
///
/// Runs after [`AuthGuard`](super::AuthGuard), so an established session can
/// be assumed for auth-requiring routes; a missing capability is an
/// authorization problem, not an authentication one.
pub struct PermissionGuard {
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    home: String,
}

impl PermissionGuard {
    #[must_use]
    pub fn new(session: Arc<SessionStore>, notifier: Arc<dyn Notifier>, home: impl Into<String>) -> Self {
        Self {
            session,
            notifier,
            home: home.into(),
        }
    }
}

#[async_trait]
impl NavigationGuard for PermissionGuard {
    fn name(&self) -> &'static str {
        "permission"
    }

    async fn check(&self, ctx: &GuardContext<'_>) -> GuardResult {
        if !ctx.to_meta.requires_auth {
            return GuardResult::Proceed;
        }

        let capability = ctx.to_meta.capability.unwrap_or(DEFAULT_CAPABILITY);
        if !self.session.has_capability(capability) {
            tracing::warn!(
                guard = self.name(),
                rejection = GuardRejectionKind::Permission.as_str(),
                to = %ctx.nav.to_path,
                capability,
                "capability missing"
            );
            self.notifier.transient(
                NotifyLevel::Error,
                "You do not have access to this page",
                Duration::from_secs(3),
            );
            return GuardResult::Redirect(self.home.clone());
        }

        GuardResult::Proceed
    }
}
