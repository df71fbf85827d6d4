use super::{GuardContext, GuardResult, NavigationGuard};
use crate::error::GuardRejectionKind;
use crate::notify::{Notifier, NotifyLevel};
use crate::session::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Gate for routes that require an established session.
///
/// Makes one session-establish attempt when the session is missing. Failure
/// redirects home with a persistent notification — the user has to reopen
/// the app with fresh init data to recover.
pub struct AuthGuard {
    session: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    home: String,
}

impl AuthGuard {
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
impl NavigationGuard for AuthGuard {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn check(&self, ctx: &GuardContext<'_>) -> GuardResult {
        if !ctx.to_meta.requires_auth {
            return GuardResult::Proceed;
        }

        if !self.session.is_established() {
            if let Err(err) = self.session.establish().await {
                tracing::warn!(
                    guard = self.name(),
                    rejection = GuardRejectionKind::Auth.as_str(),
                    to = %ctx.nav.to_path,
                    error = %err,
                    "session establishment failed"
                );
                self.notifier.persistent(
                    NotifyLevel::Error,
                    "Authentication failed, please reopen the app",
                );
                return GuardResult::Redirect(self.home.clone());
            }
        }

        // The session store is shared; re-check in case it was cleared while
        // establishment resolved.
        if !self.session.is_established() {
            tracing::warn!(guard = self.name(), to = %ctx.nav.to_path, "still unauthenticated");
            self.notifier.transient(
                NotifyLevel::Warning,
                "Please complete sign-in first",
                Duration::from_secs(3),
            );
            return GuardResult::Redirect(self.home.clone());
        }

        GuardResult::Proceed
    }
}
