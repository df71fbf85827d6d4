//! The guard chain.
//!
//! Guards run strictly in declaration order for every navigation attempt;
//! the first `Redirect` or `Abort` stops the chain. Rejections are normal
//! control flow: a redirect plus a notification, never an error.
//!
//! Target order: auth → permission → preload → network.

mod auth;
mod network;
mod permission;
mod preload;

pub use auth::AuthGuard;
pub use network::NetworkGuard;
pub use permission::PermissionGuard;
pub use preload::{PreloadGuard, Preloader};

use crate::context::NavigationContext;
use crate::notify::Notifier;
use crate::route::RouteMeta;
use crate::session::SessionStore;
use crate::state::Connectivity;
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of one guard. A guard returns exactly one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardResult {
    /// Continue with the next guard (or proceed to loading)
    Proceed,
    /// Stop the chain and navigate to the given target instead
    Redirect(String),
    /// Stop the chain and stay on the current route
    Abort,
}

/// What a guard can see about the attempt.
pub struct GuardContext<'a> {
    pub nav: &'a NavigationContext,
    pub to_meta: &'a RouteMeta,
    /// Metadata of the currently mounted route, when one is mounted and
    /// still present in the table
    pub from_meta: Option<&'a RouteMeta>,
}

/// An asynchronous predicate/side-effect gating a navigation attempt.
#[async_trait]
pub trait NavigationGuard: Send + Sync {
    fn name(&self) -> &'static str;

    async fn check(&self, ctx: &GuardContext<'_>) -> GuardResult;
}

/// The full guard chain in its target order:
/// auth → permission → preload → network.
///
/// A route with no preload declared and an online host degrades to the
/// legacy two-guard behavior for free.
#[must_use]
pub fn standard_guards(
    session: &Arc<SessionStore>,
    preloader: Arc<dyn Preloader>,
    connectivity: Arc<Connectivity>,
    notifier: &Arc<dyn Notifier>,
    home: &str,
) -> Vec<Arc<dyn NavigationGuard>> {
    vec![
        Arc::new(AuthGuard::new(
            Arc::clone(session),
            Arc::clone(notifier),
            home,
        )),
        Arc::new(PermissionGuard::new(
            Arc::clone(session),
            Arc::clone(notifier),
            home,
        )),
        Arc::new(PreloadGuard::new(preloader, Arc::clone(notifier))),
        Arc::new(NetworkGuard::new(connectivity, Arc::clone(notifier), home)),
    ]
}
