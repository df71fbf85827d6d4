//! Page-controller lifecycle and deferred view resolution.

use crate::context::NavigationContext;
use crate::error::NavError;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::Arc;

/// The mounted unit of UI/behavior for one route instance.
///
/// A controller owns its visual resources and any per-page platform
/// registrations (primary-action callbacks and the like). Ownership is
/// exclusive and non-overlapping in time: `destroy` runs — and must release
/// everything, chrome registrations included — before the next controller is
/// created. A controller that leaves a callback registered after `destroy`
/// is the resource-leak bug class this design exists to rule out.
#[async_trait]
pub trait PageController: Send {
    /// Construct and render the page for the matched navigation.
    async fn mount(&mut self, ctx: &NavigationContext) -> Result<(), NavError>;

    /// Release resources and deregister platform callbacks.
    fn destroy(&mut self);
}

/// A lazily resolved view: the navigation-time unit of code loading.
pub struct ViewModule {
    name: &'static str,
    controller: Box<dyn PageController>,
}

impl ViewModule {
    #[must_use]
    pub fn new(name: &'static str, controller: Box<dyn PageController>) -> Self {
        Self { name, controller }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn into_controller(self) -> Box<dyn PageController> {
        self.controller
    }
}

/// Future returned by a view loader.
pub type LoadFuture = BoxFuture<'static, Result<ViewModule, NavError>>;

/// Deferred module resolution: invoked at most once per navigation attempt,
/// only after every guard has passed.
pub type ViewLoader = Arc<dyn Fn() -> LoadFuture + Send + Sync>;

/// Wrap an async closure as a [`ViewLoader`].
pub fn view_loader<F, Fut>(f: F) -> ViewLoader
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ViewModule, NavError>> + Send + 'static,
{
    Arc::new(move || -> LoadFuture { Box::pin(f()) })
}
