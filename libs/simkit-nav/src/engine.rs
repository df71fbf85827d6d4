//! The navigation engine.
//!
//! Drives one navigation: match path → run the guard chain → lazily load the
//! view → swap page controllers → post-navigation side effects. Owns
//! cancellation (stale-navigation suppression via a monotonic sequence
//! number) and the error-route fallback.

use crate::chrome::PlatformChrome;
use crate::context::{NavigationContext, RouteParams, parse_query};
use crate::error::NavError;
use crate::guards::{GuardContext, GuardResult, NavigationGuard};
use crate::metrics::NavMetrics;
use crate::page::PageController;
use crate::route::{RouteAction, RouteMeta, RouteTable};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// At most one redirect hop per original request. A second redirect in the
/// same request is treated as a loop and lands on the error route.
const MAX_REDIRECT_HOPS: u8 = 1;

/// Engine state machine phases (observability only; transitions are driven
/// by [`NavigationEngine::navigate`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Matching,
    GuardEvaluation,
    Loading,
    Mounting,
    Mounted,
    RedirectPending,
    Aborted,
}

/// How a navigation request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The target view is mounted
    Mounted { path: String },
    /// A guard kept the previous view in place
    Aborted,
    /// A newer navigation started; this one was silently discarded
    Superseded,
    /// The pipeline failed and the error route was mounted instead
    Failed { message: String },
}

/// Engine wiring that is not the route table or the guard chain.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Target guards redirect to (default: `/`)
    pub home_path: String,
    /// Last-resort route for pipeline failures (default: `/error`)
    pub error_path: String,
    /// Suffix appended to route titles (default: `eSIM Mini App`)
    pub app_title: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            home_path: "/".to_owned(),
            error_path: "/error".to_owned(),
            app_title: "eSIM Mini App".to_owned(),
        }
    }
}

struct MountedState {
    controller: Option<Box<dyn PageController>>,
    path: Option<String>,
    params: RouteParams,
    meta: Option<RouteMeta>,
}

enum NavStep {
    Done(NavOutcome),
    Redirect(String),
}

/// Resolves navigation requests against the route table.
///
/// Concurrent requests supersede each other: a request carries the sequence
/// number it was issued with, and async results are applied only while that
/// number is still the latest. A slow earlier navigation can therefore never
/// clobber a faster later one — its completion is a no-op.
pub struct NavigationEngine {
    table: RouteTable,
    guards: Vec<Arc<dyn NavigationGuard>>,
    chrome: Arc<dyn PlatformChrome>,
    metrics: NavMetrics,
    config: EngineConfig,
    seq: AtomicU64,
    phase: Mutex<Phase>,
    mounted: tokio::sync::Mutex<MountedState>,
}

impl NavigationEngine {
    #[must_use]
    pub fn new(
        table: RouteTable,
        guards: Vec<Arc<dyn NavigationGuard>>,
        chrome: Arc<dyn PlatformChrome>,
        config: EngineConfig,
    ) -> Self {
        Self {
            table,
            guards,
            chrome,
            metrics: NavMetrics::new(),
            config,
            seq: AtomicU64::new(0),
            phase: Mutex::new(Phase::Idle),
            mounted: tokio::sync::Mutex::new(MountedState {
                controller: None,
                path: None,
                params: RouteParams::new(),
                meta: None,
            }),
        }
    }

    /// Navigate to `target` (a path, optionally with a query string).
    ///
    /// Never fails: guard rejections become redirects, pipeline errors land
    /// on the error route, and a request superseded by a newer one resolves
    /// to [`NavOutcome::Superseded`] without side effects.
    pub async fn navigate(&self, target: &str) -> NavOutcome {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(to = target, seq, "navigation requested");
        self.drive(target, seq, 0).await
    }

    /// Path of the currently mounted route, if any.
    pub async fn current_path(&self) -> Option<String> {
        self.mounted.lock().await.path.clone()
    }

    /// Current state-machine phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        *self.phase.lock()
    }

    /// Navigation metrics (page-load timestamps).
    #[must_use]
    pub fn metrics(&self) -> &NavMetrics {
        &self.metrics
    }

    async fn drive(&self, target: &str, seq: u64, hop: u8) -> NavOutcome {
        match self.attempt(target, seq).await {
            Ok(NavStep::Done(outcome)) => outcome,
            Ok(NavStep::Redirect(next)) => {
                if hop >= MAX_REDIRECT_HOPS {
                    tracing::error!(
                        to = target,
                        next = %next,
                        "redirect cap exceeded; falling back to error route"
                    );
                    self.enter_error_route(seq, "Navigation failed: too many redirects")
                        .await
                } else {
                    Box::pin(self.drive(&next, seq, hop + 1)).await
                }
            }
            Err(err) => {
                // Last-resort safety net: anything escaping the pipeline
                // lands on the error route, never in a half-mounted view.
                tracing::error!(to = target, error = %err, "navigation failed");
                self.enter_error_route(seq, &err.to_string()).await
            }
        }
    }

    async fn attempt(&self, target: &str, seq: u64) -> Result<NavStep, NavError> {
        self.set_phase(Phase::Matching);

        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target, RouteParams::new()),
        };

        let Some(matched) = self.table.match_path(path) else {
            // A well-formed table ends in a catch-all; reaching this is a
            // programmer error, recorded with the attempted path.
            tracing::error!(path, "no route matched (missing catch-all?)");
            return Ok(NavStep::Done(
                self.enter_error_route(seq, &format!("No route for {path}")).await,
            ));
        };

        let loader = match &matched.route.action {
            RouteAction::Redirect(to) => {
                let next = to(&matched.params);
                tracing::debug!(from = path, to = %next, "route-level redirect");
                self.set_phase(Phase::RedirectPending);
                return Ok(NavStep::Redirect(next));
            }
            RouteAction::View(loader) => Arc::clone(loader),
        };

        let (from_path, from_params, from_meta) = {
            let mounted = self.mounted.lock().await;
            (mounted.path.clone(), mounted.params.clone(), mounted.meta.clone())
        };

        let nav_ctx = NavigationContext {
            to_path: path.to_owned(),
            to_params: matched.params.clone(),
            to_query: query,
            from_path,
            from_params,
        };

        // Guards run strictly in order; the first Redirect/Abort stops the
        // chain. A redirect target's guards run again on the next hop.
        self.set_phase(Phase::GuardEvaluation);
        let guard_ctx = GuardContext {
            nav: &nav_ctx,
            to_meta: &matched.route.meta,
            from_meta: from_meta.as_ref(),
        };
        for guard in &self.guards {
            let verdict = guard.check(&guard_ctx).await;
            if !self.is_current(seq) {
                tracing::debug!(seq, to = target, "navigation superseded during guards");
                return Ok(NavStep::Done(NavOutcome::Superseded));
            }
            match verdict {
                GuardResult::Proceed => {}
                GuardResult::Redirect(next) => {
                    tracing::debug!(guard = guard.name(), to = %next, "guard redirect");
                    self.set_phase(Phase::RedirectPending);
                    return Ok(NavStep::Redirect(next));
                }
                GuardResult::Abort => {
                    tracing::debug!(guard = guard.name(), to = target, "guard abort");
                    self.set_phase(Phase::Aborted);
                    return Ok(NavStep::Done(NavOutcome::Aborted));
                }
            }
        }

        self.set_phase(Phase::Loading);
        let module = loader().await?;
        if !self.is_current(seq) {
            tracing::debug!(seq, to = target, "navigation superseded during load");
            return Ok(NavStep::Done(NavOutcome::Superseded));
        }
        tracing::debug!(view = module.name(), "view loaded");

        self.set_phase(Phase::Mounting);
        {
            let mut mounted = self.mounted.lock().await;
            // Re-check under the lock: a newer navigation may have mounted
            // while this one awaited its loader.
            if !self.is_current(seq) {
                return Ok(NavStep::Done(NavOutcome::Superseded));
            }
            if let Some(mut previous) = mounted.controller.take() {
                previous.destroy();
            }
            let mut controller = module.into_controller();
            controller.mount(&nav_ctx).await?;
            mounted.controller = Some(controller);
            mounted.path = Some(path.to_owned());
            mounted.params = nav_ctx.to_params.clone();
            mounted.meta = Some(matched.route.meta.clone());
        }

        self.set_phase(Phase::Mounted);
        self.after_navigation(&matched.route.meta, path);
        Ok(NavStep::Done(NavOutcome::Mounted {
            path: path.to_owned(),
        }))
    }

    /// Post-navigation side effects; run unconditionally on every completed
    /// navigation.
    fn after_navigation(&self, meta: &RouteMeta, path: &str) {
        match meta.title {
            Some(title) => self
                .chrome
                .set_title(&format!("{title} - {}", self.config.app_title)),
            None => self.chrome.set_title(&self.config.app_title),
        }
        if meta.show_back_button {
            self.chrome.show_back_button();
        } else {
            self.chrome.hide_back_button();
        }
        // Pages re-register the primary action themselves when they need it.
        self.chrome.hide_primary_action();
        self.chrome.set_bottom_nav(meta.show_bottom_nav);
        self.chrome.haptic_selection();
        self.metrics.record_page_load(path);
    }

    /// Mount the error route with `message`. This is the last-resort safety
    /// net and must never itself fail: every failure path here only logs.
    async fn enter_error_route(&self, seq: u64, message: &str) -> NavOutcome {
        let failed = NavOutcome::Failed {
            message: message.to_owned(),
        };

        let Some(matched) = self.table.match_path(&self.config.error_path) else {
            tracing::error!(
                error_path = %self.config.error_path,
                "error route is not declared; leaving the previous view mounted"
            );
            return failed;
        };
        let RouteAction::View(loader) = &matched.route.action else {
            tracing::error!("error route must be a view route");
            return failed;
        };

        let module = match loader().await {
            Ok(module) => module,
            Err(err) => {
                tracing::error!(error = %err, "error route failed to load");
                return failed;
            }
        };

        let mut ctx = NavigationContext::new(self.config.error_path.clone());
        ctx.to_query.insert("error".to_owned(), message.to_owned());

        {
            let mut mounted = self.mounted.lock().await;
            if !self.is_current(seq) {
                return NavOutcome::Superseded;
            }
            if let Some(mut previous) = mounted.controller.take() {
                previous.destroy();
            }
            let mut controller = module.into_controller();
            if let Err(err) = controller.mount(&ctx).await {
                tracing::error!(error = %err, "error route failed to mount");
                return failed;
            }
            mounted.controller = Some(controller);
            mounted.path = Some(self.config.error_path.clone());
            mounted.params = RouteParams::new();
            mounted.meta = Some(matched.route.meta.clone());
        }

        self.set_phase(Phase::Mounted);
        self.after_navigation(&matched.route.meta, &self.config.error_path);
        failed
    }

    fn is_current(&self, seq: u64) -> bool {
        self.seq.load(Ordering::SeqCst) == seq
    }

    fn set_phase(&self, phase: Phase) {
        *self.phase.lock() = phase;
    }
}
