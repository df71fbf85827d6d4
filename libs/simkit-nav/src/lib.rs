#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Navigation core for the Simlink mini-app
//!
//! This crate resolves a requested path against a declarative route table,
//! runs an ordered chain of asynchronous guards (auth, permission, preload,
//! network), lazily loads the target view, and swaps page controllers with
//! cleanup. It has no HTTP dependency of its own — data access and platform
//! chrome are collaborators behind traits, wired in by the host bootstrap.
//!
//! Failure semantics: guard rejections are redirects (normal control flow),
//! preload failures only warn, load/mount failures land on the error route,
//! and anything escaping the pipeline is caught at the top level — a
//! navigation never leaves the UI half-mounted.

mod chrome;
mod context;
mod engine;
mod error;
pub mod guards;
mod metrics;
mod notify;
mod page;
mod route;
mod session;
mod state;

pub use chrome::{ActionCallback, NullChrome, PlatformChrome};
pub use context::{NavigationContext, RouteParams, parse_query};
pub use engine::{EngineConfig, NavOutcome, NavigationEngine, Phase};
pub use error::{GuardRejectionKind, NavError};
pub use guards::{
    AuthGuard, GuardContext, GuardResult, NavigationGuard, NetworkGuard, PermissionGuard,
    PreloadGuard, Preloader, standard_guards,
};
pub use metrics::NavMetrics;
pub use notify::{Notification, NotificationCenter, Notifier, NotifyLevel};
pub use page::{LoadFuture, PageController, ViewLoader, ViewModule, view_loader};
pub use route::{PreloadKind, RedirectFn, Route, RouteAction, RouteMatch, RouteMeta, RouteTable};
pub use session::{Session, SessionBackend, SessionError, SessionStore};
pub use state::Connectivity;
