use thiserror::Error;

/// Navigation pipeline failures.
///
/// These never escape the engine: load and mount failures are converted into
/// an error-route redirect carrying a human-readable summary. They are logged
/// but not retried — reloading the same broken module is futile without a
/// page-level refresh, which is outside this core.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum NavError {
    /// The lazily loaded view module failed to resolve
    #[error("view failed to load: {0}")]
    Load(String),

    /// The page controller failed to construct or render
    #[error("view failed to mount: {0}")]
    Mount(String),
}

/// Which guard turned a navigation away.
///
/// A guard rejection is normal control flow, not an exception: it becomes a
/// redirect plus a notification and is recorded here only for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardRejectionKind {
    Auth,
    Permission,
    Network,
}

impl GuardRejectionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GuardRejectionKind::Auth => "auth",
            GuardRejectionKind::Permission => "permission",
            GuardRejectionKind::Network => "network",
        }
    }
}
