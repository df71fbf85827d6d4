//! Request context headers.

use std::sync::Arc;

/// Header carrying the opaque host-platform auth payload (init data).
pub const INIT_DATA_HEADER: &str = "x-init-data";

/// Header carrying the anti-replay wall-clock timestamp (milliseconds).
pub const REQUEST_TIME_HEADER: &str = "x-request-time";

/// Maximum body preview size for error messages (8KB).
///
/// When a request returns a non-2xx status, part of the response body is
/// kept in the error for debugging. This constant limits how much is kept
/// to prevent memory issues with large error responses.
pub const ERROR_BODY_PREVIEW_LIMIT: usize = 8 * 1024;

/// Source of the opaque auth/session token attached to every request.
///
/// The host bootstrap supplies the platform's signed init payload; the
/// transport forwards it verbatim in [`INIT_DATA_HEADER`] and never
/// inspects it.
pub trait AuthContext: Send + Sync {
    /// Current auth payload, or `None` when the host has none (the header
    /// is then omitted and the backend decides whether to reject).
    fn init_data(&self) -> Option<String>;
}

/// Auth context for unauthenticated or test clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

impl AuthContext for NoAuth {
    fn init_data(&self) -> Option<String> {
        None
    }
}

/// Auth context with a fixed init payload, set once at bootstrap.
#[derive(Debug, Clone)]
pub struct StaticInitData(pub String);

impl AuthContext for StaticInitData {
    fn init_data(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Type-erased shared auth context.
pub type SharedAuthContext = Arc<dyn AuthContext>;
