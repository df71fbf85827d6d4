//! Connectivity state.

use std::sync::atomic::{AtomicBool, Ordering};

/// Explicit online/offline state, wired to platform events by the host.
///
/// Consumers only read; mutation goes through [`set_online`](Self::set_online).
#[derive(Debug)]
pub struct Connectivity {
    online: AtomicBool,
}

impl Connectivity {
    /// Start online — the state before the host reports anything.
    #[must_use]
    pub fn new() -> Self {
        Self {
            online: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.online.load(Ordering::Relaxed)
    }

    pub fn set_online(&self, online: bool) {
        let was = self.online.swap(online, Ordering::Relaxed);
        if was != online {
            tracing::debug!(online, "connectivity changed");
        }
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}
