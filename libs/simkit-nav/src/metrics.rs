//! Lightweight navigation metrics.

use parking_lot::Mutex;
use std::time::Instant;

#[derive(Debug, Default)]
struct MetricsInner {
    page_loads: u64,
    last_page_load: Option<(String, Instant)>,
}

/// Records a page-load timestamp per completed navigation.
#[derive(Debug, Default)]
pub struct NavMetrics {
    inner: Mutex<MetricsInner>,
}

impl NavMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page_load(&self, path: &str) {
        let mut inner = self.inner.lock();
        inner.page_loads += 1;
        inner.last_page_load = Some((path.to_owned(), Instant::now()));
        tracing::debug!(path, total = inner.page_loads, "page load recorded");
    }

    #[must_use]
    pub fn page_loads(&self) -> u64 {
        self.inner.lock().page_loads
    }

    /// Path and timestamp of the most recent page load.
    #[must_use]
    pub fn last_page_load(&self) -> Option<(String, Instant)> {
        self.inner.lock().last_page_load.clone()
    }
}
