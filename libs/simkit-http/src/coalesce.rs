//! In-flight request coalescing.

use futures::FutureExt;
use futures::future::Shared;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type SharedFuture<T, E> = Shared<Pin<Box<dyn Future<Output = Result<T, E>> + Send>>>;

/// Merges concurrent identical requests into one physical call.
///
/// For a given key at most one producer runs at a time; callers that arrive
/// while it is in flight await the same shared future and observe the exact
/// same value or failure. The registration is removed inside the shared
/// future itself — before any caller resolves — so no entry outlives its
/// request, on success or on error.
///
/// Not a thread-safety primitive: the lock only protects the map during
/// registration/lookup. It is re-entrancy safe — callers can join while the
/// producer is resolving on the same tick.
pub struct RequestCoalescer<T, E> {
    inflight: Arc<Mutex<HashMap<String, SharedFuture<T, E>>>>,
}

impl<T, E> RequestCoalescer<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            inflight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Run `producer` under `key`, or join the in-flight call for that key.
    ///
    /// `producer` is only invoked when no live future exists for the key.
    pub async fn run<F, Fut>(&self, key: &str, producer: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let shared = {
            let mut inflight = self.inflight.lock();
            if let Some(existing) = inflight.get(key) {
                tracing::trace!(key, "joining in-flight request");
                existing.clone()
            } else {
                let registry = Arc::clone(&self.inflight);
                let owned_key = key.to_owned();
                let work = producer();
                let fut: Pin<Box<dyn Future<Output = Result<T, E>> + Send>> =
                    Box::pin(async move {
                        let result = work.await;
                        // Unregister before resolving to callers.
                        registry.lock().remove(&owned_key);
                        result
                    });
                let shared = fut.shared();
                inflight.insert(key.to_owned(), shared.clone());
                shared
            }
        };

        shared.await
    }

    /// Number of currently registered in-flight requests.
    #[must_use]
    pub fn inflight_len(&self) -> usize {
        self.inflight.lock().len()
    }
}

impl<T, E> Default for RequestCoalescer<T, E>
where
    T: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_overlapping_callers_share_one_producer_run() {
        let coalescer: Arc<RequestCoalescer<u32, String>> = Arc::new(RequestCoalescer::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let coalescer = Arc::clone(&coalescer);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                coalescer
                    .run("k", move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(50)).await;
                        Ok(7)
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Ok(7));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(coalescer.inflight_len(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_shared_and_unregistered() {
        let coalescer: Arc<RequestCoalescer<u32, String>> = Arc::new(RequestCoalescer::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let coalescer = Arc::clone(&coalescer);
            let calls = Arc::clone(&calls);
            handles.push(tokio::spawn(async move {
                coalescer
                    .run("k", move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Err("boom".to_owned())
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Err("boom".to_owned()));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        // No stale registration survives the failed call.
        assert_eq!(coalescer.inflight_len(), 0);
    }

    #[tokio::test]
    async fn test_sequential_calls_each_invoke_producer() {
        let coalescer: RequestCoalescer<u32, String> = RequestCoalescer::new();
        let calls = AtomicUsize::new(0);

        for expected in 1..=3 {
            let result = coalescer
                .run("k", || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(0) }
                })
                .await;
            assert_eq!(result, Ok(0));
            assert_eq!(calls.load(Ordering::SeqCst), expected);
        }
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_coalesce() {
        let coalescer: Arc<RequestCoalescer<u32, String>> = Arc::new(RequestCoalescer::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let a = {
            let coalescer = Arc::clone(&coalescer);
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                coalescer
                    .run("a", move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(30)).await;
                        Ok(1)
                    })
                    .await
            })
        };
        let b = {
            let coalescer = Arc::clone(&coalescer);
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                coalescer
                    .run("b", move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(30)).await;
                        Ok(2)
                    })
                    .await
            })
        };

        assert_eq!(a.await.unwrap(), Ok(1));
        assert_eq!(b.await.unwrap(), Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
