//! Async testing utilities

#![allow(clippy::missing_panics_doc)]

use std::future::Future;
use std::time::Duration;

/// Poll `condition` every `interval` until it returns true or `timeout`
/// elapses. Returns whether the condition was met.
///
/// # Examples
///
/// ```no_run
/// # #[cfg(feature = "test-utils")]
/// # {
/// use std::time::Duration;
///
/// use osdb_core::testing::poll_until;
///
/// #[tokio::test]
/// async fn waits_for_flag() {
///     let met =
///         poll_until(Duration::from_millis(50), Duration::from_millis(5), || async { true })
///             .await;
///     assert!(met);
/// }
/// # }
/// ```
pub async fn poll_until<F, Fut>(timeout: Duration, interval: Duration, mut condition: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = tokio::time::Instant::now();

    while start.elapsed() < timeout {
        if condition().await {
            return true;
        }
        tokio::time::sleep(interval).await;
    }

    condition().await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn poll_until_sees_condition_flip() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let met = poll_until(Duration::from_millis(500), Duration::from_millis(5), || {
            let counter = counter.clone();
            async move { counter.fetch_add(1, Ordering::SeqCst) >= 3 }
        })
        .await;

        assert!(met);
        assert!(calls.load(Ordering::SeqCst) >= 4);
    }

    #[tokio::test]
    async fn poll_until_gives_up_after_timeout() {
        let met =
            poll_until(Duration::from_millis(30), Duration::from_millis(5), || async { false })
                .await;
        assert!(!met);
    }
}
