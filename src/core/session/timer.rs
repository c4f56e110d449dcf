//! Cancellable session-expiry timer

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

/// One-shot timer backed by a tokio task
///
/// Starting the timer replaces any pending one. The task is aborted on
/// [`ExpiryTimer::cancel`] and when the timer is dropped.
#[derive(Debug, Default)]
pub struct ExpiryTimer {
    handle: Option<JoinHandle<()>>,
}

impl ExpiryTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `on_expire` after `timeout`
    ///
    /// Returns `false` without scheduling anything when called outside a
    /// tokio runtime.
    pub fn start<F>(&mut self, timeout: Duration, on_expire: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("No async runtime available, session timeout not scheduled");
            return false;
        };

        self.handle = Some(runtime.spawn(async move {
            tokio::time::sleep(timeout).await;
            on_expire.await;
        }));
        true
    }

    /// Aborts the pending timer, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// True while a timer is scheduled and has not fired
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ExpiryTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
