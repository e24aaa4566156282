use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Armed,
    Cancelled,
    Fired,
}

/// One-shot timer that runs a callback unless cancelled first.
///
/// Cancelling only suppresses the callback; it has no say over whatever work
/// the deadline was guarding. Dropping the guard cancels it.
pub struct DeadlineGuard {
    status: Arc<Mutex<DeadlineStatus>>,
    task: JoinHandle<()>,
}

impl DeadlineGuard {
    /// Arm the timer. Must be called from within a tokio runtime.
    pub fn start<F>(timeout: Duration, on_expire: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let status = Arc::new(Mutex::new(DeadlineStatus::Armed));
        let task_status = status.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(timeout).await;

            let fire = {
                let mut status = lock(&task_status);
                if *status == DeadlineStatus::Armed {
                    *status = DeadlineStatus::Fired;
                    true
                } else {
                    false
                }
            };

            if fire {
                debug!("Deadline of {:?} expired", timeout);
                on_expire();
            }
        });

        Self { status, task }
    }

    /// Returns true if this call stopped an armed timer. Calling it again, or
    /// after the timer fired, does nothing.
    pub fn cancel(&self) -> bool {
        let mut status = lock(&self.status);
        if *status != DeadlineStatus::Armed {
            return false;
        }
        *status = DeadlineStatus::Cancelled;
        self.task.abort();
        true
    }

    pub fn status(&self) -> DeadlineStatus {
        *lock(&self.status)
    }
}

impl Drop for DeadlineGuard {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(status: &Mutex<DeadlineStatus>) -> MutexGuard<'_, DeadlineStatus> {
    status.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let hook = count.clone();
        (count, move || {
            hook.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_once_after_timeout() {
        let (count, on_expire) = counter();
        let guard = DeadlineGuard::start(Duration::from_secs(10), on_expire);

        tokio::time::sleep(Duration::from_millis(9_999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(guard.status(), DeadlineStatus::Armed);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(guard.status(), DeadlineStatus::Fired);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_expiry_suppresses_callback() {
        let (count, on_expire) = counter();
        let guard = DeadlineGuard::start(Duration::from_secs(10), on_expire);

        tokio::time::sleep(Duration::from_secs(4)).await;
        assert!(guard.cancel());
        assert!(!guard.cancel());

        tokio::time::sleep(Duration::from_secs(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(guard.status(), DeadlineStatus::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_fire_is_noop() {
        let (count, on_expire) = counter();
        let guard = DeadlineGuard::start(Duration::from_secs(1), on_expire);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!guard.cancel());
        assert_eq!(guard.status(), DeadlineStatus::Fired);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let (count, on_expire) = counter();
        drop(DeadlineGuard::start(Duration::from_secs(1), on_expire));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
