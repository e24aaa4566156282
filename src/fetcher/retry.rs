use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::LoaderConfig;
use crate::domain::PostCollection;
use crate::fetcher::{ContentSource, FetchError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(2000);

/// Linear retry with a fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl From<&LoaderConfig> for RetryPolicy {
    fn from(config: &LoaderConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            delay: config.retry_delay(),
        }
    }
}

pub struct RetryScheduler {
    policy: RetryPolicy,
}

impl RetryScheduler {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Fetch until one attempt succeeds or `max_attempts` have failed.
    ///
    /// The first attempt starts immediately; each failure waits `delay` before
    /// the next. Exhaustion reports the last error seen.
    pub async fn run(
        &self,
        source: &(dyn ContentSource + Send + Sync),
    ) -> Result<PostCollection, FetchError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match source.fetch().await {
                Ok(posts) => {
                    if attempt > 1 {
                        info!("Fetched {} posts on attempt {}", posts.len(), attempt);
                    }
                    return Ok(posts);
                }
                Err(e) if attempt < max_attempts => {
                    warn!("Fetch error: {}", e);
                    warn!("Fetch failed. Retrying ({}/{})...", attempt, max_attempts);
                    tokio::time::sleep(self.policy.delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!("Content loading error: {}", e);
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::scripted::{collection, ScriptedSource};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_first_success_short_circuits() {
        let source = ScriptedSource::new(vec![ScriptedSource::ok(collection(&[0]))]);
        let scheduler = RetryScheduler::new(RetryPolicy::default());

        let posts = scheduler.run(&source).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(source.attempts().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_with_fixed_delay() {
        let start = Instant::now();
        let source = ScriptedSource::new(vec![
            ScriptedSource::fail(FetchError::HttpStatus(500)),
            ScriptedSource::fail(FetchError::HttpStatus(503)),
            ScriptedSource::ok(collection(&[0, 2])),
        ]);
        let scheduler = RetryScheduler::new(RetryPolicy::default());

        let posts = scheduler.run(&source).await.unwrap();
        assert_eq!(posts.len(), 2);

        let offsets: Vec<Duration> = source
            .attempts()
            .into_iter()
            .map(|at| at - start)
            .collect();
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(2000),
                Duration::from_millis(4000)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_returns_last_error() {
        let source = ScriptedSource::new(vec![
            ScriptedSource::fail(FetchError::HttpStatus(500)),
            ScriptedSource::fail(FetchError::Parse("eof".into())),
            ScriptedSource::fail(FetchError::HttpStatus(404)),
            ScriptedSource::ok(collection(&[0])),
        ]);
        let scheduler = RetryScheduler::new(RetryPolicy::default());

        let err = scheduler.run(&source).await.unwrap_err();
        assert_eq!(err, FetchError::HttpStatus(404));
        assert_eq!(source.attempts().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_still_tries_once() {
        let source = ScriptedSource::new(vec![ScriptedSource::fail(FetchError::HttpStatus(500))]);
        let scheduler = RetryScheduler::new(RetryPolicy {
            max_attempts: 0,
            delay: Duration::from_millis(10),
        });

        assert!(scheduler.run(&source).await.is_err());
        assert_eq!(source.attempts().len(), 1);
    }
}
