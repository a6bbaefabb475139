//! Poll a remote entity until it reaches a target status.
//!
//! Every mutating server operation is asynchronous on the service side;
//! this is the shared wait loop those operations converge through. One
//! target status, a set of still-in-progress statuses, and anything else
//! is a terminal failure.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

use crate::api::ApiError;

/// Ceiling for the doubling poll interval.
const BACKOFF_CEILING: Duration = Duration::from_secs(10);

/// Timeout is a separate variant from `UnexpectedStatus` so callers can
/// tell "broke" apart from "too slow".
#[derive(Error, Debug)]
pub enum WaitError {
    #[error("unexpected status {got:?} while waiting for {want:?}")]
    UnexpectedStatus { want: String, got: String },

    #[error("timed out waiting for status {want:?} (last seen: {last:?})")]
    Timeout { want: String, last: Option<String> },

    #[error(transparent)]
    Refresh(#[from] ApiError),
}

/// Wait configuration: which statuses count as still-in-progress, the
/// single status that counts as done, and timing.
///
/// `wait_for` sleeps `delay` up front (services often report a stale
/// status right after accepting an operation), then polls with an
/// interval that starts at `min_interval` and doubles between attempts,
/// capped at a ceiling and at the remaining timeout budget.
#[derive(Debug, Clone)]
pub struct StateChangeConf {
    pub pending: Vec<String>,
    pub target: String,
    pub timeout: Duration,
    pub delay: Duration,
    pub min_interval: Duration,
}

impl StateChangeConf {
    pub fn new(
        pending: &[&str],
        target: &str,
        timeout: Duration,
        delay: Duration,
        min_interval: Duration,
    ) -> Self {
        Self {
            pending: pending.iter().map(|s| (*s).to_string()).collect(),
            target: target.to_string(),
            timeout,
            delay,
            min_interval,
        }
    }

    /// Drive `refresh` until it reports the target status, returning the
    /// entity from the final poll.
    ///
    /// A refresh error aborts immediately; by the time an operation is
    /// being awaited the fetch is authoritative, not transient noise.
    /// A status outside pending and target is a terminal failure.
    /// Callers that need "wait until destroyed" translate not-found into
    /// a synthetic status inside their refresh closure.
    pub async fn wait_for<T, F, Fut>(&self, mut refresh: F) -> Result<Option<T>, WaitError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(Option<T>, String), ApiError>>,
    {
        let started = Instant::now();

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let mut interval = self.min_interval;
        let mut last_status: Option<String> = None;

        loop {
            if started.elapsed() >= self.timeout {
                return Err(WaitError::Timeout {
                    want: self.target.clone(),
                    last: last_status,
                });
            }

            let (entity, status) = refresh().await?;

            if status == self.target {
                return Ok(entity);
            }

            if !self.pending.iter().any(|p| *p == status) {
                return Err(WaitError::UnexpectedStatus {
                    want: self.target.clone(),
                    got: status,
                });
            }

            tracing::debug!(status = %status, target = %self.target, "still waiting");
            last_status = Some(status);

            let remaining = self.timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                return Err(WaitError::Timeout {
                    want: self.target.clone(),
                    last: last_status,
                });
            }

            tokio::time::sleep(interval.min(remaining)).await;
            interval = (interval * 2).min(BACKOFF_CEILING);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};

    fn conf(pending: &[&str], target: &str) -> StateChangeConf {
        StateChangeConf::new(
            pending,
            target,
            Duration::from_secs(60),
            Duration::ZERO,
            Duration::from_millis(10),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn reaches_target_through_pending_statuses() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sequence = ["BUILD", "BUILD", "ACTIVE"];

        let result = conf(&["BUILD"], "ACTIVE")
            .wait_for(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let status = sequence[n].to_string();
                async move { Ok::<_, ApiError>((Some(n), status)) }
            })
            .await;

        assert_eq!(assert_ok!(result), Some(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn returns_entity_when_target_hit_on_first_poll() {
        let result = conf(&["BUILD"], "ACTIVE")
            .wait_for(|| async { Ok::<_, ApiError>((Some("server"), "ACTIVE".to_string())) })
            .await;

        assert_eq!(assert_ok!(result), Some("server"));
    }

    #[tokio::test(start_paused = true)]
    async fn fails_fast_on_unexpected_status() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sequence = ["BUILD", "ERROR", "ACTIVE"];

        let result = conf(&["BUILD"], "ACTIVE")
            .wait_for(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                let status = sequence[n].to_string();
                async move { Ok::<_, ApiError>((Some(n), status)) }
            })
            .await;

        match assert_err!(result) {
            WaitError::UnexpectedStatus { want, got } => {
                assert_eq!(want, "ACTIVE");
                assert_eq!(got, "ERROR");
            }
            other => panic!("expected UnexpectedStatus, got {other:?}"),
        }
        // no further polls after the terminal status
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_distinct_from_failure() {
        let conf = StateChangeConf::new(
            &["BUILD"],
            "ACTIVE",
            Duration::from_secs(5),
            Duration::ZERO,
            Duration::from_millis(100),
        );

        let result = conf
            .wait_for(|| async { Ok::<_, ApiError>((Some(()), "BUILD".to_string())) })
            .await;

        match assert_err!(result) {
            WaitError::Timeout { want, last } => {
                assert_eq!(want, "ACTIVE");
                assert_eq!(last.as_deref(), Some("BUILD"));
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_error_aborts_without_retry() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let result = conf(&["BUILD"], "ACTIVE")
            .wait_for(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    Err::<(Option<()>, String), _>(ApiError::Api {
                        status: 500,
                        message: "boom".to_string(),
                    })
                }
            })
            .await;

        assert!(matches!(assert_err!(result), WaitError::Refresh(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn synthetic_status_expresses_wait_until_gone() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        // refresh translates not-found into a synthetic DELETED, the way
        // delete waits do
        let result = conf(&["ACTIVE"], "DELETED")
            .wait_for(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Ok::<_, ApiError>((Some("server"), "ACTIVE".to_string()))
                    } else {
                        Ok((None, "DELETED".to_string()))
                    }
                }
            })
            .await;

        assert_eq!(assert_ok!(result), None);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn initial_delay_counts_against_the_timeout() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let conf = StateChangeConf::new(
            &["BUILD"],
            "ACTIVE",
            Duration::from_secs(1),
            Duration::from_secs(5),
            Duration::from_millis(100),
        );

        let result = conf
            .wait_for(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, ApiError>((Some(()), "BUILD".to_string())) }
            })
            .await;

        assert!(matches!(assert_err!(result), WaitError::Timeout { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_doubles_up_to_the_ceiling() {
        let polls: Arc<std::sync::Mutex<Vec<Duration>>> =
            Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = polls.clone();
        let started = Instant::now();

        let conf = StateChangeConf::new(
            &["BUILD"],
            "ACTIVE",
            Duration::from_secs(120),
            Duration::ZERO,
            Duration::from_secs(3),
        );

        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _ = conf
            .wait_for(move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                seen.lock().unwrap().push(started.elapsed());
                let status = if n < 4 { "BUILD" } else { "ACTIVE" };
                async move { Ok::<_, ApiError>((Some(()), status.to_string())) }
            })
            .await;

        // sleeps of 3s, 6s, 10s (capped), 10s between the five polls
        let polls = polls.lock().unwrap();
        assert_eq!(polls.len(), 5);
        assert_eq!(polls[1] - polls[0], Duration::from_secs(3));
        assert_eq!(polls[2] - polls[1], Duration::from_secs(6));
        assert_eq!(polls[3] - polls[2], Duration::from_secs(10));
        assert_eq!(polls[4] - polls[3], Duration::from_secs(10));
    }
}
