//! Startup convergence wait.

use std::collections::BTreeSet;
use std::future::Future;
use std::time::Duration;

use graphql_gateway_sdk::GatewayError;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// What the controller reports on each poll tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvergenceStatus {
    /// Number of composition-eligible services.
    pub eligible: usize,
    /// Required type names nobody has announced yet.
    pub outstanding: BTreeSet<String>,
    /// Explicitly required identities that are not registered and built.
    pub missing_services: Vec<String>,
}

impl ConvergenceStatus {
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.eligible > 0 && self.outstanding.is_empty() && self.missing_services.is_empty()
    }
}

/// Polls a status probe until it converges or a monotonic deadline passes.
#[derive(Debug, Clone, Copy)]
pub struct ConvergenceWaiter {
    poll_interval: Duration,
    timeout: Duration,
}

impl ConvergenceWaiter {
    #[must_use]
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        Self {
            poll_interval,
            timeout,
        }
    }

    /// Probe once per poll interval until the status converges.
    ///
    /// The probe always runs one last time at the deadline before giving up.
    /// A probe that has not answered by the deadline counts as a timeout and
    /// reports the last status seen.
    ///
    /// # Errors
    /// `GatewayError::Timeout` once the deadline passes, naming what is still
    /// missing; `GatewayError::Stopped` if `cancel` fires first.
    pub async fn wait<F, Fut>(
        &self,
        cancel: &CancellationToken,
        mut probe: F,
    ) -> Result<ConvergenceStatus, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ConvergenceStatus>,
    {
        let start = Instant::now();
        let deadline = start + self.timeout;
        let mut last = ConvergenceStatus::default();

        loop {
            if cancel.is_cancelled() {
                return Err(GatewayError::Stopped);
            }

            let status = tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(GatewayError::Stopped),
                status = probe() => status,
                () = tokio::time::sleep_until(deadline) => {
                    warn!("Dependency status probe did not answer before the deadline");
                    return Err(timed_out(start, last));
                }
            };
            if status.is_converged() {
                debug!(
                    elapsed_ms = start.elapsed().as_millis(),
                    eligible = status.eligible,
                    "Dependencies converged"
                );
                return Ok(status);
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(timed_out(start, status));
            }

            debug!(
                outstanding = ?status.outstanding,
                missing_services = ?status.missing_services,
                "Waiting for dependencies"
            );
            last = status;

            let next_tick = (now + self.poll_interval).min(deadline);
            tokio::select! {
                () = cancel.cancelled() => return Err(GatewayError::Stopped),
                () = tokio::time::sleep_until(next_tick) => {}
            }
        }
    }
}

fn timed_out(start: Instant, status: ConvergenceStatus) -> GatewayError {
    let waited_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    warn!(
        waited_ms,
        missing_types = ?status.outstanding,
        missing_services = ?status.missing_services,
        "Timed out waiting for dependencies"
    );
    GatewayError::Timeout {
        waited_ms,
        missing_types: status.outstanding.into_iter().collect(),
        missing_services: status.missing_services,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn pending() -> ConvergenceStatus {
        ConvergenceStatus {
            eligible: 2,
            outstanding: BTreeSet::from(["Chapter".to_owned()]),
            missing_services: vec!["Reviews".to_owned()],
        }
    }

    #[test]
    fn test_converged_requires_an_eligible_service() {
        assert!(!ConvergenceStatus::default().is_converged());
        let status = ConvergenceStatus {
            eligible: 1,
            ..ConvergenceStatus::default()
        };
        assert!(status.is_converged());
        assert!(!pending().is_converged());
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_at_deadline() {
        let waiter = ConvergenceWaiter::new(Duration::from_millis(100), Duration::from_millis(300));
        let ticks = Arc::new(AtomicUsize::new(0));
        let started = Instant::now();

        let probe_ticks = Arc::clone(&ticks);
        let err = waiter
            .wait(&CancellationToken::new(), || {
                probe_ticks.fetch_add(1, Ordering::SeqCst);
                async { pending() }
            })
            .await
            .unwrap_err();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed <= Duration::from_millis(400));
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
        match err {
            GatewayError::Timeout {
                missing_types,
                missing_services,
                ..
            } => {
                assert_eq!(missing_types, vec!["Chapter"]);
                assert_eq!(missing_services, vec!["Reviews"]);
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_once_converged() {
        let waiter = ConvergenceWaiter::new(Duration::from_millis(50), Duration::from_secs(5));
        let ticks = Arc::new(AtomicUsize::new(0));

        let probe_ticks = Arc::clone(&ticks);
        let status = waiter
            .wait(&CancellationToken::new(), || {
                let tick = probe_ticks.fetch_add(1, Ordering::SeqCst);
                async move {
                    if tick < 3 {
                        pending()
                    } else {
                        ConvergenceStatus {
                            eligible: 3,
                            ..ConvergenceStatus::default()
                        }
                    }
                }
            })
            .await
            .unwrap();
        assert_eq!(status.eligible, 3);
        assert_eq!(ticks.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_probe_times_out_with_last_status() {
        let waiter = ConvergenceWaiter::new(Duration::from_millis(100), Duration::from_millis(300));
        let ticks = Arc::new(AtomicUsize::new(0));
        let started = Instant::now();

        let probe_ticks = Arc::clone(&ticks);
        let err = waiter
            .wait(&CancellationToken::new(), || {
                let tick = probe_ticks.fetch_add(1, Ordering::SeqCst);
                async move {
                    if tick > 0 {
                        std::future::pending::<()>().await;
                    }
                    pending()
                }
            })
            .await
            .unwrap_err();

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(350));
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
        match err {
            GatewayError::Timeout { missing_types, .. } => {
                assert_eq!(missing_types, vec!["Chapter"]);
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_stops_waiting() {
        let waiter = ConvergenceWaiter::new(Duration::from_millis(100), Duration::from_secs(60));
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(250)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let err = waiter.wait(&cancel, || async { pending() }).await.unwrap_err();
        assert!(err.is_stopped());
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
