//! The readiness polling loop.
//!
//! States: polling, then exactly one of ready, timed out or cancelled. The
//! loop runs inside the caller's future; nothing is spawned, so dropping or
//! finishing the wait releases the timer and any in-flight probe.

use std::io;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::error::{Result, WaitError};
use crate::{CancellationToken, DEFAULT_INTERVAL, DEFAULT_TIMEOUT, Probe, TcpProbe, WaitConfig};

/// Details of a wait that ran out of time.
#[derive(Debug)]
pub struct TimedOut {
    /// Budget that elapsed.
    pub timeout: Duration,
    /// Completed probe attempts.
    pub attempts: u32,
    /// Error of the last failed attempt, if any attempt completed.
    pub last_error: Option<io::Error>,
}

/// Terminal state of one wait.
#[derive(Debug)]
pub enum PollOutcome {
    /// A probe succeeded.
    Ready,
    /// The deadline elapsed first.
    TimedOut(TimedOut),
    /// The cancellation token fired first.
    Cancelled,
}

impl PollOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, PollOutcome::Ready)
    }

    /// Maps the outcome onto a result, naming `target` in errors.
    pub fn into_result(self, target: &str) -> Result<()> {
        match self {
            PollOutcome::Ready => Ok(()),
            PollOutcome::TimedOut(TimedOut {
                timeout,
                attempts,
                last_error,
            }) => Err(WaitError::TimedOut {
                target: target.to_string(),
                timeout,
                attempts,
                last_error,
            }),
            PollOutcome::Cancelled => Err(WaitError::Cancelled {
                target: target.to_string(),
            }),
        }
    }
}

/// Repeatedly probes a target until it is ready, the timeout elapses, or
/// the caller cancels.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use v8_args_wait::{CancellationToken, Poller};
///
/// # async fn run() -> v8_args_wait::Result<()> {
/// let token = CancellationToken::new();
/// Poller::new("127.0.0.1:1543")
///     .timeout(Duration::from_secs(30))
///     .interval(Duration::from_millis(500))
///     .wait_ready(&token)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Poller<P = TcpProbe> {
    target: String,
    probe: P,
    timeout: Duration,
    interval: Duration,
}

impl Poller<TcpProbe> {
    /// Polls `target` (`host:port`) with TCP connects.
    pub fn new(target: impl Into<String>) -> Self {
        let target = target.into();
        Self::with_probe(target.clone(), TcpProbe::new(target))
    }
}

impl<P: Probe> Poller<P> {
    /// Polls with a custom probe; `target` only names it in logs and errors.
    pub fn with_probe(target: impl Into<String>, probe: P) -> Self {
        Self {
            target: target.into(),
            probe,
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay between attempts; clamped to at least one millisecond.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_millis(1));
        self
    }

    pub fn with_config(self, config: &WaitConfig) -> Self {
        self.timeout(config.timeout()).interval(config.interval())
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Runs the loop and reports its terminal state.
    ///
    /// The first probe runs immediately, then one per interval. Cancellation
    /// is checked before the deadline, and both before a finished probe, so
    /// a probe result that arrives together with either is discarded.
    pub async fn poll(&self, cancel: &CancellationToken) -> PollOutcome {
        // A timeout past the clock's range never expires.
        let deadline = Instant::now().checked_add(self.timeout);
        let expired = async {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(expired);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut attempts = 0u32;
        let mut last_error = None;

        loop {
            let attempt = async {
                ticker.tick().await;
                self.probe.probe().await
            };

            tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!(addr = %self.target, attempts, "readiness wait cancelled");
                    return PollOutcome::Cancelled;
                }
                _ = &mut expired => {
                    debug!(addr = %self.target, attempts, timeout = ?self.timeout, "readiness wait timed out");
                    return PollOutcome::TimedOut(TimedOut {
                        timeout: self.timeout,
                        attempts,
                        last_error,
                    });
                }
                result = attempt => {
                    attempts += 1;
                    match result {
                        Ok(()) => {
                            info!(addr = %self.target, attempts, "target is ready");
                            return PollOutcome::Ready;
                        }
                        Err(err) => {
                            debug!(addr = %self.target, attempts, error = %err, "probe failed");
                            last_error = Some(err);
                        }
                    }
                }
            }
        }
    }

    /// Like [`poll`](Self::poll), as a `Result`.
    ///
    /// # Errors
    ///
    /// [`WaitError::TimedOut`] or [`WaitError::Cancelled`].
    pub async fn wait_ready(&self, cancel: &CancellationToken) -> Result<()> {
        self.poll(cancel).await.into_result(&self.target)
    }
}

/// Waits for `target` (`host:port`) to accept TCP connections, probing once
/// per [`DEFAULT_INTERVAL`].
pub async fn wait(target: &str, timeout: Duration, cancel: &CancellationToken) -> PollOutcome {
    Poller::new(target).timeout(timeout).poll(cancel).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    /// Fails until the `ready_on`-th call.
    #[derive(Debug, Clone)]
    struct Scripted {
        calls: Arc<AtomicU32>,
        ready_on: Option<u32>,
    }

    impl Scripted {
        fn ready_on(n: u32) -> Self {
            Self {
                calls: Arc::new(AtomicU32::new(0)),
                ready_on: Some(n),
            }
        }

        fn never() -> Self {
            Self {
                calls: Arc::new(AtomicU32::new(0)),
                ready_on: None,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Probe for Scripted {
        async fn probe(&self) -> io::Result<()> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            match self.ready_on {
                Some(n) if call >= n => Ok(()),
                _ => Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused")),
            }
        }
    }

    fn poller(probe: Scripted) -> Poller<Scripted> {
        Poller::with_probe("scripted", probe)
            .interval(Duration::from_millis(100))
            .timeout(Duration::from_secs(1))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ready_within_one_tick_of_reachability() {
        let probe = Scripted::ready_on(4);
        let started = Instant::now();

        let outcome = poller(probe.clone()).poll(&CancellationToken::new()).await;

        assert!(outcome.is_ready());
        assert_eq!(probe.calls(), 4);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(300));
        assert!(elapsed < Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_times_out_at_deadline() {
        let probe = Scripted::never();
        let started = Instant::now();

        let outcome = poller(probe.clone()).poll(&CancellationToken::new()).await;

        let elapsed = started.elapsed();
        match outcome {
            PollOutcome::TimedOut(timed_out) => {
                assert_eq!(timed_out.timeout, Duration::from_secs(1));
                assert!(timed_out.attempts >= 1);
                assert!(timed_out.last_error.is_some());
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_start_never_probes() {
        let probe = Scripted::ready_on(1);
        let token = CancellationToken::new();
        token.cancel();

        let outcome = poller(probe.clone()).poll(&token).await;

        assert!(matches!(outcome, PollOutcome::Cancelled));
        assert_eq!(probe.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_wait_stops_probing() {
        let probe = Scripted::never();
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(250)).await;
            canceller.cancel();
        });

        let outcome = poller(probe.clone()).poll(&token).await;
        assert!(matches!(outcome, PollOutcome::Cancelled));

        let calls = probe.calls();
        assert_eq!(calls, 3);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(probe.calls(), calls);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_timeout_times_out() {
        let outcome = poller(Scripted::never())
            .timeout(Duration::ZERO)
            .poll(&CancellationToken::new())
            .await;
        assert!(matches!(outcome, PollOutcome::TimedOut(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_timeout_does_not_panic() {
        let token = CancellationToken::new();
        token.cancel();
        let outcome = poller(Scripted::never())
            .timeout(Duration::MAX)
            .poll(&token)
            .await;
        assert!(matches!(outcome, PollOutcome::Cancelled));

        let probe = Scripted::ready_on(3);
        let outcome = poller(probe.clone())
            .timeout(Duration::MAX)
            .poll(&CancellationToken::new())
            .await;
        assert!(outcome.is_ready());
        assert_eq!(probe.calls(), 3);
    }

    #[test]
    fn test_into_result_names_target() {
        let err = PollOutcome::Cancelled.into_result("127.0.0.1:1543").unwrap_err();
        assert_eq!(err.to_string(), "waiting for 127.0.0.1:1543 was cancelled");

        let err = PollOutcome::TimedOut(TimedOut {
            timeout: Duration::from_secs(10),
            attempts: 10,
            last_error: None,
        })
        .into_result("127.0.0.1:1543")
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "127.0.0.1:1543 not ready after 10s (10 probe attempt(s))"
        );
    }

    #[test]
    fn test_interval_is_clamped() {
        let poller = Poller::new("127.0.0.1:1").interval(Duration::ZERO);
        assert_eq!(poller.interval, Duration::from_millis(1));
    }
}
