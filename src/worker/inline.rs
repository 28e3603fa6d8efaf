//! Same-thread fallback for the worker port.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use super::config::WorkerConfig;
use super::types::{Completion, WorkerExecutor};
use crate::error::{panic_message, SelectError, SelectResult};
use crate::execution::{BoundStrategy, Clock, Execution, MonotonicClock};

/// Runs each job synchronously on the submitting thread.
///
/// For environments without threads, and for deterministic tests. The
/// timeout cannot interrupt the job; it is checked once the job returns,
/// and an overrun discards the result and delivers
/// [`SelectError::Timeout`]. The outcome is delivered before
/// `submit_with` returns.
///
/// `max_in_flight` and the thread settings of [`WorkerConfig`] are ignored.
pub struct InlineWorkerExecutor {
    config: WorkerConfig,
    clock: Arc<dyn Clock>,
    closed: AtomicBool,
    running: AtomicUsize,
}

impl InlineWorkerExecutor {
    /// Creates an executor after validating `config`.
    pub fn new(config: WorkerConfig) -> SelectResult<Self> {
        config.validate().map_err(SelectError::config)?;
        Ok(Self {
            config,
            clock: Arc::new(MonotonicClock::new()),
            closed: AtomicBool::new(false),
            running: AtomicUsize::new(0),
        })
    }

    /// Replaces the clock used to measure run time and enforce timeouts.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Rejects further submissions. Idempotent.
    pub fn shutdown(&self) {
        if !self.closed.swap(true, Ordering::SeqCst) {
            debug!("inline worker shut down");
        }
    }

    /// Number of jobs currently running on some caller's thread.
    pub fn in_flight(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for InlineWorkerExecutor {
    fn default() -> Self {
        Self {
            config: WorkerConfig::default(),
            clock: Arc::new(MonotonicClock::new()),
            closed: AtomicBool::new(false),
            running: AtomicUsize::new(0),
        }
    }
}

impl<I, O> WorkerExecutor<I, O> for InlineWorkerExecutor {
    fn submit_with(
        &self,
        strategy: BoundStrategy<I, O>,
        input: I,
        timeout: Option<Duration>,
        on_complete: Completion<O>,
    ) {
        let name = strategy.name().to_string();
        if self.closed.load(Ordering::SeqCst) {
            on_complete(Err(SelectError::WorkerShutdown { strategy: name }));
            return;
        }
        let timeout = timeout.unwrap_or(self.config.default_timeout);

        self.running.fetch_add(1, Ordering::SeqCst);
        let start = self.clock.now_micros();
        let result = panic::catch_unwind(AssertUnwindSafe(|| strategy.execute_raw(&input)));
        let elapsed_micros = self.clock.now_micros().saturating_sub(start);
        self.running.fetch_sub(1, Ordering::SeqCst);

        let outcome = match result {
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                debug!(strategy = %name, %message, "worker crashed");
                Err(SelectError::WorkerCrashed {
                    strategy: name,
                    message,
                })
            }
            Ok(_) if u128::from(elapsed_micros) > timeout.as_micros() => {
                debug!(strategy = %name, ?timeout, elapsed_micros, "worker timed out");
                Err(SelectError::Timeout {
                    strategy: name,
                    timeout,
                })
            }
            Ok(output) => Ok(Execution {
                output,
                metadata: strategy.metadata().clone(),
                elapsed_micros,
            }),
        };
        on_complete(outcome);
    }

    fn shutdown(&self) {
        InlineWorkerExecutor::shutdown(self)
    }

    fn in_flight(&self) -> usize {
        InlineWorkerExecutor::in_flight(self)
    }
}

impl std::fmt::Debug for InlineWorkerExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InlineWorkerExecutor")
            .field("config", &self.config)
            .field("closed", &self.closed.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::execution::ManualClock;
    use crate::metadata::{AlgoMetadata, TimeComplexity};
    use crate::strategy::FnStrategy;

    fn doubler() -> BoundStrategy<u32, u32> {
        BoundStrategy::new(FnStrategy::new(
            AlgoMetadata::new("doubler", TimeComplexity::Constant),
            |x: &u32| x * 2,
        ))
    }

    #[test]
    fn test_success_delivered_before_return() {
        let workers = InlineWorkerExecutor::default();
        let mut ticket = workers.submit(doubler(), 21, None);
        assert_eq!(ticket.try_take().unwrap().unwrap().output, 42);
        assert_eq!(workers.in_flight(), 0);
    }

    #[test]
    fn test_overrun_is_timeout() {
        // Each reading advances 2ms, so the job appears to take 2ms.
        let workers =
            InlineWorkerExecutor::default().with_clock(Arc::new(ManualClock::with_step(2_000)));

        let err = workers
            .submit(doubler(), 1, Some(Duration::from_millis(1)))
            .wait()
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Timeout);

        let ok = workers
            .submit(doubler(), 1, Some(Duration::from_millis(3)))
            .wait()
            .unwrap();
        assert_eq!(ok.elapsed_micros, 2_000);
    }

    #[test]
    fn test_panic_is_crash() {
        let workers = InlineWorkerExecutor::default();
        let broken = BoundStrategy::new(FnStrategy::new(
            AlgoMetadata::new("broken", TimeComplexity::Constant),
            |_: &u32| -> u32 { panic!("nope") },
        ));
        let err = workers.submit(broken, 0, None).wait().unwrap_err();
        assert_eq!(err.kind(), FailureKind::WorkerCrashed);
    }

    #[test]
    fn test_shutdown_rejects() {
        let workers = InlineWorkerExecutor::default();
        workers.shutdown();
        workers.shutdown();
        let err = workers.submit(doubler(), 1, None).wait().unwrap_err();
        assert_eq!(err.kind(), FailureKind::WorkerShutdown);
    }
}
