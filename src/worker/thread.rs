//! Thread-per-job worker executor with a watchdog.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam::channel::{bounded, Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

use super::config::WorkerConfig;
use super::types::{Completion, WorkerExecutor};
use crate::error::{panic_message, SelectError, SelectResult};
use crate::execution::{BoundStrategy, Clock, ExecuteOutcome, Execution, MonotonicClock};

/// Hands an outcome to the submitter at most once.
struct Reply<O> {
    slot: Mutex<Option<Completion<O>>>,
}

impl<O> Reply<O> {
    fn new(on_complete: Completion<O>) -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(Some(on_complete)),
        })
    }

    fn deliver(&self, outcome: ExecuteOutcome<O>) {
        let callback = self.slot.lock().take();
        if let Some(callback) = callback {
            callback(outcome);
        }
    }
}

/// State shared between the executor and its watchdogs.
#[derive(Default)]
struct Registry {
    /// Cancellation handle of every job whose outcome is still pending.
    /// Dropping a sender cancels its job.
    jobs: Mutex<HashMap<u64, Sender<()>>>,
    next_id: AtomicU64,
    closed: AtomicBool,
    /// Job threads that have not returned yet, detached ones included.
    live: Mutex<usize>,
    idle: Condvar,
}

impl Registry {
    fn live_threads(&self) -> usize {
        *self.live.lock()
    }
}

/// Counts one job thread as live until dropped.
///
/// Moved into the job closure, so it is released when the thread returns or
/// when the closure is dropped because the thread never started.
struct LiveGuard {
    registry: Arc<Registry>,
}

impl LiveGuard {
    fn new(registry: Arc<Registry>) -> Self {
        *registry.live.lock() += 1;
        Self { registry }
    }
}

impl Drop for LiveGuard {
    fn drop(&mut self) {
        let mut live = self.registry.live.lock();
        *live = live.saturating_sub(1);
        if *live == 0 {
            self.registry.idle.notify_all();
        }
    }
}

/// Runs each job on its own OS thread, supervised by a watchdog thread.
///
/// The watchdog waits for the first of: the job finishing, the executor
/// shutting down, or the timeout expiring, and delivers exactly one outcome.
///
/// A job that overruns its timeout is **detached**, not killed: the
/// submitter gets [`SelectError::Timeout`] immediately, every resource the
/// executor tracks for the job is released, and whatever the thread
/// eventually produces is discarded. Safe Rust offers no way to stop a
/// running thread, so strategies meant for this executor should terminate.
/// Detached threads still count against `max_in_flight` until they return;
/// [`detached`](Self::detached) reports them and
/// [`wait_idle`](Self::wait_idle) waits for them.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_algoselect::execution::BoundStrategy;
/// use u_algoselect::metadata::{AlgoMetadata, TimeComplexity};
/// use u_algoselect::strategy::FnStrategy;
/// use u_algoselect::worker::{ThreadWorkerExecutor, WorkerExecutor};
///
/// let sum = BoundStrategy::new(FnStrategy::new(
///     AlgoMetadata::new("sum", TimeComplexity::Linear),
///     |v: &Vec<u64>| v.iter().sum::<u64>(),
/// ));
///
/// let workers = ThreadWorkerExecutor::default();
/// let ticket = workers.submit(sum, vec![1, 2, 3], Some(Duration::from_secs(1)));
/// assert_eq!(ticket.wait().unwrap().output, 6);
/// ```
pub struct ThreadWorkerExecutor {
    config: WorkerConfig,
    clock: Arc<dyn Clock>,
    registry: Arc<Registry>,
}

impl ThreadWorkerExecutor {
    /// Creates an executor after validating `config`.
    pub fn new(config: WorkerConfig) -> SelectResult<Self> {
        config.validate().map_err(SelectError::config)?;
        Ok(Self {
            config,
            clock: Arc::new(MonotonicClock::new()),
            registry: Arc::new(Registry::default()),
        })
    }

    /// Replaces the clock used to measure job run time.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shut_down(&self) -> bool {
        self.registry.closed.load(Ordering::SeqCst)
    }

    /// Cancels every pending job and rejects further submissions.
    ///
    /// Each cancelled job receives exactly one [`SelectError::WorkerShutdown`].
    /// Calling it again has no effect. Job threads still running are
    /// detached; use [`wait_idle`](Self::wait_idle) to wait for them.
    pub fn shutdown(&self) {
        let drained: Vec<Sender<()>> = {
            let mut jobs = self.registry.jobs.lock();
            if self.registry.closed.swap(true, Ordering::SeqCst) {
                return;
            }
            jobs.drain().map(|(_, tx)| tx).collect()
        };
        let running = self.running();
        if running > 0 {
            warn!(
                cancelled = drained.len(),
                running,
                "worker pool shut down with job threads still running"
            );
        } else {
            debug!(cancelled = drained.len(), "worker pool shut down");
        }
    }

    /// Number of jobs whose outcome has not been delivered yet.
    pub fn in_flight(&self) -> usize {
        self.registry.jobs.lock().len()
    }

    /// Number of job threads that have not returned, whether or not their
    /// outcome was delivered.
    pub fn running(&self) -> usize {
        self.registry.live_threads()
    }

    /// Number of job threads still running after their outcome was
    /// delivered (timed out or cancelled).
    pub fn detached(&self) -> usize {
        let jobs = self.registry.jobs.lock();
        self.registry.live_threads().saturating_sub(jobs.len())
    }

    /// Blocks until every job thread has returned or `timeout` elapses.
    ///
    /// Returns `true` if no job thread is left running.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut live = self.registry.live.lock();
        while *live > 0 {
            if self.registry.idle.wait_until(&mut live, deadline).timed_out() {
                return *live == 0;
            }
        }
        true
    }

    /// Files a new job, or explains why it cannot run.
    ///
    /// The limit counts pending jobs and job threads still running, so a
    /// timed-out job keeps its share until its thread returns.
    fn admit(&self, strategy: &str) -> Result<(u64, Receiver<()>, LiveGuard), SelectError> {
        let mut jobs = self.registry.jobs.lock();
        if self.registry.closed.load(Ordering::SeqCst) {
            return Err(SelectError::WorkerShutdown {
                strategy: strategy.to_string(),
            });
        }
        if let Some(limit) = self.config.max_in_flight {
            let busy = jobs.len().max(self.registry.live_threads());
            if busy >= limit {
                return Err(SelectError::WorkerSaturated {
                    strategy: strategy.to_string(),
                    limit,
                });
            }
        }
        let id = self.registry.next_id.fetch_add(1, Ordering::SeqCst);
        let (cancel_tx, cancel_rx) = bounded(1);
        jobs.insert(id, cancel_tx);
        Ok((id, cancel_rx, LiveGuard::new(Arc::clone(&self.registry))))
    }

    fn thread_builder(&self, name: String) -> thread::Builder {
        let builder = thread::Builder::new().name(name);
        match self.config.stack_size {
            Some(bytes) => builder.stack_size(bytes),
            None => builder,
        }
    }
}

impl Default for ThreadWorkerExecutor {
    fn default() -> Self {
        Self {
            config: WorkerConfig::default(),
            clock: Arc::new(MonotonicClock::new()),
            registry: Arc::new(Registry::default()),
        }
    }
}

impl<I, O> WorkerExecutor<I, O> for ThreadWorkerExecutor
where
    I: Send + 'static,
    O: Send + 'static,
{
    fn submit_with(
        &self,
        strategy: BoundStrategy<I, O>,
        input: I,
        timeout: Option<Duration>,
        on_complete: Completion<O>,
    ) {
        let name = strategy.name().to_string();
        let timeout = timeout.unwrap_or(self.config.default_timeout);
        let reply = Reply::new(on_complete);

        let (id, cancel_rx, live) = match self.admit(&name) {
            Ok(admitted) => admitted,
            Err(rejection) => {
                debug!(strategy = %name, error = %rejection, "worker submission rejected");
                reply.deliver(Err(rejection));
                return;
            }
        };

        let (done_tx, done_rx) = bounded::<(Result<O, String>, u64)>(1);

        let watchdog = {
            let registry = Arc::clone(&self.registry);
            let reply = Arc::clone(&reply);
            let metadata = strategy.metadata().clone();
            let name = name.clone();
            move || {
                let outcome = crossbeam::select! {
                    recv(done_rx) -> msg => match msg {
                        Ok((Ok(output), elapsed_micros)) => Ok(Execution {
                            output,
                            metadata,
                            elapsed_micros,
                        }),
                        Ok((Err(message), _)) => {
                            debug!(job = id, strategy = %name, %message, "worker crashed");
                            Err(SelectError::WorkerCrashed { strategy: name.clone(), message })
                        }
                        Err(_) => Err(SelectError::WorkerCrashed {
                            strategy: name.clone(),
                            message: "worker exited without a result".to_string(),
                        }),
                    },
                    recv(cancel_rx) -> _ => Err(SelectError::WorkerShutdown {
                        strategy: name.clone(),
                    }),
                    default(timeout) => {
                        debug!(job = id, strategy = %name, ?timeout, "worker timed out");
                        Err(SelectError::Timeout { strategy: name.clone(), timeout })
                    }
                };
                registry.jobs.lock().remove(&id);
                reply.deliver(outcome);
            }
        };

        let prefix = &self.config.thread_name_prefix;
        if let Err(e) = self
            .thread_builder(format!("{prefix}-watchdog-{id}"))
            .spawn(watchdog)
        {
            self.registry.jobs.lock().remove(&id);
            reply.deliver(Err(SelectError::WorkerCrashed {
                strategy: name,
                message: format!("failed to spawn watchdog: {e}"),
            }));
            return;
        }

        let clock = Arc::clone(&self.clock);
        let job = move || {
            let start = clock.now_micros();
            let result = panic::catch_unwind(AssertUnwindSafe(|| strategy.execute_raw(&input)))
                .map_err(|payload| panic_message(payload.as_ref()));
            let elapsed = clock.now_micros().saturating_sub(start);
            // Must precede the send: whoever sees the outcome may resubmit.
            drop(live);
            // The watchdog is gone if the job timed out or was cancelled.
            let _ = done_tx.send((result, elapsed));
        };

        // On spawn failure the job closure, and with it `done_tx`, is
        // dropped; the watchdog then reports the crash.
        match self.thread_builder(format!("{prefix}-{id}")).spawn(job) {
            Ok(_) => debug!(job = id, strategy = %name, ?timeout, "worker spawned"),
            Err(e) => debug!(job = id, strategy = %name, error = %e, "worker spawn failed"),
        }
    }

    fn shutdown(&self) {
        ThreadWorkerExecutor::shutdown(self)
    }

    fn in_flight(&self) -> usize {
        ThreadWorkerExecutor::in_flight(self)
    }
}

impl Drop for ThreadWorkerExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ThreadWorkerExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadWorkerExecutor")
            .field("config", &self.config)
            .field("in_flight", &self.in_flight())
            .field("running", &self.running())
            .field("closed", &self.is_shut_down())
            .finish()
    }
}
