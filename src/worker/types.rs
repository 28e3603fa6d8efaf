//! The worker port and its completion handle.

use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, RecvTimeoutError, TryRecvError};

use crate::error::SelectError;
use crate::execution::{BoundStrategy, ExecuteOutcome};

/// Callback receiving the single outcome of a submission.
pub type Completion<O> = Box<dyn FnOnce(ExecuteOutcome<O>) + Send + 'static>;

/// Port for executing a strategy in isolation, bounded by a timeout.
///
/// Every submission produces exactly one outcome: success, a typed failure
/// ([`Timeout`], [`WorkerCrashed`], [`WorkerShutdown`], [`WorkerSaturated`]),
/// never both and never none.
///
/// [`Timeout`]: SelectError::Timeout
/// [`WorkerCrashed`]: SelectError::WorkerCrashed
/// [`WorkerShutdown`]: SelectError::WorkerShutdown
/// [`WorkerSaturated`]: SelectError::WorkerSaturated
pub trait WorkerExecutor<I, O>: Send + Sync {
    /// Submits a job and arranges for `on_complete` to be called once with
    /// its outcome. `timeout == None` uses the executor's default.
    ///
    /// Rejections (shutdown, saturation) are delivered through
    /// `on_complete` as well.
    fn submit_with(
        &self,
        strategy: BoundStrategy<I, O>,
        input: I,
        timeout: Option<Duration>,
        on_complete: Completion<O>,
    );

    /// Submits a job and returns a handle to wait on.
    fn submit(
        &self,
        strategy: BoundStrategy<I, O>,
        input: I,
        timeout: Option<Duration>,
    ) -> WorkerTicket<O>
    where
        O: Send + 'static,
    {
        let (tx, rx) = bounded(1);
        let name = strategy.name().to_string();
        self.submit_with(
            strategy,
            input,
            timeout,
            Box::new(move |outcome| {
                // The ticket may already be gone.
                let _ = tx.send(outcome);
            }),
        );
        WorkerTicket::new(name, rx)
    }

    /// Cancels in-flight jobs and rejects further submissions. Idempotent.
    fn shutdown(&self);

    /// Number of jobs whose outcome has not been delivered yet.
    fn in_flight(&self) -> usize;
}

/// Handle for the outcome of one submission.
#[derive(Debug)]
pub struct WorkerTicket<O> {
    strategy: String,
    rx: Receiver<ExecuteOutcome<O>>,
    taken: bool,
}

impl<O> WorkerTicket<O> {
    pub(crate) fn new(strategy: String, rx: Receiver<ExecuteOutcome<O>>) -> Self {
        Self {
            strategy,
            rx,
            taken: false,
        }
    }

    /// Name of the submitted strategy.
    pub fn strategy_name(&self) -> &str {
        &self.strategy
    }

    /// Blocks until the outcome arrives.
    pub fn wait(mut self) -> ExecuteOutcome<O> {
        if self.taken {
            return Err(self.lost());
        }
        self.taken = true;
        self.rx.recv().unwrap_or_else(|_| Err(self.lost()))
    }

    /// Waits at most `timeout` for the outcome.
    ///
    /// Returns `None` if it has not arrived yet, or was already taken.
    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<ExecuteOutcome<O>> {
        if self.taken {
            return None;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.taken = true;
                Some(outcome)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                self.taken = true;
                Some(Err(self.lost()))
            }
        }
    }

    /// Takes the outcome if it has already arrived.
    pub fn try_take(&mut self) -> Option<ExecuteOutcome<O>> {
        if self.taken {
            return None;
        }
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.taken = true;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.taken = true;
                Some(Err(self.lost()))
            }
        }
    }

    fn lost(&self) -> SelectError {
        SelectError::WorkerCrashed {
            strategy: self.strategy.clone(),
            message: "worker dropped the job without an outcome".to_string(),
        }
    }
}
