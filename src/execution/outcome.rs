//! Execution results and the guarded, timed call shared by every path.

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use super::clock::Clock;
use crate::error::{panic_message, SelectError, SelectResult};
use crate::metadata::AlgoMetadata;
use crate::strategy::Strategy;

/// A successful execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Execution<O> {
    /// The strategy's output.
    pub output: O,

    /// Metadata of the strategy that ran.
    pub metadata: AlgoMetadata,

    /// Wall time spent inside `execute`, in microseconds.
    pub elapsed_micros: u64,
}

impl<O> Execution<O> {
    /// Name of the strategy that ran.
    pub fn strategy_name(&self) -> &str {
        self.metadata.name()
    }

    /// Discards the metadata and timing.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Transforms the output, keeping metadata and timing.
    pub fn map<U>(self, f: impl FnOnce(O) -> U) -> Execution<U> {
        Execution {
            output: f(self.output),
            metadata: self.metadata,
            elapsed_micros: self.elapsed_micros,
        }
    }
}

/// Success or typed failure of one execution request.
///
/// Callers must branch on it; there is no default value.
pub type ExecuteOutcome<O> = SelectResult<Execution<O>>;

/// Runs `strategy` on `input`, timing it with `clock` and converting a
/// panic into [`SelectError::ExecutionFailure`].
pub(crate) fn run_timed<I, O, S>(
    strategy: &S,
    input: &I,
    clock: &dyn Clock,
) -> ExecuteOutcome<O>
where
    S: Strategy<I, O> + ?Sized,
{
    let start = clock.now_micros();
    let result = panic::catch_unwind(AssertUnwindSafe(|| strategy.execute(input)));
    let elapsed_micros = clock.now_micros().saturating_sub(start);

    match result {
        Ok(output) => Ok(Execution {
            output,
            metadata: strategy.metadata().clone(),
            elapsed_micros,
        }),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(strategy = strategy.name(), %message, "execution failed");
            Err(SelectError::ExecutionFailure {
                strategy: strategy.name().to_string(),
                message,
            })
        }
    }
}
