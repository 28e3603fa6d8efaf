//! Selection-and-execution paths.
//!
//! - [`ExecuteStrategyUseCase`]: ranked path (lookup → filter → rank → execute)
//! - [`DirectExecutor`]: named path, no ranking
//! - [`BoundStrategy`]: pre-resolved handle, no lookup
//! - [`Clock`]: injected time source for elapsed-time measurement
//! - [`SampleStats`]: optional timing collector
//!
//! Every path returns an [`ExecuteOutcome`]; strategy panics are captured and
//! reported as failures.

mod clock;
mod direct;
mod outcome;
mod stats;
mod use_case;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use direct::{BoundStrategy, DirectExecutor};
pub use outcome::{ExecuteOutcome, Execution};
pub use stats::{SampleStats, SampleSummary};
pub use use_case::{ExecuteStrategyUseCase, ExecutionStage, RankedStrategy, Selection};
