//! Isolated execution with timeouts.
//!
//! [`WorkerExecutor`] is the port; two adapters implement it:
//!
//! - [`ThreadWorkerExecutor`]: one OS thread per job plus a watchdog that
//!   enforces the timeout and reacts to shutdown
//! - [`InlineWorkerExecutor`]: synchronous fallback that checks the timeout
//!   after the fact
//!
//! Submissions resolve to exactly one [`ExecuteOutcome`], delivered through a
//! callback or collected with a [`WorkerTicket`].
//!
//! [`ExecuteOutcome`]: crate::execution::ExecuteOutcome

mod config;
mod inline;
mod thread;
mod types;

pub use config::WorkerConfig;
pub use inline::InlineWorkerExecutor;
pub use thread::ThreadWorkerExecutor;
pub use types::{Completion, WorkerExecutor, WorkerTicket};
