//! Metadata-driven algorithm selection.
//!
//! Register several interchangeable implementations ("strategies") of an
//! operation, describe each with declared complexity metadata, and let the
//! engine pick one per call from caller-supplied hints about the data:
//!
//! - **Catalog**: typed registry of strategies keyed by operation kind and
//!   input/output types; I/O mismatches are compile errors.
//! - **Ranking**: table-driven complexity ranks plus hint-aware adjustments
//!   for input size, memory budget, sortedness and stability, with
//!   deterministic tie-breaking.
//! - **Execution**: ranked path (lookup, filter, rank, run), direct path by
//!   name, and pre-bound handles with no lookup at all. Strategy panics are
//!   reported as typed failures.
//! - **Workers**: isolated execution under a timeout, with shutdown and
//!   bounded concurrency.
//! - **Builtins**: reference sorting and searching plug-ins.
//!
//! # Architecture
//!
//! Selection is purely static: it reads declared metadata and hints, never
//! measured run times. The catalog is an explicit value, registered during
//! wiring and read-only afterwards, so selection needs no locking.
//!
//! # Example
//!
//! ```
//! use u_algoselect::{AlgoSelector, SelectorHint};
//!
//! let selector = AlgoSelector::with_builtins::<u32>().unwrap();
//! let exec = selector
//!     .sort::<u32>((0..5_000).rev().collect(), &SelectorHint::default())
//!     .unwrap();
//!
//! assert_eq!(exec.output[0], 0);
//! assert_eq!(exec.strategy_name(), "merge");
//! ```

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod execution;
pub mod facade;
pub mod hint;
pub mod metadata;
pub mod ranking;
pub mod strategy;
pub mod worker;

pub use catalog::StrategyCatalog;
pub use error::{FailureKind, SelectError, SelectResult};
pub use execution::{BoundStrategy, ExecuteOutcome, Execution};
pub use facade::AlgoSelector;
pub use hint::SelectorHint;
pub use metadata::{AlgoMetadata, OperationKind, TimeComplexity};
pub use ranking::{PolicyConfig, SelectorPolicy};
pub use strategy::{FnStrategy, Strategy};
