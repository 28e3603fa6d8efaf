//! Core trait for strategies.

use std::sync::Arc;

use crate::hint::SelectorHint;
use crate::metadata::AlgoMetadata;

/// A registered strategy, shared between the catalog, executors and workers.
pub type SharedStrategy<I, O> = Arc<dyn Strategy<I, O>>;

/// One interchangeable implementation of an operation from `I` to `O`.
///
/// A strategy exposes exactly three things: its declared metadata, an
/// applicability check, and execution. Concrete algorithms are independent
/// implementations of this trait; there is no hierarchy between them.
///
/// # Contract
///
/// - [`can_apply`](Strategy::can_apply) must be free of side effects.
/// - [`execute`](Strategy::execute) must be a pure function of its input:
///   no hidden global state, so that repeated selections stay deterministic.
/// - A panic inside `execute` is a fault; the engine captures it and reports
///   it as a failure instead of unwinding into the caller.
///
/// # Examples
///
/// ```
/// use u_algoselect::hint::SelectorHint;
/// use u_algoselect::metadata::{AlgoMetadata, TimeComplexity};
/// use u_algoselect::strategy::Strategy;
///
/// struct Reverse {
///     meta: AlgoMetadata,
/// }
///
/// impl Strategy<Vec<i32>, Vec<i32>> for Reverse {
///     fn metadata(&self) -> &AlgoMetadata {
///         &self.meta
///     }
///
///     fn execute(&self, input: &Vec<i32>) -> Vec<i32> {
///         input.iter().rev().copied().collect()
///     }
/// }
///
/// let s = Reverse { meta: AlgoMetadata::new("reverse", TimeComplexity::Linear) };
/// assert!(s.can_apply(&vec![1, 2], &SelectorHint::default()));
/// assert_eq!(s.execute(&vec![1, 2]), vec![2, 1]);
/// ```
pub trait Strategy<I, O>: Send + Sync {
    /// Declared complexity and capabilities.
    fn metadata(&self) -> &AlgoMetadata;

    /// Whether this strategy can correctly handle `input` given `hint`.
    ///
    /// The default accepts everything.
    fn can_apply(&self, _input: &I, _hint: &SelectorHint) -> bool {
        true
    }

    /// Runs the algorithm.
    fn execute(&self, input: &I) -> O;

    /// Shorthand for `self.metadata().name()`.
    fn name(&self) -> &str {
        self.metadata().name()
    }
}
