//! Fast paths that bypass ranking.
//!
//! - [`DirectExecutor`]: run a strategy by name, skipping ranking
//! - [`BoundStrategy`]: a strategy resolved once and called repeatedly with
//!   no lookup at all

use std::fmt;
use std::sync::Arc;

use super::clock::{Clock, MonotonicClock};
use super::outcome::{run_timed, ExecuteOutcome};
use crate::catalog::StrategyCatalog;
use crate::error::SelectResult;
use crate::metadata::{AlgoMetadata, OperationKind};
use crate::strategy::{SharedStrategy, Strategy};

/// Executes a named strategy without consulting the policy.
///
/// Produces the same result as the ranked path would when the ranked path
/// selects the same strategy.
pub struct DirectExecutor<'a> {
    catalog: &'a StrategyCatalog,
    clock: &'a dyn Clock,
}

impl<'a> DirectExecutor<'a> {
    /// Creates an executor over `catalog`.
    pub fn new(catalog: &'a StrategyCatalog, clock: &'a dyn Clock) -> Self {
        Self { catalog, clock }
    }

    /// Runs the strategy named `name` registered under `(kind, I, O)`.
    ///
    /// Fails with [`StrategyNotFound`](crate::SelectError::StrategyNotFound)
    /// if no such strategy is registered. `can_apply` is not consulted.
    pub fn execute<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        name: &str,
        input: &I,
    ) -> ExecuteOutcome<O> {
        let strategy = self.catalog.by_name::<I, O>(kind, name)?;
        run_timed(strategy.as_ref(), input, self.clock)
    }

    /// Resolves `name` once for repeated calls.
    pub fn bind<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        name: &str,
    ) -> SelectResult<BoundStrategy<I, O>> {
        BoundStrategy::from_catalog(self.catalog, kind, name)
    }
}

/// A strategy handle with no lookup on the call path.
///
/// Cloning is cheap; clones share the strategy.
///
/// # Examples
///
/// ```
/// use u_algoselect::execution::BoundStrategy;
/// use u_algoselect::metadata::{AlgoMetadata, TimeComplexity};
/// use u_algoselect::strategy::FnStrategy;
///
/// let len = BoundStrategy::new(FnStrategy::new(
///     AlgoMetadata::new("len", TimeComplexity::Constant),
///     |s: &String| s.len(),
/// ));
///
/// assert_eq!(len.execute_raw(&"abc".to_string()), 3);
/// assert_eq!(len.execute(&"hello".to_string()).unwrap().output, 5);
/// ```
pub struct BoundStrategy<I, O> {
    strategy: SharedStrategy<I, O>,
}

impl<I, O> Clone for BoundStrategy<I, O> {
    fn clone(&self) -> Self {
        Self {
            strategy: Arc::clone(&self.strategy),
        }
    }
}

impl<I: 'static, O: 'static> BoundStrategy<I, O> {
    /// Binds a strategy value.
    pub fn new<S: Strategy<I, O> + 'static>(strategy: S) -> Self {
        Self {
            strategy: Arc::new(strategy),
        }
    }

    /// Binds an already shared strategy.
    pub fn from_shared(strategy: SharedStrategy<I, O>) -> Self {
        Self { strategy }
    }

    /// Binds the strategy named `name` under `(kind, I, O)`.
    pub fn from_catalog(
        catalog: &StrategyCatalog,
        kind: OperationKind,
        name: &str,
    ) -> SelectResult<Self> {
        catalog
            .by_name::<I, O>(kind, name)
            .map(|s| Self::from_shared(Arc::clone(s)))
    }
}

impl<I, O> BoundStrategy<I, O> {
    /// Metadata of the bound strategy.
    pub fn metadata(&self) -> &AlgoMetadata {
        self.strategy.metadata()
    }

    /// Name of the bound strategy.
    pub fn name(&self) -> &str {
        self.strategy.name()
    }

    /// The shared strategy behind this handle.
    pub fn shared(&self) -> &SharedStrategy<I, O> {
        &self.strategy
    }

    /// Runs the strategy, timed with a monotonic clock and with panics
    /// reported as failures.
    pub fn execute(&self, input: &I) -> ExecuteOutcome<O> {
        self.execute_with_clock(input, &MonotonicClock::new())
    }

    /// Runs the strategy, timed with `clock`.
    pub fn execute_with_clock(&self, input: &I, clock: &dyn Clock) -> ExecuteOutcome<O> {
        run_timed(self.strategy.as_ref(), input, clock)
    }

    /// Calls the strategy directly: no timing and no panic capture.
    #[inline]
    pub fn execute_raw(&self, input: &I) -> O {
        self.strategy.execute(input)
    }
}

impl<I, O> fmt::Debug for BoundStrategy<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundStrategy")
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::execution::{ExecuteStrategyUseCase, ManualClock};
    use crate::hint::SelectorHint;
    use crate::metadata::TimeComplexity;
    use crate::ranking::SelectorPolicy;
    use crate::strategy::FnStrategy;

    type Words = Vec<String>;

    fn catalog() -> StrategyCatalog {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(
                OperationKind::StringProcessing,
                FnStrategy::new(
                    AlgoMetadata::new("upper", TimeComplexity::Linear),
                    |w: &Words| w.iter().map(|s| s.to_uppercase()).collect::<Words>(),
                ),
            )
            .unwrap();
        catalog
            .register(
                OperationKind::StringProcessing,
                FnStrategy::new(
                    AlgoMetadata::new("lower", TimeComplexity::Linear),
                    |w: &Words| w.iter().map(|s| s.to_lowercase()).collect::<Words>(),
                ),
            )
            .unwrap();
        catalog
    }

    fn words() -> Words {
        vec!["Ab".to_string(), "cD".to_string()]
    }

    #[test]
    fn test_direct_runs_named_strategy() {
        let catalog = catalog();
        let clock = ManualClock::with_step(2);
        let direct = DirectExecutor::new(&catalog, &clock);

        let exec = direct
            .execute::<Words, Words>(OperationKind::StringProcessing, "lower", &words())
            .unwrap();
        assert_eq!(exec.output, vec!["ab".to_string(), "cd".to_string()]);
        assert_eq!(exec.strategy_name(), "lower");
        assert_eq!(exec.elapsed_micros, 2);
    }

    #[test]
    fn test_direct_unknown_name() {
        let catalog = catalog();
        let clock = ManualClock::new();
        let direct = DirectExecutor::new(&catalog, &clock);

        let err = direct
            .execute::<Words, Words>(OperationKind::StringProcessing, "reverse", &words())
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::StrategyNotFound);
    }

    #[test]
    fn test_direct_matches_ranked() {
        let catalog = catalog();
        let clock = ManualClock::new();
        let policy = SelectorPolicy::default();
        let ranked = ExecuteStrategyUseCase::new(&catalog, &policy, &clock)
            .execute::<Words, Words>(
                OperationKind::StringProcessing,
                &words(),
                &SelectorHint::default(),
            )
            .unwrap();
        let direct = DirectExecutor::new(&catalog, &clock)
            .execute::<Words, Words>(
                OperationKind::StringProcessing,
                ranked.strategy_name(),
                &words(),
            )
            .unwrap();

        assert_eq!(ranked.strategy_name(), "upper");
        assert_eq!(ranked.output, direct.output);
        assert_eq!(ranked.metadata, direct.metadata);
    }

    #[test]
    fn test_bound_reuses_resolution() {
        let catalog = catalog();
        let clock = ManualClock::new();
        let bound = DirectExecutor::new(&catalog, &clock)
            .bind::<Words, Words>(OperationKind::StringProcessing, "upper")
            .unwrap();
        let copy = bound.clone();

        assert_eq!(bound.name(), "upper");
        assert_eq!(copy.metadata().time_complexity(), TimeComplexity::Linear);
        assert!(Arc::ptr_eq(bound.shared(), copy.shared()));
        assert_eq!(bound.execute_raw(&words()), vec!["AB".to_string(), "CD".to_string()]);
        assert_eq!(copy.execute(&words()).unwrap().output, bound.execute_raw(&words()));
    }

    #[test]
    fn test_bound_unknown_name() {
        let catalog = catalog();
        let err =
            BoundStrategy::<Words, Words>::from_catalog(&catalog, OperationKind::Sort, "upper")
                .unwrap_err();
        assert_eq!(err.kind(), FailureKind::StrategyNotFound);
    }

    #[test]
    fn test_bound_captures_panic() {
        let bound = BoundStrategy::new(FnStrategy::new(
            AlgoMetadata::new("boom", TimeComplexity::Constant),
            |_: &u8| -> u8 { panic!("boom") },
        ));
        let err = bound.execute_with_clock(&1, &ManualClock::new()).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ExecutionFailure);
    }
}
