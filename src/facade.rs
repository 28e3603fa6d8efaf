//! One-stop entry point owning a catalog, a policy and a clock.

use std::sync::Arc;
use std::time::Duration;

use crate::builtin::{self, SearchQuery, SortElement};
use crate::catalog::StrategyCatalog;
use crate::error::SelectResult;
use crate::execution::{
    BoundStrategy, Clock, DirectExecutor, ExecuteOutcome, ExecuteStrategyUseCase, MonotonicClock,
    Selection,
};
use crate::hint::SelectorHint;
use crate::metadata::OperationKind;
use crate::ranking::SelectorPolicy;
use crate::strategy::Strategy;
use crate::worker::{WorkerExecutor, WorkerTicket};

/// Convenience wrapper over [`StrategyCatalog`], [`SelectorPolicy`] and
/// the execution paths.
///
/// Register strategies while holding it mutably, then share it by `&` or
/// `Arc` and call it from any number of threads.
///
/// # Examples
///
/// ```
/// use u_algoselect::{AlgoSelector, SelectorHint};
///
/// let selector = AlgoSelector::with_builtins::<i32>().unwrap();
///
/// let small = selector.sort(vec![3, 1, 2], &SelectorHint::from_len(3)).unwrap();
/// assert_eq!(small.output, vec![1, 2, 3]);
/// assert_eq!(small.strategy_name(), "insertion");
///
/// let found = selector
///     .search(vec![1, 4, 9], 9, &SelectorHint::default().with_sorted(true))
///     .unwrap();
/// assert_eq!(found.output, Some(2));
/// assert_eq!(found.strategy_name(), "binary");
/// ```
pub struct AlgoSelector {
    catalog: StrategyCatalog,
    policy: SelectorPolicy,
    clock: Arc<dyn Clock>,
}

impl AlgoSelector {
    /// An empty selector with the default policy and a monotonic clock.
    pub fn new() -> Self {
        Self {
            catalog: StrategyCatalog::new(),
            policy: SelectorPolicy::default(),
            clock: Arc::new(MonotonicClock::new()),
        }
    }

    /// A selector with every reference plug-in registered for `T`.
    pub fn with_builtins<T: SortElement>() -> SelectResult<Self> {
        let mut selector = Self::new();
        builtin::register_all::<T>(&mut selector.catalog)?;
        Ok(selector)
    }

    /// Replaces the ranking policy.
    pub fn with_policy(mut self, policy: SelectorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replaces the clock used to time executions.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The strategy catalog.
    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    /// Mutable access for wiring, e.g. [`builtin::register_sorting`].
    pub fn catalog_mut(&mut self) -> &mut StrategyCatalog {
        &mut self.catalog
    }

    /// The active ranking policy.
    pub fn policy(&self) -> &SelectorPolicy {
        &self.policy
    }

    /// See [`StrategyCatalog::register`].
    pub fn register<I, O, S>(&mut self, kind: OperationKind, strategy: S) -> SelectResult<()>
    where
        I: 'static,
        O: 'static,
        S: Strategy<I, O> + 'static,
    {
        self.catalog.register(kind, strategy)
    }

    /// See [`StrategyCatalog::register_or_replace`].
    pub fn register_or_replace<I, O, S>(&mut self, kind: OperationKind, strategy: S) -> bool
    where
        I: 'static,
        O: 'static,
        S: Strategy<I, O> + 'static,
    {
        self.catalog.register_or_replace(kind, strategy)
    }

    fn use_case(&self) -> ExecuteStrategyUseCase<'_> {
        ExecuteStrategyUseCase::new(&self.catalog, &self.policy, self.clock.as_ref())
    }

    /// Ranked path: selects and runs the best strategy for `input`.
    pub fn execute<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        input: &I,
        hint: &SelectorHint,
    ) -> ExecuteOutcome<O> {
        self.use_case().execute(kind, input, hint)
    }

    /// Reports the ranking [`execute`](Self::execute) would act on.
    pub fn explain<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        input: &I,
        hint: &SelectorHint,
    ) -> SelectResult<Selection> {
        self.use_case().explain::<I, O>(kind, input, hint)
    }

    /// Direct path: runs the strategy named `name`, skipping ranking.
    pub fn direct_execute<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        name: &str,
        input: &I,
    ) -> ExecuteOutcome<O> {
        DirectExecutor::new(&self.catalog, self.clock.as_ref()).execute(kind, name, input)
    }

    /// Resolves `name` once for repeated lookup-free calls.
    pub fn bind<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        name: &str,
    ) -> SelectResult<BoundStrategy<I, O>> {
        self.catalog.bind(kind, name)
    }

    /// Sorts `items` with the best registered `Vec<T>` sorter.
    ///
    /// A hint without `n` is completed with `items.len()`.
    pub fn sort<T: SortElement>(
        &self,
        items: Vec<T>,
        hint: &SelectorHint,
    ) -> ExecuteOutcome<Vec<T>> {
        let hint = with_len(hint, items.len());
        self.execute(OperationKind::Sort, &items, &hint)
    }

    /// Finds `target` in `items` with the best registered search.
    ///
    /// A hint without `n` is completed with `items.len()`.
    pub fn search<T: SortElement>(
        &self,
        items: Vec<T>,
        target: T,
        hint: &SelectorHint,
    ) -> ExecuteOutcome<Option<usize>> {
        let hint = with_len(hint, items.len());
        self.execute(OperationKind::Search, &SearchQuery::new(items, target), &hint)
    }

    /// Worker path: selects on the calling thread, then runs the winner on
    /// `worker` under `timeout` (or the worker's default).
    ///
    /// Selection errors are returned directly; execution errors arrive
    /// through the ticket.
    pub fn submit<I, O, W>(
        &self,
        worker: &W,
        kind: OperationKind,
        input: I,
        hint: &SelectorHint,
        timeout: Option<Duration>,
    ) -> SelectResult<WorkerTicket<O>>
    where
        I: 'static,
        O: Send + 'static,
        W: WorkerExecutor<I, O> + ?Sized,
    {
        let strategy = self.use_case().select::<I, O>(kind, &input, hint)?;
        let bound = BoundStrategy::from_shared(Arc::clone(strategy));
        Ok(worker.submit(bound, input, timeout))
    }
}

impl Default for AlgoSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AlgoSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgoSelector")
            .field("catalog", &self.catalog)
            .field("policy", &self.policy)
            .finish()
    }
}

fn with_len(hint: &SelectorHint, len: usize) -> SelectorHint {
    match hint.n {
        Some(_) => *hint,
        None => hint.with_n(len as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::execution::ManualClock;
    use crate::metadata::{AlgoMetadata, TimeComplexity};
    use crate::strategy::FnStrategy;
    use crate::worker::InlineWorkerExecutor;

    fn selector() -> AlgoSelector {
        AlgoSelector::with_builtins::<i64>().unwrap()
    }

    // ---- sort ----

    #[test]
    fn test_sort_small_and_large() {
        let s = selector();
        let small = s.sort::<i64>(vec![4, 2, 9, 1, 5], &SelectorHint::default()).unwrap();
        assert_eq!(small.output, vec![1, 2, 4, 5, 9]);
        assert_eq!(small.strategy_name(), "insertion");

        let large: Vec<i64> = (0..5_000).rev().collect();
        let exec = s.sort(large, &SelectorHint::default()).unwrap();
        assert_ne!(exec.strategy_name(), "insertion");
        assert!(exec.output.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_sort_memory_budget_excludes_merge() {
        let s = selector();
        let hint = SelectorHint::default().with_memory_budget(1024).with_prefer_stable(true);
        let selection = s
            .explain::<Vec<i64>, Vec<i64>>(OperationKind::Sort, &vec![], &hint.with_n(5_000))
            .unwrap();
        assert!(selection.ranking.iter().all(|r| r.name != "merge"));
    }

    // ---- search ----

    #[test]
    fn test_search_wrong_hint_still_correct() {
        let s = selector();
        let hint = SelectorHint::default().with_sorted(true);
        let exec = s.search::<i64>(vec![9, 1, 4], 4, &hint).unwrap();
        assert_eq!(exec.output, Some(2));
        assert_eq!(exec.strategy_name(), "linear");
    }

    #[test]
    fn test_search_without_sorted_hint_is_linear() {
        let s = selector();
        let exec = s.search::<i64>(vec![1, 2, 3], 3, &SelectorHint::default()).unwrap();
        assert_eq!(exec.strategy_name(), "linear");
        assert_eq!(exec.output, Some(2));
    }

    // ---- paths ----

    #[test]
    fn test_direct_and_bind() {
        let s = selector().with_clock(Arc::new(ManualClock::new()));
        let direct = s
            .direct_execute::<Vec<i64>, Vec<i64>>(OperationKind::Sort, "heap", &vec![3, 2, 1])
            .unwrap();
        assert_eq!(direct.output, vec![1, 2, 3]);
        assert_eq!(direct.elapsed_micros, 0);

        let bound = s.bind::<Vec<i64>, Vec<i64>>(OperationKind::Sort, "quick").unwrap();
        assert_eq!(bound.execute_raw(&vec![2, 1]), vec![1, 2]);
    }

    #[test]
    fn test_custom_registration_and_replace() {
        let mut s = AlgoSelector::new();
        let meta = AlgoMetadata::new("count", TimeComplexity::Linear);
        s.register(
            OperationKind::Custom("count"),
            FnStrategy::new(meta.clone(), |v: &Vec<u8>| v.len()),
        )
        .unwrap();
        assert!(s.register_or_replace(
            OperationKind::Custom("count"),
            FnStrategy::new(meta, |v: &Vec<u8>| v.len() * 10),
        ));

        let exec = s
            .execute::<Vec<u8>, usize>(
                OperationKind::Custom("count"),
                &vec![1, 2],
                &SelectorHint::default(),
            )
            .unwrap();
        assert_eq!(exec.output, 20);
    }

    #[test]
    fn test_submit_inline() {
        let s = selector();
        let worker = InlineWorkerExecutor::default();
        let ticket = s
            .submit::<Vec<i64>, Vec<i64>, _>(
                &worker,
                OperationKind::Sort,
                vec![3, 1, 2],
                &SelectorHint::from_len(3),
                None,
            )
            .unwrap();
        let exec = ticket.wait().unwrap();
        assert_eq!(exec.output, vec![1, 2, 3]);
    }

    #[test]
    fn test_submit_selection_error_is_immediate() {
        let s = AlgoSelector::new();
        let worker = InlineWorkerExecutor::default();
        let err = s
            .submit::<Vec<i64>, Vec<i64>, _>(
                &worker,
                OperationKind::Sort,
                vec![1],
                &SelectorHint::default(),
                None,
            )
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NoStrategyRegistered);
    }
}
