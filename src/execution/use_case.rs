//! Select-then-execute orchestration.
//!
//! [`ExecuteStrategyUseCase`] drives one request through
//! `Received → CandidatesFound → Filtered → Ranked → Executing → {Succeeded | Failed}`:
//! fetch candidates → filter by applicability → rank → execute the winner, timed.

use std::fmt;

use tracing::{debug, info};

use super::clock::Clock;
use super::outcome::{run_timed, ExecuteOutcome};
use crate::catalog::StrategyCatalog;
use crate::error::{SelectError, SelectResult};
use crate::hint::SelectorHint;
use crate::metadata::{AlgoMetadata, OperationKind, OperationSignature};
use crate::ranking::{Ranked, SelectorPolicy};
use crate::strategy::SharedStrategy;

/// Where a request is in the selection state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStage {
    /// Request accepted.
    Received,
    /// At least one candidate is registered.
    CandidatesFound,
    /// At least one candidate applies.
    Filtered,
    /// Applicable candidates were ordered and a winner exists.
    Ranked,
    /// The winner is running.
    Executing,
    /// Terminal: the winner returned.
    Succeeded,
    /// Terminal: the request failed.
    Failed,
}

impl ExecutionStage {
    /// Whether no further transition can happen.
    pub fn is_terminal(self) -> bool {
        matches!(self, ExecutionStage::Succeeded | ExecutionStage::Failed)
    }
}

impl fmt::Display for ExecutionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionStage::Received => "received",
            ExecutionStage::CandidatesFound => "candidates_found",
            ExecutionStage::Filtered => "filtered",
            ExecutionStage::Ranked => "ranked",
            ExecutionStage::Executing => "executing",
            ExecutionStage::Succeeded => "succeeded",
            ExecutionStage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// One entry of a [`Selection`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStrategy {
    /// Strategy name.
    pub name: String,
    /// Policy score. Lower is better.
    pub score: f64,
}

/// The outcome of selection without execution.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Signature that was queried.
    pub signature: OperationSignature,
    /// Number of registered candidates.
    pub candidates: usize,
    /// Number of candidates whose `can_apply` accepted the input.
    pub applicable: usize,
    /// Surviving strategies, best first.
    pub ranking: Vec<RankedStrategy>,
}

impl Selection {
    /// Name of the strategy that would run.
    pub fn chosen(&self) -> Option<&str> {
        self.ranking.first().map(|r| r.name.as_str())
    }
}

struct Choice<'a, I, O> {
    signature: OperationSignature,
    candidates: usize,
    applicable: Vec<&'a SharedStrategy<I, O>>,
    ranked: Vec<Ranked>,
}

impl<'a, I, O> Choice<'a, I, O> {
    fn winner(&self) -> &'a SharedStrategy<I, O> {
        // `choose` only builds a Choice with a non-empty ranking.
        self.applicable[self.ranked[0].index]
    }
}

/// Orchestrates lookup → filter → rank → execute → report.
///
/// Borrows a catalog, a policy and a clock; holds no state of its own, so
/// one instance may serve any number of concurrent requests.
///
/// There is no fallback: if the chosen strategy faults, the failure is
/// reported and the next-ranked candidate is not tried.
///
/// # Examples
///
/// ```
/// use u_algoselect::catalog::StrategyCatalog;
/// use u_algoselect::execution::{ExecuteStrategyUseCase, MonotonicClock};
/// use u_algoselect::hint::SelectorHint;
/// use u_algoselect::metadata::{AlgoMetadata, OperationKind, TimeComplexity};
/// use u_algoselect::ranking::SelectorPolicy;
/// use u_algoselect::strategy::FnStrategy;
///
/// let mut catalog = StrategyCatalog::new();
/// catalog
///     .register(
///         OperationKind::Custom("sum"),
///         FnStrategy::new(
///             AlgoMetadata::new("fold", TimeComplexity::Linear),
///             |v: &Vec<u32>| v.iter().sum::<u32>(),
///         ),
///     )
///     .unwrap();
///
/// let policy = SelectorPolicy::default();
/// let clock = MonotonicClock::new();
/// let use_case = ExecuteStrategyUseCase::new(&catalog, &policy, &clock);
///
/// let exec = use_case
///     .execute::<Vec<u32>, u32>(OperationKind::Custom("sum"), &vec![1, 2, 3], &SelectorHint::default())
///     .unwrap();
/// assert_eq!(exec.output, 6);
/// assert_eq!(exec.strategy_name(), "fold");
/// ```
pub struct ExecuteStrategyUseCase<'a> {
    catalog: &'a StrategyCatalog,
    policy: &'a SelectorPolicy,
    clock: &'a dyn Clock,
}

impl<'a> ExecuteStrategyUseCase<'a> {
    /// Creates a use case over the given collaborators.
    pub fn new(
        catalog: &'a StrategyCatalog,
        policy: &'a SelectorPolicy,
        clock: &'a dyn Clock,
    ) -> Self {
        Self {
            catalog,
            policy,
            clock,
        }
    }

    /// Selects and executes the best strategy for `input`.
    pub fn execute<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        input: &I,
        hint: &SelectorHint,
    ) -> ExecuteOutcome<O> {
        let choice = self.choose::<I, O>(kind, input, hint)?;
        let strategy = choice.winner();

        debug!(
            signature = %choice.signature,
            stage = %ExecutionStage::Executing,
            strategy = strategy.name()
        );
        let outcome = run_timed(strategy.as_ref(), input, self.clock);

        let stage = if outcome.is_ok() {
            ExecutionStage::Succeeded
        } else {
            ExecutionStage::Failed
        };
        debug!(signature = %choice.signature, %stage, strategy = strategy.name());
        outcome
    }

    /// Selects the strategy that [`execute`](Self::execute) would run,
    /// without running it.
    pub fn select<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        input: &I,
        hint: &SelectorHint,
    ) -> SelectResult<&'a SharedStrategy<I, O>> {
        self.choose::<I, O>(kind, input, hint).map(|c| c.winner())
    }

    /// Runs selection and reports the full ranking.
    pub fn explain<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        input: &I,
        hint: &SelectorHint,
    ) -> SelectResult<Selection> {
        let choice = self.choose::<I, O>(kind, input, hint)?;
        let ranking = choice
            .ranked
            .iter()
            .map(|r| RankedStrategy {
                name: choice.applicable[r.index].name().to_string(),
                score: r.score,
            })
            .collect();

        Ok(Selection {
            signature: choice.signature,
            candidates: choice.candidates,
            applicable: choice.applicable.len(),
            ranking,
        })
    }

    fn choose<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        input: &I,
        hint: &SelectorHint,
    ) -> SelectResult<Choice<'a, I, O>> {
        let signature = OperationSignature::of::<I, O>(kind);
        debug!(%signature, stage = %ExecutionStage::Received);

        let candidates = self.catalog.candidates_for::<I, O>(kind);
        if candidates.is_empty() {
            debug!(%signature, stage = %ExecutionStage::Failed, "no strategy registered");
            return Err(SelectError::NoStrategyRegistered { signature });
        }
        debug!(
            %signature,
            stage = %ExecutionStage::CandidatesFound,
            count = candidates.len(),
            "candidates found"
        );

        let applicable: Vec<&'a SharedStrategy<I, O>> = candidates
            .iter()
            .filter(|s| s.can_apply(input, hint))
            .collect();
        let no_match = || SelectError::NoApplicableStrategy {
            signature,
            candidates: candidates.len(),
        };
        if applicable.is_empty() {
            debug!(%signature, stage = %ExecutionStage::Failed, "no applicable strategy");
            return Err(no_match());
        }
        debug!(
            %signature,
            stage = %ExecutionStage::Filtered,
            applicable = applicable.len(),
            "candidates filtered"
        );

        let metas: Vec<&AlgoMetadata> = applicable.iter().map(|s| s.metadata()).collect();
        let ranked = self.policy.rank(&metas, hint);
        let Some(best) = ranked.first() else {
            debug!(
                %signature,
                stage = %ExecutionStage::Failed,
                "every applicable strategy was eliminated"
            );
            return Err(no_match());
        };

        info!(
            %signature,
            stage = %ExecutionStage::Ranked,
            strategy = applicable[best.index].name(),
            score = best.score,
            "strategy selected"
        );

        Ok(Choice {
            signature,
            candidates: candidates.len(),
            applicable,
            ranked,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::execution::ManualClock;
    use crate::metadata::TimeComplexity;
    use crate::strategy::FnStrategy;

    type Ints = Vec<i64>;

    fn sorter(name: &'static str, tc: TimeComplexity) -> FnStrategy<Ints, Ints> {
        FnStrategy::new(AlgoMetadata::new(name, tc), |v: &Ints| {
            let mut out = v.clone();
            out.sort();
            out
        })
    }

    fn sort_catalog() -> StrategyCatalog {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(OperationKind::Sort, sorter("insertion", TimeComplexity::Quadratic))
            .unwrap();
        catalog
            .register(OperationKind::Sort, sorter("merge", TimeComplexity::Linearithmic))
            .unwrap();
        catalog
    }

    #[test]
    fn test_small_input_picks_insertion() {
        let catalog = sort_catalog();
        let policy = SelectorPolicy::default();
        let clock = ManualClock::with_step(3);
        let uc = ExecuteStrategyUseCase::new(&catalog, &policy, &clock);

        let exec = uc
            .execute::<Ints, Ints>(
                OperationKind::Sort,
                &vec![5, 3, 1, 4, 2],
                &SelectorHint::from_len(5),
            )
            .unwrap();
        assert_eq!(exec.strategy_name(), "insertion");
        assert_eq!(exec.output, vec![1, 2, 3, 4, 5]);
        assert_eq!(exec.elapsed_micros, 3);
    }

    #[test]
    fn test_no_strategy_registered() {
        let catalog = StrategyCatalog::new();
        let policy = SelectorPolicy::default();
        let clock = ManualClock::new();
        let uc = ExecuteStrategyUseCase::new(&catalog, &policy, &clock);

        let err = uc
            .execute::<Ints, Ints>(OperationKind::Sort, &vec![1], &SelectorHint::default())
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NoStrategyRegistered);
    }

    #[test]
    fn test_no_applicable_strategy() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(
                OperationKind::Sort,
                sorter("picky", TimeComplexity::Linear)
                    .with_applicability(|v: &Ints, _h: &SelectorHint| v.is_empty()),
            )
            .unwrap();
        let policy = SelectorPolicy::default();
        let clock = ManualClock::new();
        let uc = ExecuteStrategyUseCase::new(&catalog, &policy, &clock);

        let err = uc
            .execute::<Ints, Ints>(OperationKind::Sort, &vec![1], &SelectorHint::default())
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NoApplicableStrategy);
        assert_eq!(
            err,
            SelectError::NoApplicableStrategy {
                signature: OperationSignature::of::<Ints, Ints>(OperationKind::Sort),
                candidates: 1,
            }
        );
    }

    #[test]
    fn test_all_eliminated_is_no_applicable() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(
                OperationKind::Sort,
                FnStrategy::new(
                    AlgoMetadata::new("hungry", TimeComplexity::Linear).with_memory_overhead(1024),
                    |v: &Ints| v.clone(),
                ),
            )
            .unwrap();
        let policy = SelectorPolicy::default();
        let clock = ManualClock::new();
        let uc = ExecuteStrategyUseCase::new(&catalog, &policy, &clock);

        let hint = SelectorHint::default().with_memory_budget(1);
        let err = uc
            .execute::<Ints, Ints>(OperationKind::Sort, &vec![1], &hint)
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::NoApplicableStrategy);
    }

    #[test]
    fn test_fault_is_reported_without_fallback() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(
                OperationKind::Sort,
                FnStrategy::new(
                    AlgoMetadata::new("fast-but-broken", TimeComplexity::Constant),
                    |_: &Ints| -> Ints { panic!("corrupted state") },
                ),
            )
            .unwrap();
        catalog
            .register(OperationKind::Sort, sorter("merge", TimeComplexity::Linearithmic))
            .unwrap();
        let policy = SelectorPolicy::default();
        let clock = ManualClock::new();
        let uc = ExecuteStrategyUseCase::new(&catalog, &policy, &clock);

        let err = uc
            .execute::<Ints, Ints>(OperationKind::Sort, &vec![2, 1], &SelectorHint::default())
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::ExecutionFailure);
        assert_eq!(err.strategy_name(), Some("fast-but-broken"));
    }

    #[test]
    fn test_explain_reports_ranking() {
        let catalog = sort_catalog();
        let policy = SelectorPolicy::default();
        let clock = ManualClock::new();
        let uc = ExecuteStrategyUseCase::new(&catalog, &policy, &clock);

        let selection = uc
            .explain::<Ints, Ints>(OperationKind::Sort, &vec![], &SelectorHint::from_len(5_000))
            .unwrap();
        assert_eq!(selection.candidates, 2);
        assert_eq!(selection.applicable, 2);
        assert_eq!(selection.chosen(), Some("merge"));
        assert_eq!(selection.ranking[1].name, "insertion");
        assert!(selection.ranking[0].score < selection.ranking[1].score);
    }

    #[test]
    fn test_select_matches_execute() {
        let catalog = sort_catalog();
        let policy = SelectorPolicy::default();
        let clock = ManualClock::new();
        let uc = ExecuteStrategyUseCase::new(&catalog, &policy, &clock);
        let hint = SelectorHint::from_len(200);
        let input = vec![3, 1, 2];

        let chosen = uc.select::<Ints, Ints>(OperationKind::Sort, &input, &hint).unwrap();
        let exec = uc.execute::<Ints, Ints>(OperationKind::Sort, &input, &hint).unwrap();
        assert_eq!(chosen.name(), exec.strategy_name());
    }

    #[test]
    fn test_stage_terminal() {
        assert!(ExecutionStage::Succeeded.is_terminal());
        assert!(ExecutionStage::Failed.is_terminal());
        assert!(!ExecutionStage::Executing.is_terminal());
        assert_eq!(ExecutionStage::CandidatesFound.to_string(), "candidates_found");
    }
}
