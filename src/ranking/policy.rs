//! Hint-aware candidate ranking.

use super::config::PolicyConfig;
use super::ranker::ComplexityRanker;
use crate::error::{SelectError, SelectResult};
use crate::hint::SelectorHint;
use crate::metadata::{AlgoMetadata, TimeComplexity};

/// Scores closer than this are treated as ties.
const TIE_EPSILON: f64 = 1e-9;

/// Per-term contributions to one candidate's score.
///
/// Produced by [`SelectorPolicy::breakdown`]; useful to explain a choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// Table the base rank came from.
    pub ranker: ComplexityRanker,
    /// Complexity rank from the table.
    pub base: f64,
    /// Input-size adjustment.
    pub size: f64,
    /// Memory-usage penalty.
    pub memory: f64,
    /// Sorted-input bonus (zero or negative).
    pub sorted: f64,
    /// Nearly-sorted bonus (zero or negative).
    pub nearly_sorted: f64,
    /// Stability bonus (zero or negative).
    pub stability: f64,
}

impl ScoreBreakdown {
    /// Sum of all terms. Lower is better.
    pub fn total(&self) -> f64 {
        self.base + self.size + self.memory + self.sorted + self.nearly_sorted + self.stability
    }
}

/// A candidate's position after ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Index into the slice that was ranked.
    pub index: usize,
    /// Final score. Lower is better; always finite.
    pub score: f64,
}

/// Deterministic ranking of candidate strategies from their metadata and a
/// [`SelectorHint`].
///
/// Score, lower is better:
///
/// 1. Base rank from a [`ComplexityRanker`] table chosen by the
///    [`RankerMode`](super::RankerMode).
/// 2. Size adjustment when `hint.n` is known (see [`size_adjustment`]).
/// 3. Memory: a declared overhead above `hint.memory_budget_bytes`
///    eliminates the candidate; otherwise `overhead / budget * memory_weight * 20`
///    is added.
/// 4. `hint.max_complexity` eliminates candidates with a worse declared
///    time complexity.
/// 5. With `hint.sorted == Some(true)`: `-sorted_specialized_bonus` for
///    strategies specialized for sorted input and `-requires_sorted_bonus`
///    for strategies that require it.
/// 6. With `hint.nearly_sorted == Some(true)`: `-nearly_sorted_bonus` for
///    adaptive strategies.
/// 7. With `hint.prefer_stable == Some(true)`: `-stability_weight` for stable
///    strategies.
///
/// Candidates are sorted ascending; eliminated ones are dropped and ties
/// keep their input order.
///
/// # Examples
///
/// ```
/// use u_algoselect::hint::SelectorHint;
/// use u_algoselect::metadata::{AlgoMetadata, TimeComplexity};
/// use u_algoselect::ranking::SelectorPolicy;
///
/// let insertion = AlgoMetadata::new("insertion", TimeComplexity::Quadratic);
/// let merge = AlgoMetadata::new("merge", TimeComplexity::Linearithmic);
/// let policy = SelectorPolicy::default();
///
/// let small = policy.rank(&[&insertion, &merge], &SelectorHint::from_len(5));
/// assert_eq!(small[0].index, 0);
///
/// let large = policy.rank(&[&insertion, &merge], &SelectorHint::from_len(5_000));
/// assert_eq!(large[0].index, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectorPolicy {
    config: PolicyConfig,
}

impl SelectorPolicy {
    /// Creates a policy after validating `config`.
    pub fn new(config: PolicyConfig) -> SelectResult<Self> {
        config.validate().map_err(SelectError::config)?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Itemized score for one candidate, or `None` if it is eliminated.
    pub fn breakdown(&self, meta: &AlgoMetadata, hint: &SelectorHint) -> Option<ScoreBreakdown> {
        let cfg = &self.config;
        let complexity = meta.time_complexity();

        if let Some(max) = hint.max_complexity {
            if complexity > max {
                return None;
            }
        }

        let memory = match hint.memory_budget_bytes {
            Some(budget) => {
                let overhead = meta.memory_overhead_bytes();
                if overhead > budget {
                    return None;
                }
                if overhead == 0 {
                    0.0
                } else {
                    overhead as f64 / budget as f64 * cfg.memory_weight * 20.0
                }
            }
            None => 0.0,
        };

        let ranker = cfg
            .ranker_mode
            .resolve(hint, cfg.small_n_threshold, cfg.large_n_threshold);

        let size = hint
            .n
            .map(|n| size_adjustment(complexity, n, cfg.small_n_threshold, cfg.large_n_threshold))
            .unwrap_or(0.0);

        let mut sorted = 0.0;
        if hint.is_known_sorted() {
            if meta.specialized_for_sorted() {
                sorted -= cfg.sorted_specialized_bonus;
            }
            if meta.requires_sorted_input() {
                sorted -= cfg.requires_sorted_bonus;
            }
        }

        let nearly_sorted = if hint.nearly_sorted == Some(true) && meta.is_adaptive() {
            -cfg.nearly_sorted_bonus
        } else {
            0.0
        };

        let stability = if hint.prefer_stable == Some(true) && meta.is_stable() {
            -cfg.stability_weight
        } else {
            0.0
        };

        Some(ScoreBreakdown {
            ranker,
            base: ranker.rank(complexity),
            size,
            memory,
            sorted,
            nearly_sorted,
            stability,
        })
    }

    /// Score for one candidate; `f64::INFINITY` if it is eliminated.
    pub fn score(&self, meta: &AlgoMetadata, hint: &SelectorHint) -> f64 {
        self.breakdown(meta, hint)
            .map(|b| b.total())
            .unwrap_or(f64::INFINITY)
    }

    /// Ranks `candidates`, best first.
    ///
    /// Eliminated candidates are omitted. Scores within `1e-9` of each other
    /// count as ties and keep their input order. Identical inputs always give
    /// identical output.
    pub fn rank(&self, candidates: &[&AlgoMetadata], hint: &SelectorHint) -> Vec<Ranked> {
        let mut ranked: Vec<Ranked> = candidates
            .iter()
            .enumerate()
            .filter_map(|(index, meta)| {
                let score = self.score(meta, hint);
                score.is_finite().then_some(Ranked { index, score })
            })
            .collect();

        order_ties(&mut ranked);
        ranked
    }

    /// Index of the best candidate, or `None` if none survives.
    pub fn select_best(&self, candidates: &[&AlgoMetadata], hint: &SelectorHint) -> Option<usize> {
        self.rank(candidates, hint).first().map(|r| r.index)
    }
}

/// Sorts by score, then puts each run of scores within [`TIE_EPSILON`] of
/// the run's lowest score back in input order.
fn order_ties(ranked: &mut [Ranked]) {
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score).then(a.index.cmp(&b.index)));

    let mut start = 0;
    while start < ranked.len() {
        let floor = ranked[start].score;
        let end = ranked[start..]
            .iter()
            .position(|r| r.score - floor > TIE_EPSILON)
            .map_or(ranked.len(), |offset| start + offset);
        ranked[start..end].sort_by_key(|r| r.index);
        start = end;
    }
}

/// Size-dependent score adjustment for a declared complexity.
///
/// | Class      | `n <= small_n` | `n > large_n` |
/// |------------|---------------:|--------------:|
/// | O(1)       | -0.2 | -0.3 |
/// | O(log n)   | +0.1 | -0.2 |
/// | O(n)       | -0.1 | +0.1 |
/// | O(n log n) | +0.2 | -0.1 |
/// | O(n²)      |  0.0 | +1.0 |
/// | O(n³)      | +1.0 | +2.0 |
/// | O(2ⁿ)      | +2.0 | +3.0 |
///
/// Sizes in between get no adjustment.
pub fn size_adjustment(complexity: TimeComplexity, n: u64, small_n: u64, large_n: u64) -> f64 {
    use TimeComplexity::*;

    if n <= small_n {
        match complexity {
            Constant => -0.2,
            Logarithmic => 0.1,
            Linear => -0.1,
            Linearithmic => 0.2,
            Quadratic => 0.0,
            Cubic => 1.0,
            Exponential => 2.0,
        }
    } else if n > large_n {
        match complexity {
            Constant => -0.3,
            Logarithmic => -0.2,
            Linear => 0.1,
            Linearithmic => -0.1,
            Quadratic => 1.0,
            Cubic => 2.0,
            Exponential => 3.0,
        }
    } else {
        0.0
    }
}
