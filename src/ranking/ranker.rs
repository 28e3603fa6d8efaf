//! Table-driven complexity ranks.

use crate::hint::SelectorHint;
use crate::metadata::TimeComplexity;

/// Maps a [`TimeComplexity`] to a numeric rank. Lower is cheaper.
///
/// Ranks come from fixed tables indexed by [`TimeComplexity::rank`]; the
/// ranker never looks at an algorithm's implementation.
///
/// | Class        | Standard | FavorSimple | FavorScalable |
/// |--------------|---------:|------------:|--------------:|
/// | O(1)         | 0 | 0 | 0 |
/// | O(log n)     | 1 | 1 | 1 |
/// | O(n)         | 2 | 1 | 2 |
/// | O(n log n)   | 3 | 2 | 3 |
/// | O(n²)        | 4 | 2 | 5 |
/// | O(n³)        | 5 | 4 | 7 |
/// | O(2ⁿ)        | 6 | 6 | 9 |
///
/// `FavorSimple` pulls constant/linear work to the front and treats a
/// simple quadratic algorithm as no worse than a linearithmic one, which is
/// what small inputs look like in practice. `FavorScalable` widens the gaps
/// between superlinear classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComplexityRanker {
    /// Plain ordinal rank `0..=6`.
    #[default]
    Standard,
    /// Preset for small inputs.
    FavorSimple,
    /// Preset for large inputs.
    FavorScalable,
}

const STANDARD: [f64; 7] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
const FAVOR_SIMPLE: [f64; 7] = [0.0, 1.0, 1.0, 2.0, 2.0, 4.0, 6.0];
const FAVOR_SCALABLE: [f64; 7] = [0.0, 1.0, 2.0, 3.0, 5.0, 7.0, 9.0];

impl ComplexityRanker {
    /// Rank of `complexity` under this table.
    pub fn rank(self, complexity: TimeComplexity) -> f64 {
        self.table()[complexity.rank() as usize]
    }

    /// The full table, indexed by [`TimeComplexity::rank`].
    pub fn table(self) -> &'static [f64; 7] {
        match self {
            ComplexityRanker::Standard => &STANDARD,
            ComplexityRanker::FavorSimple => &FAVOR_SIMPLE,
            ComplexityRanker::FavorScalable => &FAVOR_SCALABLE,
        }
    }
}

/// How the policy picks a [`ComplexityRanker`] for a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RankerMode {
    /// Always use the given table.
    Fixed(ComplexityRanker),

    /// Choose per call from the hint:
    ///
    /// - `prefer_simple == Some(true)` or `n <= small_n` → `FavorSimple`
    /// - `n > large_n` → `FavorScalable`
    /// - otherwise, including unknown `n` → `Standard`
    #[default]
    Adaptive,
}

impl RankerMode {
    /// Resolves the table to use for `hint`.
    pub fn resolve(self, hint: &SelectorHint, small_n: u64, large_n: u64) -> ComplexityRanker {
        match self {
            RankerMode::Fixed(ranker) => ranker,
            RankerMode::Adaptive => {
                if hint.prefer_simple == Some(true) {
                    return ComplexityRanker::FavorSimple;
                }
                match hint.n {
                    Some(n) if n <= small_n => ComplexityRanker::FavorSimple,
                    Some(n) if n > large_n => ComplexityRanker::FavorScalable,
                    _ => ComplexityRanker::Standard,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_matches_ordinal() {
        for c in TimeComplexity::ALL {
            assert!((ComplexityRanker::Standard.rank(c) - c.rank() as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_tables_are_monotone() {
        for ranker in [
            ComplexityRanker::Standard,
            ComplexityRanker::FavorSimple,
            ComplexityRanker::FavorScalable,
        ] {
            for w in ranker.table().windows(2) {
                assert!(w[0] <= w[1], "{ranker:?} table not monotone: {w:?}");
            }
        }
    }

    #[test]
    fn test_favor_simple_closes_quadratic_gap() {
        let r = ComplexityRanker::FavorSimple;
        assert!(r.rank(TimeComplexity::Quadratic) <= r.rank(TimeComplexity::Linearithmic));
        assert!(r.rank(TimeComplexity::Linear) < r.rank(TimeComplexity::Quadratic));
    }

    #[test]
    fn test_favor_scalable_penalizes_superlinear() {
        let s = ComplexityRanker::Standard;
        let r = ComplexityRanker::FavorScalable;
        assert!(r.rank(TimeComplexity::Quadratic) > s.rank(TimeComplexity::Quadratic));
        assert!(r.rank(TimeComplexity::Exponential) > s.rank(TimeComplexity::Exponential));
        assert!((r.rank(TimeComplexity::Linear) - s.rank(TimeComplexity::Linear)).abs() < 1e-12);
    }

    // ---- RankerMode ----

    #[test]
    fn test_adaptive_resolution() {
        let mode = RankerMode::Adaptive;
        let small = SelectorHint::default().with_n(5);
        let mid = SelectorHint::default().with_n(500);
        let large = SelectorHint::default().with_n(5000);

        assert_eq!(mode.resolve(&small, 32, 1000), ComplexityRanker::FavorSimple);
        assert_eq!(mode.resolve(&mid, 32, 1000), ComplexityRanker::Standard);
        assert_eq!(mode.resolve(&large, 32, 1000), ComplexityRanker::FavorScalable);
        assert_eq!(
            mode.resolve(&SelectorHint::default(), 32, 1000),
            ComplexityRanker::Standard
        );
    }

    #[test]
    fn test_adaptive_boundaries() {
        let mode = RankerMode::Adaptive;
        let at_small = SelectorHint::default().with_n(32);
        let at_large = SelectorHint::default().with_n(1000);

        assert_eq!(mode.resolve(&at_small, 32, 1000), ComplexityRanker::FavorSimple);
        assert_eq!(mode.resolve(&at_large, 32, 1000), ComplexityRanker::Standard);
    }

    #[test]
    fn test_prefer_simple_overrides_size() {
        let hint = SelectorHint::default().with_n(1_000_000).with_prefer_simple(true);
        assert_eq!(
            RankerMode::Adaptive.resolve(&hint, 32, 1000),
            ComplexityRanker::FavorSimple
        );
    }

    #[test]
    fn test_fixed_ignores_hint() {
        let hint = SelectorHint::default().with_n(3);
        let mode = RankerMode::Fixed(ComplexityRanker::FavorScalable);
        assert_eq!(mode.resolve(&hint, 32, 1000), ComplexityRanker::FavorScalable);
    }
}
