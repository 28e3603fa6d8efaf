//! Asymptotic complexity classes.

use std::fmt;

/// Declared asymptotic complexity of a strategy.
///
/// The set is closed: only these seven classes exist, and only their
/// relative order is meaningful. Variants are declared from cheapest to
/// most expensive, so the derived `Ord` follows [`rank`](Self::rank).
///
/// # Examples
///
/// ```
/// use u_algoselect::metadata::TimeComplexity;
///
/// assert!(TimeComplexity::Linearithmic < TimeComplexity::Quadratic);
/// assert_eq!(TimeComplexity::Quadratic.rank(), 4);
/// assert_eq!(TimeComplexity::Linearithmic.to_string(), "O(n log n)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeComplexity {
    /// O(1)
    Constant,
    /// O(log n)
    Logarithmic,
    /// O(n)
    Linear,
    /// O(n log n)
    Linearithmic,
    /// O(n²)
    Quadratic,
    /// O(n³)
    Cubic,
    /// O(2ⁿ)
    Exponential,
}

impl TimeComplexity {
    /// All classes, cheapest first.
    pub const ALL: [TimeComplexity; 7] = [
        TimeComplexity::Constant,
        TimeComplexity::Logarithmic,
        TimeComplexity::Linear,
        TimeComplexity::Linearithmic,
        TimeComplexity::Quadratic,
        TimeComplexity::Cubic,
        TimeComplexity::Exponential,
    ];

    /// Position in the total order, `0` (O(1)) through `6` (O(2ⁿ)).
    pub fn rank(self) -> u8 {
        match self {
            TimeComplexity::Constant => 0,
            TimeComplexity::Logarithmic => 1,
            TimeComplexity::Linear => 2,
            TimeComplexity::Linearithmic => 3,
            TimeComplexity::Quadratic => 4,
            TimeComplexity::Cubic => 5,
            TimeComplexity::Exponential => 6,
        }
    }

    /// Big-O notation for this class.
    pub fn notation(self) -> &'static str {
        match self {
            TimeComplexity::Constant => "O(1)",
            TimeComplexity::Logarithmic => "O(log n)",
            TimeComplexity::Linear => "O(n)",
            TimeComplexity::Linearithmic => "O(n log n)",
            TimeComplexity::Quadratic => "O(n^2)",
            TimeComplexity::Cubic => "O(n^3)",
            TimeComplexity::Exponential => "O(2^n)",
        }
    }

    /// Returns `true` if this class grows faster than linear.
    pub fn is_superlinear(self) -> bool {
        self > TimeComplexity::Linear
    }
}

impl fmt::Display for TimeComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.notation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_is_dense() {
        for (i, c) in TimeComplexity::ALL.iter().enumerate() {
            assert_eq!(c.rank() as usize, i);
        }
    }

    #[test]
    fn test_ord_follows_rank() {
        for w in TimeComplexity::ALL.windows(2) {
            assert!(w[0] < w[1], "{} should precede {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_superlinear() {
        assert!(!TimeComplexity::Linear.is_superlinear());
        assert!(TimeComplexity::Linearithmic.is_superlinear());
        assert!(TimeComplexity::Exponential.is_superlinear());
    }

    #[test]
    fn test_display() {
        assert_eq!(TimeComplexity::Constant.to_string(), "O(1)");
        assert_eq!(TimeComplexity::Exponential.to_string(), "O(2^n)");
    }
}
