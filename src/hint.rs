//! Caller-supplied data characterization.

use crate::metadata::TimeComplexity;

/// Optional description of the data a call will operate on.
///
/// Every field is optional and `None` means "unknown", never "false".
/// Hints only bias which strategy is chosen; a wrong hint may produce a
/// slower choice but must never produce a wrong answer, so strategies that
/// depend on a property (e.g. sortedness) verify it in
/// [`can_apply`](crate::strategy::Strategy::can_apply).
///
/// # Examples
///
/// ```
/// use u_algoselect::hint::SelectorHint;
/// use u_algoselect::metadata::TimeComplexity;
///
/// let hint = SelectorHint::default()
///     .with_n(5_000)
///     .with_sorted(false)
///     .with_memory_budget(1 << 20)
///     .with_max_complexity(TimeComplexity::Linearithmic);
///
/// assert_eq!(hint.n, Some(5_000));
/// assert_eq!(hint.prefer_stable, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorHint {
    /// Number of elements in the input.
    pub n: Option<u64>,

    /// Whether the input is fully sorted.
    pub sorted: Option<bool>,

    /// Whether the input is mostly sorted with few inversions.
    pub nearly_sorted: Option<bool>,

    /// Upper bound on extra memory a strategy may allocate, in bytes.
    ///
    /// Strategies declaring more overhead than this are eliminated.
    pub memory_budget_bytes: Option<u64>,

    /// Prefer strategies that keep equal elements in order.
    pub prefer_stable: Option<bool>,

    /// Prefer simple, low-constant strategies regardless of input size.
    pub prefer_simple: Option<bool>,

    /// Strategies with a worse declared time complexity are eliminated.
    pub max_complexity: Option<TimeComplexity>,
}

impl SelectorHint {
    /// A hint that knows nothing.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// A hint carrying only the input length.
    pub fn from_len(len: usize) -> Self {
        Self::default().with_n(len as u64)
    }

    /// Sets the input size.
    pub fn with_n(mut self, n: u64) -> Self {
        self.n = Some(n);
        self
    }

    /// Sets whether the input is sorted.
    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = Some(sorted);
        self
    }

    /// Sets whether the input is nearly sorted.
    pub fn with_nearly_sorted(mut self, nearly_sorted: bool) -> Self {
        self.nearly_sorted = Some(nearly_sorted);
        self
    }

    /// Sets the extra-memory budget in bytes.
    pub fn with_memory_budget(mut self, bytes: u64) -> Self {
        self.memory_budget_bytes = Some(bytes);
        self
    }

    /// Sets the stability preference.
    pub fn with_prefer_stable(mut self, prefer: bool) -> Self {
        self.prefer_stable = Some(prefer);
        self
    }

    /// Sets the simplicity preference.
    pub fn with_prefer_simple(mut self, prefer: bool) -> Self {
        self.prefer_simple = Some(prefer);
        self
    }

    /// Sets the worst acceptable time complexity.
    pub fn with_max_complexity(mut self, max: TimeComplexity) -> Self {
        self.max_complexity = Some(max);
        self
    }

    /// `true` only when the caller stated the input is sorted.
    pub fn is_known_sorted(&self) -> bool {
        self.sorted == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        let hint = SelectorHint::default();
        assert_eq!(hint, SelectorHint::unknown());
        assert!(hint.n.is_none());
        assert!(hint.sorted.is_none());
        assert!(hint.memory_budget_bytes.is_none());
        assert!(!hint.is_known_sorted());
    }

    #[test]
    fn test_unknown_is_not_false() {
        let unknown = SelectorHint::default();
        let unsorted = SelectorHint::default().with_sorted(false);
        assert_ne!(unknown, unsorted);
        assert!(!unsorted.is_known_sorted());
    }

    #[test]
    fn test_from_len() {
        assert_eq!(SelectorHint::from_len(42).n, Some(42));
    }

    #[test]
    fn test_builder_chain() {
        let hint = SelectorHint::default()
            .with_sorted(true)
            .with_nearly_sorted(true)
            .with_prefer_stable(true)
            .with_prefer_simple(false)
            .with_max_complexity(TimeComplexity::Quadratic);

        assert!(hint.is_known_sorted());
        assert_eq!(hint.nearly_sorted, Some(true));
        assert_eq!(hint.prefer_stable, Some(true));
        assert_eq!(hint.prefer_simple, Some(false));
        assert_eq!(hint.max_complexity, Some(TimeComplexity::Quadratic));
    }
}
