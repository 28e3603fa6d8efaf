//! Strategy metadata.

use super::complexity::TimeComplexity;

/// Immutable description of a strategy's declared cost and capabilities.
///
/// Metadata is built once at wiring time with the `with_*` builder and
/// never changes afterwards. The selector reads only these declarations;
/// it never inspects an algorithm's internals.
///
/// # Examples
///
/// ```
/// use u_algoselect::metadata::{AlgoMetadata, TimeComplexity};
///
/// let meta = AlgoMetadata::new("merge", TimeComplexity::Linearithmic)
///     .with_space(TimeComplexity::Linear)
///     .with_memory_overhead(64 * 1024)
///     .with_stable(true)
///     .with_description("Top-down merge sort");
///
/// assert_eq!(meta.name(), "merge");
/// assert!(meta.is_stable());
/// assert!(!meta.requires_sorted_input());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlgoMetadata {
    name: String,
    time: TimeComplexity,
    space: TimeComplexity,
    requires_sorted_input: bool,
    memory_overhead_bytes: u64,
    description: String,
    is_stable: bool,
    specialized_for_sorted: bool,
    adaptive: bool,
}

impl AlgoMetadata {
    /// Creates metadata with the given name and time complexity.
    ///
    /// Space complexity defaults to O(1), overhead to zero, and every
    /// capability flag to `false`.
    pub fn new(name: impl Into<String>, time: TimeComplexity) -> Self {
        Self {
            name: name.into(),
            time,
            space: TimeComplexity::Constant,
            requires_sorted_input: false,
            memory_overhead_bytes: 0,
            description: String::new(),
            is_stable: false,
            specialized_for_sorted: false,
            adaptive: false,
        }
    }

    /// Sets the declared space complexity.
    pub fn with_space(mut self, space: TimeComplexity) -> Self {
        self.space = space;
        self
    }

    /// Declares that the strategy is only correct on sorted input.
    pub fn with_requires_sorted_input(mut self, required: bool) -> Self {
        self.requires_sorted_input = required;
        self
    }

    /// Sets the extra memory the strategy allocates, in bytes.
    pub fn with_memory_overhead(mut self, bytes: u64) -> Self {
        self.memory_overhead_bytes = bytes;
        self
    }

    /// Sets the free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declares whether equal elements keep their relative order.
    pub fn with_stable(mut self, stable: bool) -> Self {
        self.is_stable = stable;
        self
    }

    /// Declares that the strategy exploits sorted input for speed.
    pub fn with_specialized_for_sorted(mut self, specialized: bool) -> Self {
        self.specialized_for_sorted = specialized;
        self
    }

    /// Declares that the strategy runs faster on nearly sorted input.
    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Strategy name, unique within its signature.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared time complexity.
    pub fn time_complexity(&self) -> TimeComplexity {
        self.time
    }

    /// Declared space complexity.
    pub fn space_complexity(&self) -> TimeComplexity {
        self.space
    }

    /// Whether the strategy requires sorted input.
    pub fn requires_sorted_input(&self) -> bool {
        self.requires_sorted_input
    }

    /// Extra memory allocated by the strategy, in bytes.
    pub fn memory_overhead_bytes(&self) -> u64 {
        self.memory_overhead_bytes
    }

    /// Free-text description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the strategy is stable.
    pub fn is_stable(&self) -> bool {
        self.is_stable
    }

    /// Whether the strategy is specialized for sorted input.
    pub fn specialized_for_sorted(&self) -> bool {
        self.specialized_for_sorted
    }

    /// Whether the strategy benefits from nearly sorted input.
    pub fn is_adaptive(&self) -> bool {
        self.adaptive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let meta = AlgoMetadata::new("linear", TimeComplexity::Linear);
        assert_eq!(meta.name(), "linear");
        assert_eq!(meta.time_complexity(), TimeComplexity::Linear);
        assert_eq!(meta.space_complexity(), TimeComplexity::Constant);
        assert_eq!(meta.memory_overhead_bytes(), 0);
        assert!(meta.description().is_empty());
        assert!(!meta.requires_sorted_input());
        assert!(!meta.is_stable());
        assert!(!meta.specialized_for_sorted());
        assert!(!meta.is_adaptive());
    }

    #[test]
    fn test_builder_pattern() {
        let meta = AlgoMetadata::new("binary", TimeComplexity::Logarithmic)
            .with_requires_sorted_input(true)
            .with_specialized_for_sorted(true)
            .with_memory_overhead(16)
            .with_description("Binary search");

        assert!(meta.requires_sorted_input());
        assert!(meta.specialized_for_sorted());
        assert_eq!(meta.memory_overhead_bytes(), 16);
        assert_eq!(meta.description(), "Binary search");
    }
}
