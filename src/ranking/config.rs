//! Selector policy configuration.
//!
//! [`PolicyConfig`] holds every weight and threshold the ranking uses.

use super::ranker::{ComplexityRanker, RankerMode};

/// Configuration for [`SelectorPolicy`](super::SelectorPolicy).
///
/// # Defaults
///
/// ```
/// use u_algoselect::ranking::PolicyConfig;
///
/// let config = PolicyConfig::default();
/// assert_eq!(config.small_n_threshold, 32);
/// assert_eq!(config.large_n_threshold, 1000);
/// assert!((config.memory_weight - 0.1).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_algoselect::ranking::{ComplexityRanker, PolicyConfig, RankerMode};
///
/// let config = PolicyConfig::default()
///     .with_small_n_threshold(64)
///     .with_memory_weight(0.25)
///     .with_ranker_mode(RankerMode::Fixed(ComplexityRanker::Standard));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolicyConfig {
    /// Inputs with `n <= small_n_threshold` get small-size adjustments.
    pub small_n_threshold: u64,

    /// Inputs with `n > large_n_threshold` get large-size adjustments.
    pub large_n_threshold: u64,

    /// Scale of the memory-usage term: `overhead / budget * memory_weight * 20`.
    pub memory_weight: f64,

    /// Bonus for stable strategies when the hint prefers stability.
    pub stability_weight: f64,

    /// Bonus for strategies specialized for sorted input when the hint says
    /// the input is sorted.
    pub sorted_specialized_bonus: f64,

    /// Bonus for strategies that require sorted input when the hint says the
    /// input is sorted.
    pub requires_sorted_bonus: f64,

    /// Bonus for adaptive strategies when the hint says the input is nearly
    /// sorted.
    pub nearly_sorted_bonus: f64,

    /// How the complexity table is chosen.
    pub ranker_mode: RankerMode,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            small_n_threshold: 32,
            large_n_threshold: 1000,
            memory_weight: 0.1,
            stability_weight: 0.05,
            sorted_specialized_bonus: 1.0,
            requires_sorted_bonus: 0.3,
            nearly_sorted_bonus: 0.5,
            ranker_mode: RankerMode::Adaptive,
        }
    }
}

impl PolicyConfig {
    /// Sets the small-input threshold.
    pub fn with_small_n_threshold(mut self, n: u64) -> Self {
        self.small_n_threshold = n;
        self
    }

    /// Sets the large-input threshold.
    pub fn with_large_n_threshold(mut self, n: u64) -> Self {
        self.large_n_threshold = n;
        self
    }

    /// Sets the memory weight.
    pub fn with_memory_weight(mut self, weight: f64) -> Self {
        self.memory_weight = weight;
        self
    }

    /// Sets the stability weight.
    pub fn with_stability_weight(mut self, weight: f64) -> Self {
        self.stability_weight = weight;
        self
    }

    /// Sets the sorted-specialization bonus.
    pub fn with_sorted_specialized_bonus(mut self, bonus: f64) -> Self {
        self.sorted_specialized_bonus = bonus;
        self
    }

    /// Sets the requires-sorted bonus.
    pub fn with_requires_sorted_bonus(mut self, bonus: f64) -> Self {
        self.requires_sorted_bonus = bonus;
        self
    }

    /// Sets the nearly-sorted bonus.
    pub fn with_nearly_sorted_bonus(mut self, bonus: f64) -> Self {
        self.nearly_sorted_bonus = bonus;
        self
    }

    /// Sets the ranker mode.
    pub fn with_ranker_mode(mut self, mode: RankerMode) -> Self {
        self.ranker_mode = mode;
        self
    }

    /// Preset that always ranks with [`ComplexityRanker::FavorSimple`].
    ///
    /// For call sites that know their inputs stay small.
    pub fn favor_simple() -> Self {
        Self {
            ranker_mode: RankerMode::Fixed(ComplexityRanker::FavorSimple),
            ..Self::default()
        }
    }

    /// Preset that always ranks with [`ComplexityRanker::FavorScalable`].
    ///
    /// For call sites that know their inputs are large, or where a bad
    /// worst case is more costly than a slow small case.
    pub fn favor_scalable() -> Self {
        Self {
            ranker_mode: RankerMode::Fixed(ComplexityRanker::FavorScalable),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.small_n_threshold >= self.large_n_threshold {
            return Err("small_n_threshold must be below large_n_threshold".into());
        }
        let weights = [
            ("memory_weight", self.memory_weight),
            ("stability_weight", self.stability_weight),
            ("sorted_specialized_bonus", self.sorted_specialized_bonus),
            ("requires_sorted_bonus", self.requires_sorted_bonus),
            ("nearly_sorted_bonus", self.nearly_sorted_bonus),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and non-negative"));
            }
        }
        Ok(())
    }
}
