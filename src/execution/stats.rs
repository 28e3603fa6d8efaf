//! Per-strategy timing samples.

use std::collections::BTreeMap;

use super::outcome::Execution;

/// Aggregate of the samples recorded for one strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    /// Number of samples.
    pub count: usize,
    /// Fastest run, in microseconds.
    pub min_micros: u64,
    /// Slowest run, in microseconds.
    pub max_micros: u64,
    /// Mean run time, in microseconds.
    pub mean_micros: f64,
}

/// Collects elapsed times of successful executions, keyed by strategy name.
///
/// Purely observational: selection never reads it.
///
/// # Examples
///
/// ```
/// use u_algoselect::execution::SampleStats;
///
/// let mut stats = SampleStats::new();
/// stats.record_sample("merge", 10);
/// stats.record_sample("merge", 30);
///
/// let summary = stats.summary("merge").unwrap();
/// assert_eq!(summary.count, 2);
/// assert_eq!(summary.mean_micros, 20.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SampleStats {
    samples: BTreeMap<String, Vec<u64>>,
}

impl SampleStats {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the elapsed time of `execution` under its strategy name.
    pub fn record<O>(&mut self, execution: &Execution<O>) {
        self.record_sample(execution.strategy_name(), execution.elapsed_micros);
    }

    /// Records one raw sample.
    pub fn record_sample(&mut self, strategy: &str, elapsed_micros: u64) {
        self.samples
            .entry(strategy.to_string())
            .or_default()
            .push(elapsed_micros);
    }

    /// Summary for `strategy`, or `None` if nothing was recorded.
    pub fn summary(&self, strategy: &str) -> Option<SampleSummary> {
        let samples = self.samples.get(strategy)?;
        let min_micros = *samples.iter().min()?;
        let max_micros = *samples.iter().max()?;
        let total: u128 = samples.iter().map(|&s| s as u128).sum();

        Some(SampleSummary {
            count: samples.len(),
            min_micros,
            max_micros,
            mean_micros: total as f64 / samples.len() as f64,
        })
    }

    /// Strategy names with at least one sample, in lexical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// Total number of samples across all strategies.
    pub fn len(&self) -> usize {
        self.samples.values().map(Vec::len).sum()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops every sample.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AlgoMetadata, TimeComplexity};

    fn exec(name: &str, micros: u64) -> Execution<()> {
        Execution {
            output: (),
            metadata: AlgoMetadata::new(name, TimeComplexity::Linear),
            elapsed_micros: micros,
        }
    }

    #[test]
    fn test_summary() {
        let mut stats = SampleStats::new();
        stats.record(&exec("quick", 5));
        stats.record(&exec("quick", 15));
        stats.record(&exec("quick", 7));

        let s = stats.summary("quick").unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.min_micros, 5);
        assert_eq!(s.max_micros, 15);
        assert!((s.mean_micros - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_names_sorted() {
        let mut stats = SampleStats::new();
        stats.record(&exec("merge", 1));
        stats.record(&exec("heap", 1));
        stats.record(&exec("merge", 2));

        assert_eq!(stats.names().collect::<Vec<_>>(), vec!["heap", "merge"]);
        assert_eq!(stats.len(), 3);
    }

    #[test]
    fn test_unknown_and_clear() {
        let mut stats = SampleStats::new();
        assert!(stats.summary("x").is_none());
        stats.record_sample("x", 1);
        assert!(!stats.is_empty());
        stats.clear();
        assert!(stats.is_empty());
    }
}
