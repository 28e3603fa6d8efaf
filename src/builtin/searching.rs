//! Reference search strategies over [`SearchQuery`].

use std::marker::PhantomData;

use crate::hint::SelectorHint;
use crate::metadata::{AlgoMetadata, TimeComplexity};
use crate::strategy::Strategy;

use super::sorting::SortElement;

/// Input of a search: find `target` in `items`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery<T> {
    /// Haystack.
    pub items: Vec<T>,
    /// Value to look for.
    pub target: T,
}

impl<T> SearchQuery<T> {
    /// Builds a query for `target` in `items`.
    pub fn new(items: Vec<T>, target: T) -> Self {
        Self { items, target }
    }
}

/// Scans from the front. O(n), works on any input.
///
/// Returns the index of the first match.
#[derive(Debug, Clone)]
pub struct LinearSearch<T> {
    meta: AlgoMetadata,
    _marker: PhantomData<fn() -> T>,
}

impl<T> LinearSearch<T> {
    /// Creates the linear search strategy.
    pub fn new() -> Self {
        Self {
            meta: AlgoMetadata::new("linear", TimeComplexity::Linear)
                .with_space(TimeComplexity::Constant)
                .with_description("Front-to-back scan"),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for LinearSearch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SortElement> Strategy<SearchQuery<T>, Option<usize>> for LinearSearch<T> {
    fn metadata(&self) -> &AlgoMetadata {
        &self.meta
    }

    fn execute(&self, input: &SearchQuery<T>) -> Option<usize> {
        input.items.iter().position(|x| *x == input.target)
    }
}

/// Binary search. O(log n), requires sorted input.
///
/// Applies only when the hint says the input is sorted **and** it actually
/// is, so a wrong hint falls back to other strategies instead of producing
/// a wrong answer. Returns the index of the first match, like
/// [`LinearSearch`].
#[derive(Debug, Clone)]
pub struct BinarySearch<T> {
    meta: AlgoMetadata,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BinarySearch<T> {
    /// Creates the binary search strategy.
    pub fn new() -> Self {
        Self {
            meta: AlgoMetadata::new("binary", TimeComplexity::Logarithmic)
                .with_space(TimeComplexity::Constant)
                .with_requires_sorted_input(true)
                .with_specialized_for_sorted(true)
                .with_description("Lower-bound binary search over sorted input"),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for BinarySearch<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SortElement> Strategy<SearchQuery<T>, Option<usize>> for BinarySearch<T> {
    fn metadata(&self) -> &AlgoMetadata {
        &self.meta
    }

    fn can_apply(&self, input: &SearchQuery<T>, hint: &SelectorHint) -> bool {
        hint.is_known_sorted() && input.items.windows(2).all(|w| w[0] <= w[1])
    }

    fn execute(&self, input: &SearchQuery<T>) -> Option<usize> {
        let items = &input.items;
        let i = items.partition_point(|x| *x < input.target);
        (i < items.len() && items[i] == input.target).then_some(i)
    }
}
