//! Closure-backed strategies.

use super::types::Strategy;
use crate::hint::SelectorHint;
use crate::metadata::AlgoMetadata;

type ExecuteFn<I, O> = dyn Fn(&I) -> O + Send + Sync;
type ApplyFn<I> = dyn Fn(&I, &SelectorHint) -> bool + Send + Sync;

/// A [`Strategy`] assembled from metadata and closures.
///
/// Useful for registering small algorithms inline or for synthetic
/// strategies in tests, without declaring a dedicated type.
///
/// # Examples
///
/// ```
/// use u_algoselect::metadata::{AlgoMetadata, TimeComplexity};
/// use u_algoselect::strategy::{FnStrategy, Strategy};
/// use u_algoselect::hint::SelectorHint;
///
/// let sum = FnStrategy::new(
///     AlgoMetadata::new("sum", TimeComplexity::Linear),
///     |xs: &Vec<i64>| xs.iter().sum::<i64>(),
/// )
/// .with_applicability(|xs: &Vec<i64>, _hint: &SelectorHint| !xs.is_empty());
///
/// assert_eq!(sum.execute(&vec![1, 2, 3]), 6);
/// assert!(!sum.can_apply(&vec![], &SelectorHint::default()));
/// ```
pub struct FnStrategy<I, O> {
    meta: AlgoMetadata,
    execute: Box<ExecuteFn<I, O>>,
    apply: Option<Box<ApplyFn<I>>>,
}

impl<I, O> FnStrategy<I, O> {
    /// Creates a strategy that applies to every input.
    pub fn new<F>(meta: AlgoMetadata, execute: F) -> Self
    where
        F: Fn(&I) -> O + Send + Sync + 'static,
    {
        Self {
            meta,
            execute: Box::new(execute),
            apply: None,
        }
    }

    /// Restricts applicability with a predicate.
    pub fn with_applicability<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&I, &SelectorHint) -> bool + Send + Sync + 'static,
    {
        self.apply = Some(Box::new(predicate));
        self
    }
}

impl<I, O> Strategy<I, O> for FnStrategy<I, O> {
    fn metadata(&self) -> &AlgoMetadata {
        &self.meta
    }

    fn can_apply(&self, input: &I, hint: &SelectorHint) -> bool {
        match &self.apply {
            Some(predicate) => predicate(input, hint),
            None => true,
        }
    }

    fn execute(&self, input: &I) -> O {
        (self.execute)(input)
    }
}

impl<I, O> std::fmt::Debug for FnStrategy<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnStrategy")
            .field("meta", &self.meta)
            .field("restricted", &self.apply.is_some())
            .finish()
    }
}
