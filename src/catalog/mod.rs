//! Strategy registry keyed by operation signature.
//!
//! The catalog is an explicitly constructed value, never a process-wide
//! global. Its lifecycle is single-writer-then-many-readers:
//!
//! 1. **Wiring**: the owner holds it by `&mut` and registers every strategy.
//! 2. **Serving**: it is shared by `&` or `Arc` and only read; the borrow
//!    checker rules out registration once readers exist, so no locking is
//!    needed.
//!
//! Buckets are typed by the strategy's input and output types. A strategy
//! can only be filed under a signature built from its own `I`/`O`, so I/O
//! mismatches are compile errors rather than runtime branches.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{SelectError, SelectResult};
use crate::execution::BoundStrategy;
use crate::metadata::{OperationKind, OperationSignature};
use crate::strategy::{SharedStrategy, Strategy};

type Bucket<I, O> = Vec<SharedStrategy<I, O>>;

/// Registry of strategies grouped by [`OperationSignature`].
///
/// Within a signature, strategies keep their insertion order; ranking ties
/// are broken by that order.
///
/// # Examples
///
/// ```
/// use u_algoselect::catalog::StrategyCatalog;
/// use u_algoselect::metadata::{AlgoMetadata, OperationKind, TimeComplexity};
/// use u_algoselect::strategy::FnStrategy;
///
/// let mut catalog = StrategyCatalog::new();
/// catalog
///     .register(
///         OperationKind::Sort,
///         FnStrategy::new(
///             AlgoMetadata::new("std", TimeComplexity::Linearithmic),
///             |v: &Vec<i32>| {
///                 let mut out = v.clone();
///                 out.sort();
///                 out
///             },
///         ),
///     )
///     .unwrap();
///
/// let candidates = catalog.candidates_for::<Vec<i32>, Vec<i32>>(OperationKind::Sort);
/// assert_eq!(candidates.len(), 1);
/// ```
#[derive(Default)]
pub struct StrategyCatalog {
    buckets: HashMap<OperationSignature, Box<dyn Any + Send + Sync>>,
    order: Vec<OperationSignature>,
    total: usize,
}

impl StrategyCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `strategy` under `(kind, I, O)`.
    ///
    /// Fails with [`SelectError::DuplicateStrategy`] if a strategy with the
    /// same name is already registered under that signature.
    pub fn register<I, O, S>(&mut self, kind: OperationKind, strategy: S) -> SelectResult<()>
    where
        I: 'static,
        O: 'static,
        S: Strategy<I, O> + 'static,
    {
        self.register_shared(kind, Arc::new(strategy), false)
    }

    /// Registers `strategy`, replacing any same-named strategy in place.
    ///
    /// A replaced strategy keeps its original position in the bucket.
    /// Returns `true` if a strategy was replaced.
    pub fn register_or_replace<I, O, S>(&mut self, kind: OperationKind, strategy: S) -> bool
    where
        I: 'static,
        O: 'static,
        S: Strategy<I, O> + 'static,
    {
        let before = self.total;
        // Replacement never fails.
        let _ = self.register_shared(kind, Arc::new(strategy), true);
        self.total == before
    }

    /// Registers an already shared strategy.
    ///
    /// With `allow_replace == false` a name collision is an error; with
    /// `true` the existing entry is overwritten at its position.
    pub fn register_shared<I, O>(
        &mut self,
        kind: OperationKind,
        strategy: SharedStrategy<I, O>,
        allow_replace: bool,
    ) -> SelectResult<()>
    where
        I: 'static,
        O: 'static,
    {
        let signature = OperationSignature::of::<I, O>(kind);
        let name = strategy.name().to_string();

        if !self.buckets.contains_key(&signature) {
            self.order.push(signature);
        }
        let bucket = self
            .buckets
            .entry(signature)
            .or_insert_with(|| Box::new(Bucket::<I, O>::new()) as Box<dyn Any + Send + Sync>)
            .downcast_mut::<Bucket<I, O>>()
            .ok_or_else(|| SelectError::config(format!("bucket type mismatch for {signature}")))?;

        match bucket.iter().position(|s| s.name() == name) {
            Some(_) if !allow_replace => {
                return Err(SelectError::DuplicateStrategy { name, signature });
            }
            Some(pos) => {
                bucket[pos] = strategy;
                debug!(%signature, strategy = %name, "strategy replaced");
            }
            None => {
                bucket.push(strategy);
                self.total += 1;
                debug!(%signature, strategy = %name, "strategy registered");
            }
        }
        Ok(())
    }

    /// Candidates registered under `(kind, I, O)`, in insertion order.
    ///
    /// Returns an empty slice for unknown signatures. The slice borrows the
    /// catalog, so it can be iterated any number of times.
    pub fn candidates_for<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
    ) -> &[SharedStrategy<I, O>] {
        self.bucket::<I, O>(&OperationSignature::of::<I, O>(kind))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Looks up a strategy by name.
    pub fn by_name<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        name: &str,
    ) -> SelectResult<&SharedStrategy<I, O>> {
        let signature = OperationSignature::of::<I, O>(kind);
        self.bucket::<I, O>(&signature)
            .and_then(|bucket| bucket.iter().find(|s| s.name() == name))
            .ok_or_else(|| SelectError::StrategyNotFound {
                name: name.to_string(),
                signature,
            })
    }

    /// Resolves `name` once into a handle that skips lookup on every call.
    pub fn bind<I: 'static, O: 'static>(
        &self,
        kind: OperationKind,
        name: &str,
    ) -> SelectResult<BoundStrategy<I, O>> {
        BoundStrategy::from_catalog(self, kind, name)
    }

    /// Whether a strategy with `name` is registered under `(kind, I, O)`.
    pub fn contains<I: 'static, O: 'static>(&self, kind: OperationKind, name: &str) -> bool {
        self.by_name::<I, O>(kind, name).is_ok()
    }

    /// Names registered under `(kind, I, O)`, in insertion order.
    pub fn names<I: 'static, O: 'static>(&self, kind: OperationKind) -> Vec<&str> {
        self.candidates_for::<I, O>(kind)
            .iter()
            .map(|s| s.name())
            .collect()
    }

    /// Every signature with at least one strategy, in first-registration order.
    pub fn signatures(&self) -> &[OperationSignature] {
        &self.order
    }

    /// Total number of registered strategies across all signatures.
    pub fn len(&self) -> usize {
        self.total
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    fn bucket<I: 'static, O: 'static>(
        &self,
        signature: &OperationSignature,
    ) -> Option<&Bucket<I, O>> {
        self.buckets
            .get(signature)
            .and_then(|b| b.downcast_ref::<Bucket<I, O>>())
    }
}

impl std::fmt::Debug for StrategyCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyCatalog")
            .field("signatures", &self.order)
            .field("strategies", &self.total)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::metadata::{AlgoMetadata, TimeComplexity};
    use crate::strategy::FnStrategy;

    type Ints = Vec<i64>;

    fn sorter(name: &str, tc: TimeComplexity) -> FnStrategy<Ints, Ints> {
        FnStrategy::new(AlgoMetadata::new(name, tc), |v: &Ints| {
            let mut out = v.clone();
            out.sort();
            out
        })
    }

    #[test]
    fn test_register_and_query() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(OperationKind::Sort, sorter("insertion", TimeComplexity::Quadratic))
            .unwrap();
        catalog
            .register(OperationKind::Sort, sorter("merge", TimeComplexity::Linearithmic))
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.names::<Ints, Ints>(OperationKind::Sort),
            vec!["insertion", "merge"]
        );
        assert_eq!(catalog.signatures().len(), 1);
    }

    #[test]
    fn test_candidates_restartable() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(OperationKind::Sort, sorter("a", TimeComplexity::Linear))
            .unwrap();

        let candidates = catalog.candidates_for::<Ints, Ints>(OperationKind::Sort);
        assert_eq!(candidates.iter().count(), 1);
        assert_eq!(candidates.iter().count(), 1);
        assert_eq!(catalog.candidates_for::<Ints, Ints>(OperationKind::Sort).len(), 1);
    }

    #[test]
    fn test_unknown_signature_is_empty() {
        let catalog = StrategyCatalog::new();
        assert!(catalog.candidates_for::<Ints, Ints>(OperationKind::Sort).is_empty());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(OperationKind::Sort, sorter("merge", TimeComplexity::Linearithmic))
            .unwrap();
        let err = catalog
            .register(OperationKind::Sort, sorter("merge", TimeComplexity::Quadratic))
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::DuplicateStrategy);
        assert_eq!(catalog.len(), 1);
        let kept = catalog
            .by_name::<Ints, Ints>(OperationKind::Sort, "merge")
            .unwrap();
        assert_eq!(kept.metadata().time_complexity(), TimeComplexity::Linearithmic);
    }

    #[test]
    fn test_same_name_under_other_signature_allowed() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(OperationKind::Sort, sorter("merge", TimeComplexity::Linearithmic))
            .unwrap();
        catalog
            .register(
                OperationKind::Sort,
                FnStrategy::new(
                    AlgoMetadata::new("merge", TimeComplexity::Linearithmic),
                    |v: &Vec<u8>| v.clone(),
                ),
            )
            .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.signatures().len(), 2);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(OperationKind::Sort, sorter("a", TimeComplexity::Linear))
            .unwrap();
        catalog
            .register(OperationKind::Sort, sorter("b", TimeComplexity::Linear))
            .unwrap();

        let replaced =
            catalog.register_or_replace(OperationKind::Sort, sorter("a", TimeComplexity::Cubic));
        assert!(replaced);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names::<Ints, Ints>(OperationKind::Sort), vec!["a", "b"]);

        let a = catalog.by_name::<Ints, Ints>(OperationKind::Sort, "a").unwrap();
        assert_eq!(a.metadata().time_complexity(), TimeComplexity::Cubic);
    }

    #[test]
    fn test_replace_appends_when_absent() {
        let mut catalog = StrategyCatalog::new();
        let replaced =
            catalog.register_or_replace(OperationKind::Sort, sorter("a", TimeComplexity::Linear));
        assert!(!replaced);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_by_name_not_found() {
        let catalog = StrategyCatalog::new();
        let err = catalog
            .by_name::<Ints, Ints>(OperationKind::Sort, "missing")
            .err().unwrap();
        assert_eq!(err.kind(), FailureKind::StrategyNotFound);
        assert!(!catalog.contains::<Ints, Ints>(OperationKind::Sort, "missing"));
    }

    #[test]
    fn test_bind() {
        let mut catalog = StrategyCatalog::new();
        catalog
            .register(OperationKind::Sort, sorter("merge", TimeComplexity::Linearithmic))
            .unwrap();

        let bound = catalog.bind::<Ints, Ints>(OperationKind::Sort, "merge").unwrap();
        assert_eq!(bound.name(), "merge");
        assert_eq!(bound.execute_raw(&vec![3, 1, 2]), vec![1, 2, 3]);
        assert!(catalog.bind::<Ints, Ints>(OperationKind::Sort, "heap").is_err());
    }
}
