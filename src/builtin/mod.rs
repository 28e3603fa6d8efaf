//! Reference strategies.
//!
//! Ready-made plug-ins for the two operations most callers need:
//!
//! - Sort, `Vec<T> -> Vec<T>`: [`InsertionSort`], [`MergeSort`],
//!   [`HeapSort`], [`QuickSort`], and `ParallelSort` with the `parallel`
//!   feature
//! - Search, [`SearchQuery<T>`] `-> Option<usize>`: [`LinearSearch`],
//!   [`BinarySearch`]
//!
//! Nothing is registered implicitly; call [`register_sorting`],
//! [`register_searching`] or [`register_all`] during wiring.

mod searching;
mod sorting;

pub use searching::{BinarySearch, LinearSearch, SearchQuery};
pub use sorting::{HeapSort, InsertionSort, MergeSort, QuickSort, SortElement, MERGE_SCRATCH_BYTES};
#[cfg(feature = "parallel")]
pub use sorting::{ParallelSort, PARALLEL_MIN_LEN};

use crate::catalog::StrategyCatalog;
use crate::error::SelectResult;
use crate::metadata::OperationKind;

/// Registers the sorting plug-ins for `Vec<T>` under [`OperationKind::Sort`].
pub fn register_sorting<T: SortElement>(catalog: &mut StrategyCatalog) -> SelectResult<()> {
    catalog.register(OperationKind::Sort, InsertionSort::<T>::new())?;
    catalog.register(OperationKind::Sort, MergeSort::<T>::new())?;
    catalog.register(OperationKind::Sort, HeapSort::<T>::new())?;
    catalog.register(OperationKind::Sort, QuickSort::<T>::new())?;
    #[cfg(feature = "parallel")]
    catalog.register(OperationKind::Sort, ParallelSort::<T>::new())?;
    Ok(())
}

/// Registers the search plug-ins for `SearchQuery<T>` under
/// [`OperationKind::Search`].
pub fn register_searching<T: SortElement>(catalog: &mut StrategyCatalog) -> SelectResult<()> {
    catalog.register(OperationKind::Search, LinearSearch::<T>::new())?;
    catalog.register(OperationKind::Search, BinarySearch::<T>::new())?;
    Ok(())
}

/// Registers every reference plug-in for element type `T`.
pub fn register_all<T: SortElement>(catalog: &mut StrategyCatalog) -> SelectResult<()> {
    register_sorting::<T>(catalog)?;
    register_searching::<T>(catalog)
}
