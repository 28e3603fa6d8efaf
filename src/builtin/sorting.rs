//! Reference sorting strategies over `Vec<T>`.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::metadata::{AlgoMetadata, TimeComplexity};
use crate::strategy::Strategy;

/// Scratch space declared by [`MergeSort`].
///
/// Declared overheads are nominal: a fixed figure per strategy, compared
/// as-is against `SelectorHint::memory_budget_bytes`. They count working
/// space beyond the returned vector, so the in-place sorts declare zero.
/// Merge sort really needs O(n) scratch; this figure covers about 8K
/// word-sized elements.
pub const MERGE_SCRATCH_BYTES: u64 = 64 * 1024;

/// Bound satisfied by element types the sorting plug-ins accept.
pub trait SortElement: Ord + Clone + Send + Sync + 'static {}

impl<T: Ord + Clone + Send + Sync + 'static> SortElement for T {}

/// Insertion sort. O(n²), stable, adaptive, in place.
#[derive(Debug, Clone)]
pub struct InsertionSort<T> {
    meta: AlgoMetadata,
    _marker: PhantomData<fn() -> T>,
}

impl<T> InsertionSort<T> {
    /// Creates the insertion sort strategy.
    pub fn new() -> Self {
        Self {
            meta: AlgoMetadata::new("insertion", TimeComplexity::Quadratic)
                .with_space(TimeComplexity::Constant)
                .with_stable(true)
                .with_adaptive(true)
                .with_description("Insertion sort; near-linear on presorted input"),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for InsertionSort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SortElement> Strategy<Vec<T>, Vec<T>> for InsertionSort<T> {
    fn metadata(&self) -> &AlgoMetadata {
        &self.meta
    }

    fn execute(&self, input: &Vec<T>) -> Vec<T> {
        let mut v = input.clone();
        insertion_sort(&mut v);
        v
    }
}

/// Top-down merge sort. O(n log n), stable, O(n) scratch.
#[derive(Debug, Clone)]
pub struct MergeSort<T> {
    meta: AlgoMetadata,
    _marker: PhantomData<fn() -> T>,
}

impl<T> MergeSort<T> {
    /// Creates the merge sort strategy.
    pub fn new() -> Self {
        Self {
            meta: AlgoMetadata::new("merge", TimeComplexity::Linearithmic)
                .with_space(TimeComplexity::Linear)
                .with_stable(true)
                .with_memory_overhead(MERGE_SCRATCH_BYTES)
                .with_description("Top-down merge sort"),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for MergeSort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SortElement> Strategy<Vec<T>, Vec<T>> for MergeSort<T> {
    fn metadata(&self) -> &AlgoMetadata {
        &self.meta
    }

    fn execute(&self, input: &Vec<T>) -> Vec<T> {
        merge_sort(input)
    }
}

/// Heap sort. O(n log n) worst case, unstable, in place.
#[derive(Debug, Clone)]
pub struct HeapSort<T> {
    meta: AlgoMetadata,
    _marker: PhantomData<fn() -> T>,
}

impl<T> HeapSort<T> {
    /// Creates the heap sort strategy.
    pub fn new() -> Self {
        Self {
            meta: AlgoMetadata::new("heap", TimeComplexity::Linearithmic)
                .with_space(TimeComplexity::Constant)
                .with_description("In-place binary heap sort"),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for HeapSort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SortElement> Strategy<Vec<T>, Vec<T>> for HeapSort<T> {
    fn metadata(&self) -> &AlgoMetadata {
        &self.meta
    }

    fn execute(&self, input: &Vec<T>) -> Vec<T> {
        let mut v = input.clone();
        heap_sort(&mut v);
        v
    }
}

/// Quicksort with median-of-three pivots and three-way partitioning.
/// O(n log n) average, linear on all-equal input, unstable.
#[derive(Debug, Clone)]
pub struct QuickSort<T> {
    meta: AlgoMetadata,
    _marker: PhantomData<fn() -> T>,
}

impl<T> QuickSort<T> {
    /// Creates the quicksort strategy.
    pub fn new() -> Self {
        Self {
            meta: AlgoMetadata::new("quick", TimeComplexity::Linearithmic)
                .with_space(TimeComplexity::Logarithmic)
                .with_description("Three-way quicksort, median-of-three pivot; O(n log n) average"),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for QuickSort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: SortElement> Strategy<Vec<T>, Vec<T>> for QuickSort<T> {
    fn metadata(&self) -> &AlgoMetadata {
        &self.meta
    }

    fn execute(&self, input: &Vec<T>) -> Vec<T> {
        let mut v = input.clone();
        quick_sort(&mut v);
        v
    }
}

/// Minimum input length for [`ParallelSort`].
#[cfg(feature = "parallel")]
pub const PARALLEL_MIN_LEN: usize = 10_000;

/// Rayon's parallel stable sort. Only applies to inputs of at least
/// [`PARALLEL_MIN_LEN`] elements.
#[cfg(feature = "parallel")]
#[derive(Debug, Clone)]
pub struct ParallelSort<T> {
    meta: AlgoMetadata,
    _marker: PhantomData<fn() -> T>,
}

#[cfg(feature = "parallel")]
impl<T> ParallelSort<T> {
    /// Creates the parallel sort strategy.
    pub fn new() -> Self {
        Self {
            meta: AlgoMetadata::new("parallel", TimeComplexity::Linearithmic)
                .with_space(TimeComplexity::Linear)
                .with_stable(true)
                .with_description("Parallel merge sort on the rayon pool"),
            _marker: PhantomData,
        }
    }
}

#[cfg(feature = "parallel")]
impl<T> Default for ParallelSort<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "parallel")]
impl<T: SortElement> Strategy<Vec<T>, Vec<T>> for ParallelSort<T> {
    fn metadata(&self) -> &AlgoMetadata {
        &self.meta
    }

    fn can_apply(&self, input: &Vec<T>, _hint: &crate::hint::SelectorHint) -> bool {
        input.len() >= PARALLEL_MIN_LEN
    }

    fn execute(&self, input: &Vec<T>) -> Vec<T> {
        use rayon::slice::ParallelSliceMut;

        let mut v = input.clone();
        v.par_sort();
        v
    }
}

// ---- algorithms ----

fn insertion_sort<T: Ord>(v: &mut [T]) {
    for i in 1..v.len() {
        let mut j = i;
        while j > 0 && v[j] < v[j - 1] {
            v.swap(j, j - 1);
            j -= 1;
        }
    }
}

fn merge_sort<T: Ord + Clone>(v: &[T]) -> Vec<T> {
    if v.len() <= 1 {
        return v.to_vec();
    }
    let mid = v.len() / 2;
    let left = merge_sort(&v[..mid]);
    let right = merge_sort(&v[mid..]);

    let mut out = Vec::with_capacity(v.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // Ties take from the left run.
        if right[j] < left[i] {
            out.push(right[j].clone());
            j += 1;
        } else {
            out.push(left[i].clone());
            i += 1;
        }
    }
    out.extend_from_slice(&left[i..]);
    out.extend_from_slice(&right[j..]);
    out
}

fn heap_sort<T: Ord>(v: &mut [T]) {
    let n = v.len();
    for start in (0..n / 2).rev() {
        sift_down(v, start, n);
    }
    for end in (1..n).rev() {
        v.swap(0, end);
        sift_down(v, 0, end);
    }
}

fn sift_down<T: Ord>(v: &mut [T], mut root: usize, end: usize) {
    loop {
        let mut child = 2 * root + 1;
        if child >= end {
            return;
        }
        if child + 1 < end && v[child] < v[child + 1] {
            child += 1;
        }
        if v[root] >= v[child] {
            return;
        }
        v.swap(root, child);
        root = child;
    }
}

fn quick_sort<T: Ord>(mut v: &mut [T]) {
    // Recurse into the smaller side, loop on the larger: O(log n) stack.
    while v.len() > 1 {
        let (lt, gt) = partition(v);
        let (left, rest) = std::mem::take(&mut v).split_at_mut(lt);
        let right = &mut rest[gt - lt..];
        if left.len() < right.len() {
            quick_sort(left);
            v = right;
        } else {
            quick_sort(right);
            v = left;
        }
    }
}

/// Three-way partition around the median of first, middle and last.
///
/// Returns `(lt, gt)` with `v[..lt]` below the pivot, `v[lt..gt]` equal to
/// it and `v[gt..]` above it. `v` must not be empty.
fn partition<T: Ord>(v: &mut [T]) -> (usize, usize) {
    let last = v.len() - 1;
    let mid = last / 2;
    if v[mid] < v[0] {
        v.swap(mid, 0);
    }
    if v[last] < v[0] {
        v.swap(last, 0);
    }
    if v[mid] < v[last] {
        v.swap(mid, last);
    }
    v.swap(0, last);

    // v[lt..i] holds pivot-equal elements, so v[lt] is always the pivot.
    let (mut lt, mut i, mut gt) = (0, 1, v.len());
    while i < gt {
        match v[i].cmp(&v[lt]) {
            Ordering::Less => {
                v.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                v.swap(i, gt);
            }
            Ordering::Equal => i += 1,
        }
    }
    (lt, gt)
}
