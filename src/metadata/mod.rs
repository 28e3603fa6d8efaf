//! Value objects describing strategies and the catalog keys they live under.
//!
//! - [`TimeComplexity`]: closed set of asymptotic classes with a total order
//! - [`AlgoMetadata`]: a strategy's declared complexity, memory overhead and
//!   capability flags (stability, sorted-input specialization, adaptivity)
//! - [`OperationSignature`]: `(kind, input type, output type)` catalog key
//!
//! All types here are immutable once built and cheap to clone.

mod complexity;
mod signature;
mod types;

pub use complexity::TimeComplexity;
pub use signature::{OperationKind, OperationSignature, TypeTag};
pub use types::AlgoMetadata;
