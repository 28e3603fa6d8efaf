//! The strategy capability interface.
//!
//! A [`Strategy`] is a named, stateless implementation of one operation.
//! The engine never calls an algorithm by name on the caller's behalf; it
//! asks each registered strategy whether it applies, ranks the survivors
//! from their declared [`AlgoMetadata`](crate::metadata::AlgoMetadata), and
//! executes the winner.
//!
//! [`FnStrategy`] adapts plain closures to the trait.

mod closure;
mod types;

pub use closure::FnStrategy;
pub use types::{SharedStrategy, Strategy};
