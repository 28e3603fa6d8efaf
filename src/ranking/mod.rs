//! Complexity ranking and candidate scoring.
//!
//! - [`ComplexityRanker`]: table mapping a declared complexity to a rank,
//!   with `FavorSimple` and `FavorScalable` presets
//! - [`SelectorPolicy`]: combines ranks with a [`SelectorHint`] into a
//!   deterministic, tie-stable ordering of candidates
//! - [`PolicyConfig`]: weights and thresholds, with presets and validation
//!
//! Scores follow the minimization convention: lower is better.
//!
//! [`SelectorHint`]: crate::hint::SelectorHint

mod config;
mod policy;
mod ranker;

pub use config::PolicyConfig;
pub use policy::{size_adjustment, Ranked, ScoreBreakdown, SelectorPolicy};
pub use ranker::{ComplexityRanker, RankerMode};
