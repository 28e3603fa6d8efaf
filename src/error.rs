//! Failure taxonomy.
//!
//! Every failure is captured where it happens and returned as a
//! [`SelectError`]; nothing crosses a public call as a panic. Callers
//! branch on [`SelectError::kind`] when they only need the category.

use std::time::Duration;

use thiserror::Error;

use crate::metadata::OperationSignature;

/// Error returned by catalog, selection, execution and worker operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectError {
    /// No strategy is registered under the signature.
    #[error("no strategy registered for {signature}")]
    NoStrategyRegistered {
        /// The queried signature.
        signature: OperationSignature,
    },

    /// Strategies exist, but none applies to this input and hint.
    #[error("none of {candidates} candidate(s) for {signature} applies to this input")]
    NoApplicableStrategy {
        /// The queried signature.
        signature: OperationSignature,
        /// Number of registered candidates that were considered.
        candidates: usize,
    },

    /// A strategy with this name is already registered under the signature.
    #[error("strategy '{name}' is already registered for {signature}")]
    DuplicateStrategy {
        /// Colliding strategy name.
        name: String,
        /// Signature of the collision.
        signature: OperationSignature,
    },

    /// Direct lookup by name found nothing.
    #[error("strategy '{name}' not found for {signature}")]
    StrategyNotFound {
        /// Requested name.
        name: String,
        /// Signature that was searched.
        signature: OperationSignature,
    },

    /// The chosen strategy panicked while executing.
    #[error("strategy '{strategy}' failed: {message}")]
    ExecutionFailure {
        /// Name of the strategy that faulted.
        strategy: String,
        /// Captured panic message.
        message: String,
    },

    /// A worker did not finish before its deadline.
    #[error("strategy '{strategy}' timed out after {timeout:?}")]
    Timeout {
        /// Name of the strategy that timed out.
        strategy: String,
        /// The deadline that was exceeded.
        timeout: Duration,
    },

    /// A worker faulted while running the strategy.
    #[error("worker running '{strategy}' crashed: {message}")]
    WorkerCrashed {
        /// Name of the strategy the worker was running.
        strategy: String,
        /// Captured panic message.
        message: String,
    },

    /// The worker executor was shut down before the job finished.
    #[error("worker executor shut down before '{strategy}' completed")]
    WorkerShutdown {
        /// Name of the strategy whose job was cancelled.
        strategy: String,
    },

    /// The worker executor already runs its maximum number of jobs.
    #[error("worker executor saturated ({limit} jobs in flight), rejected '{strategy}'")]
    WorkerSaturated {
        /// Name of the rejected strategy.
        strategy: String,
        /// Configured in-flight limit.
        limit: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Category of a [`SelectError`], for branching without matching fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// See [`SelectError::NoStrategyRegistered`].
    NoStrategyRegistered,
    /// See [`SelectError::NoApplicableStrategy`].
    NoApplicableStrategy,
    /// See [`SelectError::DuplicateStrategy`].
    DuplicateStrategy,
    /// See [`SelectError::StrategyNotFound`].
    StrategyNotFound,
    /// See [`SelectError::ExecutionFailure`].
    ExecutionFailure,
    /// See [`SelectError::Timeout`].
    Timeout,
    /// See [`SelectError::WorkerCrashed`].
    WorkerCrashed,
    /// See [`SelectError::WorkerShutdown`].
    WorkerShutdown,
    /// See [`SelectError::WorkerSaturated`].
    WorkerSaturated,
    /// See [`SelectError::InvalidConfig`].
    InvalidConfig,
}

/// Result alias used throughout the crate.
pub type SelectResult<T> = Result<T, SelectError>;

impl SelectError {
    /// The category of this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            SelectError::NoStrategyRegistered { .. } => FailureKind::NoStrategyRegistered,
            SelectError::NoApplicableStrategy { .. } => FailureKind::NoApplicableStrategy,
            SelectError::DuplicateStrategy { .. } => FailureKind::DuplicateStrategy,
            SelectError::StrategyNotFound { .. } => FailureKind::StrategyNotFound,
            SelectError::ExecutionFailure { .. } => FailureKind::ExecutionFailure,
            SelectError::Timeout { .. } => FailureKind::Timeout,
            SelectError::WorkerCrashed { .. } => FailureKind::WorkerCrashed,
            SelectError::WorkerShutdown { .. } => FailureKind::WorkerShutdown,
            SelectError::WorkerSaturated { .. } => FailureKind::WorkerSaturated,
            SelectError::InvalidConfig(_) => FailureKind::InvalidConfig,
        }
    }

    /// Whether repeating the same call could succeed without other changes.
    ///
    /// Only deadline and capacity failures qualify; everything else is
    /// deterministic for a fixed catalog, input and hint.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SelectError::Timeout { .. } | SelectError::WorkerSaturated { .. }
        )
    }

    /// Name of the strategy involved, when there is one.
    pub fn strategy_name(&self) -> Option<&str> {
        match self {
            SelectError::DuplicateStrategy { name, .. }
            | SelectError::StrategyNotFound { name, .. } => Some(name),
            SelectError::ExecutionFailure { strategy, .. }
            | SelectError::Timeout { strategy, .. }
            | SelectError::WorkerCrashed { strategy, .. }
            | SelectError::WorkerShutdown { strategy }
            | SelectError::WorkerSaturated { strategy, .. } => Some(strategy),
            _ => None,
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        SelectError::InvalidConfig(msg.into())
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "strategy panicked with a non-string payload".to_string()
    }
}
