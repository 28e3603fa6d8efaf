//! Worker executor configuration.

use std::time::Duration;

/// Configuration for [`ThreadWorkerExecutor`](super::ThreadWorkerExecutor)
/// and [`InlineWorkerExecutor`](super::InlineWorkerExecutor).
///
/// # Builder Pattern
///
/// ```
/// use std::time::Duration;
/// use u_algoselect::worker::WorkerConfig;
///
/// let config = WorkerConfig::default()
///     .with_default_timeout(Duration::from_millis(500))
///     .with_max_in_flight(8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerConfig {
    /// Timeout applied when a submission does not name one.
    pub default_timeout: Duration,

    /// Prefix for worker thread names; the job id is appended.
    pub thread_name_prefix: String,

    /// Stack size for worker threads. `None` uses the platform default.
    pub stack_size: Option<usize>,

    /// Maximum number of concurrently running jobs. `None` means unbounded.
    pub max_in_flight: Option<usize>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            default_timeout: Duration::from_secs(5),
            thread_name_prefix: "algo-worker".to_string(),
            stack_size: None,
            max_in_flight: None,
        }
    }
}

impl WorkerConfig {
    /// Sets the default timeout.
    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Sets the thread name prefix.
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Sets the worker stack size in bytes.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Bounds the number of concurrently running jobs.
    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.max_in_flight = Some(limit);
        self
    }

    /// Preset for latency-sensitive callers: short timeout, few jobs at once.
    pub fn interactive() -> Self {
        Self {
            default_timeout: Duration::from_millis(250),
            max_in_flight: Some(4),
            ..Self::default()
        }
    }

    /// Preset for long-running batch work.
    pub fn batch() -> Self {
        Self {
            default_timeout: Duration::from_secs(60),
            ..Self::default()
        }
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_timeout.is_zero() {
            return Err("default_timeout must be > 0".into());
        }
        if self.thread_name_prefix.is_empty() {
            return Err("thread_name_prefix must not be empty".into());
        }
        if self.stack_size == Some(0) {
            return Err("stack_size must be > 0".into());
        }
        if self.max_in_flight == Some(0) {
            return Err("max_in_flight must be > 0".into());
        }
        Ok(())
    }
}
