//! Error types for the cachelab library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when policy, workload or lab configuration
//!   parameters are invalid (e.g. zero capacity, inverted key bounds), or when
//!   a configuration file cannot be read or parsed.
//!
//! Policies never fail once constructed: `access`, `clear` and `hit_rate` are
//! total over every reachable state, so the only fallible surface is
//! construction and configuration.
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::error::ConfigError;
//! use cachelab::policy::lru::LruPolicy;
//!
//! // Fallible constructor for user-configurable parameters
//! let policy: Result<LruPolicy<u64>, ConfigError> = LruPolicy::try_new(10, 100);
//! assert!(policy.is_ok());
//!
//! // Zero capacity is rejected before any access
//! let bad = LruPolicy::<u64>::try_new(0, 100);
//! assert_eq!(bad.unwrap_err(), ConfigError::InvalidCapacity { capacity: 0 });
//! ```

use thiserror::Error;

/// Error returned when configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LruPolicy::try_new`](crate::policy::lru::LruPolicy::try_new),
/// [`WorkloadSpec::validate`](crate::workload::WorkloadSpec::validate) and
/// [`LabConfig::load`](crate::config::LabConfig::load).
///
/// # Example
///
/// ```
/// use cachelab::error::ConfigError;
///
/// let err = ConfigError::InvalidCapacity { capacity: 0 };
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Cache capacity must be at least one entry.
    #[error("cache capacity must be greater than zero, got {capacity}")]
    InvalidCapacity { capacity: usize },

    /// Workload key bounds are inverted.
    #[error("workload bounds are inverted: low {low} > high {high}")]
    InvalidBounds { low: i64, high: i64 },

    /// Repeating-cycle workloads need at least one distinct key.
    #[error("cycle length must be greater than zero")]
    InvalidCycleLength,

    /// Periodic workloads need a positive, finite period.
    #[error("period must be a positive finite number, got {0}")]
    InvalidPeriod(f64),

    /// Gaussian workloads need a finite, non-negative standard deviation.
    #[error("standard deviation must be finite and non-negative, got {0}")]
    InvalidStdDev(f64),

    /// A latency or delay value was negative or not finite.
    #[error("{name} must be a finite, non-negative number of seconds, got {value}")]
    InvalidDuration { name: &'static str, value: f64 },

    /// A policy name did not match any known kind.
    #[error("unknown policy: {0:?}")]
    UnknownPolicy(String),

    /// A workload name did not match any known kind.
    #[error("unknown workload: {0:?}")]
    UnknownWorkload(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(String),

    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Rejects a zero capacity with [`ConfigError::InvalidCapacity`].
#[inline]
pub(crate) fn check_capacity(capacity: usize) -> Result<(), ConfigError> {
    if capacity == 0 {
        return Err(ConfigError::InvalidCapacity { capacity });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
