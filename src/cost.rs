//! Synthetic hit/miss latency.
//!
//! Every policy pays the same fixed price per access: a short one for a hit
//! and a long one for a miss. The harness charges each access through a
//! [`LatencyModel`] and keeps the running total in a [`CostLedger`].
//!
//! ## Modes
//!
//! ```text
//!   LatencyMode::Simulated (default)        LatencyMode::Sleep
//!   ─────────────────────────────────        ──────────────────────────────
//!   charge() returns the cost only;          charge() sleeps for the cost
//!   the harness adds the ledger total        and returns it; wall time
//!   to measured wall time                    already includes it
//! ```
//!
//! Both modes yield comparable elapsed times. `Simulated` lets a full
//! policy × workload matrix finish in milliseconds instead of seconds.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use cachelab::cost::{CostLedger, LatencyModel};
//!
//! let model = LatencyModel::default();
//! let mut ledger = CostLedger::default();
//! ledger.charge(&model, true);
//! ledger.charge(&model, false);
//!
//! assert_eq!(ledger.hits, 1);
//! assert_eq!(ledger.misses, 1);
//! assert_eq!(ledger.modeled, Duration::from_micros(100) + Duration::from_millis(3));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default hit latency: 0.1 ms.
pub const DEFAULT_HIT_LATENCY: Duration = Duration::from_micros(100);
/// Default miss latency: 3 ms.
pub const DEFAULT_MISS_LATENCY: Duration = Duration::from_millis(3);

/// How a latency charge is applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyMode {
    /// Account for the charge without blocking.
    #[default]
    Simulated,
    /// Block the calling thread for the charge.
    Sleep,
}

/// Fixed, policy-independent access cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyModel {
    #[serde(with = "secs_f64")]
    pub hit: Duration,
    #[serde(with = "secs_f64")]
    pub miss: Duration,
    pub mode: LatencyMode,
}

impl Default for LatencyModel {
    fn default() -> Self {
        Self {
            hit: DEFAULT_HIT_LATENCY,
            miss: DEFAULT_MISS_LATENCY,
            mode: LatencyMode::Simulated,
        }
    }
}

impl LatencyModel {
    /// Builds a model from fractional seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if either value is negative,
    /// NaN or infinite.
    pub fn from_secs_f64(hit: f64, miss: f64, mode: LatencyMode) -> Result<Self, ConfigError> {
        Ok(Self {
            hit: duration_from_secs("hit latency", hit)?,
            miss: duration_from_secs("miss latency", miss)?,
            mode,
        })
    }

    /// A model that charges nothing; useful for pure hit-rate runs.
    pub fn free() -> Self {
        Self {
            hit: Duration::ZERO,
            miss: Duration::ZERO,
            mode: LatencyMode::Simulated,
        }
    }

    /// Returns the cost of one access.
    #[inline]
    pub fn cost(&self, hit: bool) -> Duration {
        if hit { self.hit } else { self.miss }
    }

    /// Applies the cost of one access according to [`LatencyMode`].
    pub fn charge(&self, hit: bool) -> Duration {
        let cost = self.cost(hit);
        if self.mode == LatencyMode::Sleep && !cost.is_zero() {
            std::thread::sleep(cost);
        }
        cost
    }
}

/// Running per-pass totals.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CostLedger {
    pub hits: u64,
    pub misses: u64,
    /// Sum of every charge, whether or not it was slept.
    pub modeled: Duration,
}

impl CostLedger {
    pub fn charge(&mut self, model: &LatencyModel, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        self.modeled += model.charge(hit);
    }

    pub fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Charge that still has to be added to measured wall time.
    pub fn unslept(&self, model: &LatencyModel) -> Duration {
        match model.mode {
            LatencyMode::Simulated => self.modeled,
            LatencyMode::Sleep => Duration::ZERO,
        }
    }
}

pub(crate) fn duration_from_secs(name: &'static str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidDuration { name, value })
}

/// Serde adapter: `Duration` as fractional seconds.
pub(crate) mod secs_f64 {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(format!(
                "expected a finite, non-negative number of seconds, got {secs}"
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_model_matches_reference_constants() {
        let model = LatencyModel::default();
        assert_eq!(model.hit.as_secs_f64(), 0.0001);
        assert_eq!(model.miss.as_secs_f64(), 0.003);
        assert_eq!(model.mode, LatencyMode::Simulated);
    }

    #[test]
    fn simulated_ledger_reports_unslept_total() {
        let model = LatencyModel::default();
        let mut ledger = CostLedger::default();
        for hit in [true, true, false] {
            ledger.charge(&model, hit);
        }
        assert_eq!(ledger.accesses(), 3);
        assert_eq!(
            ledger.unslept(&model),
            Duration::from_micros(200) + Duration::from_millis(3)
        );
    }

    #[test]
    fn sleep_mode_blocks_and_reports_nothing_unslept() {
        let model = LatencyModel::from_secs_f64(0.0, 0.001, LatencyMode::Sleep).unwrap();
        let mut ledger = CostLedger::default();
        let start = std::time::Instant::now();
        ledger.charge(&model, false);
        assert!(start.elapsed() >= Duration::from_millis(1));
        assert_eq!(ledger.unslept(&model), Duration::ZERO);
        assert_eq!(ledger.modeled, Duration::from_millis(1));
    }

    #[test]
    fn invalid_seconds_are_rejected() {
        let err = LatencyModel::from_secs_f64(-1.0, 0.0, LatencyMode::Simulated).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidDuration {
                name: "hit latency",
                value: -1.0
            }
        );
        assert!(LatencyModel::from_secs_f64(0.0, f64::NAN, LatencyMode::Simulated).is_err());
    }

    #[test]
    fn free_model_costs_nothing() {
        let model = LatencyModel::free();
        assert_eq!(model.cost(true), Duration::ZERO);
        assert_eq!(model.cost(false), Duration::ZERO);
    }

    #[test]
    fn latency_model_serde_uses_seconds() {
        let json = serde_json::to_value(LatencyModel::default()).unwrap();
        assert_eq!(json["hit"], serde_json::json!(0.0001));
        assert_eq!(json["mode"], serde_json::json!("simulated"));

        let parsed: LatencyModel = serde_json::from_str(r#"{"miss": 0.5, "mode": "sleep"}"#).unwrap();
        assert_eq!(parsed.miss, Duration::from_millis(500));
        assert_eq!(parsed.hit, DEFAULT_HIT_LATENCY);
        assert_eq!(parsed.mode, LatencyMode::Sleep);

        assert!(serde_json::from_str::<LatencyModel>(r#"{"hit": -0.1}"#).is_err());
    }
}
