//! Synthetic access-sequence generators.
//!
//! Produces the five workloads the harness scores every policy against. All
//! randomness flows through a [`SmallRng`] seeded from [`WorkloadSpec::seed`],
//! so a spec always yields the same sequences.
//!
//! ## Workloads
//!
//! | Kind         | Key at position `i`                                         |
//! |--------------|-------------------------------------------------------------|
//! | `uniform`    | uniform integer in `[low, high]`                            |
//! | `sequential` | `low + i`                                                   |
//! | `periodic`   | `trunc((low + high) / 2 + amplitude · sin(2π i / period))`  |
//! | `repeating`  | `i mod cycle_len`                                           |
//! | `gaussian`   | `trunc(N(mean, std_dev))`, unclamped                        |
//!
//! The periodic midpoint is computed in floating point, so bounds `1..=30`
//! give a midpoint of `15.5` before truncation. Periodic and Gaussian keys
//! may fall outside `[low, high]`, including below zero. Repeating keys always
//! cycle `0..cycle_len` whatever the bounds.
//!
//! ## Example Usage
//!
//! ```
//! use cachelab::workload::{WorkloadKind, WorkloadSpec};
//!
//! let spec = WorkloadSpec { len: 20, cycle_len: 4, ..WorkloadSpec::default() };
//! let seq = spec.generate(WorkloadKind::Repeating).unwrap();
//! assert_eq!(seq.label, "repeating");
//! assert_eq!(&seq.keys[..6], &[0, 1, 2, 3, 0, 1]);
//!
//! let all = spec.generate_all().unwrap();
//! assert_eq!(all.len(), 5);
//! assert!(all.iter().all(|s| s.len() == 20));
//! ```

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The five workload shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkloadKind {
    Uniform,
    Sequential,
    Periodic,
    Repeating,
    Gaussian,
}

impl WorkloadKind {
    /// Every workload, in report order.
    pub const ALL: [WorkloadKind; 5] = [
        WorkloadKind::Uniform,
        WorkloadKind::Sequential,
        WorkloadKind::Periodic,
        WorkloadKind::Repeating,
        WorkloadKind::Gaussian,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkloadKind::Uniform => "uniform",
            WorkloadKind::Sequential => "sequential",
            WorkloadKind::Periodic => "periodic",
            WorkloadKind::Repeating => "repeating",
            WorkloadKind::Gaussian => "gaussian",
        }
    }

    // Distinct per-kind stream so a sequence does not depend on generation order.
    fn stream(self) -> u64 {
        match self {
            WorkloadKind::Uniform => 0x5eed_0001,
            WorkloadKind::Sequential => 0x5eed_0002,
            WorkloadKind::Periodic => 0x5eed_0003,
            WorkloadKind::Repeating => 0x5eed_0004,
            WorkloadKind::Gaussian => 0x5eed_0005,
        }
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for WorkloadKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkloadKind::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownWorkload(s.to_string()))
    }
}

/// A labelled, finite key sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSequence {
    pub label: String,
    pub keys: Vec<i64>,
}

impl AccessSequence {
    pub fn new(label: impl Into<String>, keys: Vec<i64>) -> Self {
        Self {
            label: label.into(),
            keys,
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct keys in the sequence.
    pub fn distinct(&self) -> usize {
        self.keys
            .iter()
            .collect::<rustc_hash::FxHashSet<_>>()
            .len()
    }
}

/// Parameters shared by every workload.
///
/// Defaults: keys `1..=30`, 100 accesses, Gaussian `N(15, 5)`, a 10-key
/// cycle, amplitude 30 over a period of 100, seed 42.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkloadSpec {
    pub low: i64,
    pub high: i64,
    pub len: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub cycle_len: usize,
    pub amplitude: f64,
    pub period: f64,
    pub seed: u64,
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            low: 1,
            high: 30,
            len: 100,
            mean: 15.0,
            std_dev: 5.0,
            cycle_len: 10,
            amplitude: 30.0,
            period: 100.0,
            seed: 42,
        }
    }
}

impl WorkloadSpec {
    /// Checks every parameter the generators depend on.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidBounds`] if `low > high`
    /// - [`ConfigError::InvalidCycleLength`] if `cycle_len == 0`
    /// - [`ConfigError::InvalidPeriod`] if `period` is not positive and finite
    /// - [`ConfigError::InvalidStdDev`] if `std_dev` is negative or not finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.low > self.high {
            return Err(ConfigError::InvalidBounds {
                low: self.low,
                high: self.high,
            });
        }
        if self.cycle_len == 0 {
            return Err(ConfigError::InvalidCycleLength);
        }
        if !(self.period.is_finite() && self.period > 0.0) {
            return Err(ConfigError::InvalidPeriod(self.period));
        }
        if !(self.std_dev.is_finite() && self.std_dev >= 0.0) {
            return Err(ConfigError::InvalidStdDev(self.std_dev));
        }
        Ok(())
    }

    /// Generates one workload.
    pub fn generate(&self, kind: WorkloadKind) -> Result<AccessSequence, ConfigError> {
        self.validate()?;
        let mut rng = SmallRng::seed_from_u64(self.seed ^ kind.stream());
        let n = self.len;
        let keys = match kind {
            WorkloadKind::Uniform => (0..n)
                .map(|_| rng.random_range(self.low..=self.high))
                .collect(),
            WorkloadKind::Sequential => (0..n)
                .map(|i| self.low.saturating_add(i as i64))
                .collect(),
            WorkloadKind::Periodic => {
                let mid = (self.low as f64 + self.high as f64) / 2.0;
                (0..n)
                    .map(|i| {
                        let phase = 2.0 * PI * i as f64 / self.period;
                        (mid + self.amplitude * phase.sin()).trunc() as i64
                    })
                    .collect()
            },
            WorkloadKind::Repeating => (0..n)
                .map(|i| (i % self.cycle_len) as i64)
                .collect(),
            WorkloadKind::Gaussian => {
                let normal = Normal::new(self.mean, self.std_dev)
                    .map_err(|_| ConfigError::InvalidStdDev(self.std_dev))?;
                (0..n)
                    .map(|_| normal.sample(&mut rng).trunc() as i64)
                    .collect()
            },
        };
        Ok(AccessSequence::new(kind.label(), keys))
    }

    /// Generates all five workloads in [`WorkloadKind::ALL`] order.
    pub fn generate_all(&self) -> Result<Vec<AccessSequence>, ConfigError> {
        WorkloadKind::ALL
            .into_iter()
            .map(|kind| self.generate(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(len: usize) -> WorkloadSpec {
        WorkloadSpec {
            len,
            ..WorkloadSpec::default()
        }
    }

    #[test]
    fn uniform_stays_in_bounds() {
        let seq = spec(500).generate(WorkloadKind::Uniform).unwrap();
        assert_eq!(seq.len(), 500);
        assert!(seq.keys.iter().all(|&k| (1..=30).contains(&k)));
        assert!(seq.distinct() > 20);
    }

    #[test]
    fn sequential_counts_up_from_low() {
        let seq = spec(5).generate(WorkloadKind::Sequential).unwrap();
        assert_eq!(seq.keys, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn periodic_matches_reference_formula() {
        let seq = spec(100).generate(WorkloadKind::Periodic).unwrap();
        // i = 0: trunc(15.5) = 15; i = 25: trunc(15.5 + 30) = 45;
        // i = 75: trunc(15.5 - 30) = trunc(-14.5) = -14
        assert_eq!(seq.keys[0], 15);
        assert_eq!(seq.keys[25], 45);
        assert_eq!(seq.keys[75], -14);
    }

    #[test]
    fn repeating_cycles_from_zero_ignoring_bounds() {
        let s = WorkloadSpec {
            len: 7,
            cycle_len: 3,
            low: 5,
            high: 9,
            ..WorkloadSpec::default()
        };
        let seq = s.generate(WorkloadKind::Repeating).unwrap();
        assert_eq!(seq.keys, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn gaussian_centers_on_mean() {
        let seq = spec(2000).generate(WorkloadKind::Gaussian).unwrap();
        let mean = seq.keys.iter().sum::<i64>() as f64 / seq.len() as f64;
        // trunc() biases toward zero by at most 1.
        assert!((13.5..16.0).contains(&mean), "mean was {mean}");
    }

    #[test]
    fn zero_std_dev_is_constant() {
        let s = WorkloadSpec {
            len: 10,
            std_dev: 0.0,
            ..WorkloadSpec::default()
        };
        let seq = s.generate(WorkloadKind::Gaussian).unwrap();
        assert!(seq.keys.iter().all(|&k| k == 15));
    }

    #[test]
    fn same_seed_same_sequences() {
        let a = spec(64).generate_all().unwrap();
        let b = spec(64).generate_all().unwrap();
        assert_eq!(a, b);

        let c = WorkloadSpec {
            seed: 7,
            ..spec(64)
        }
        .generate(WorkloadKind::Uniform)
        .unwrap();
        assert_ne!(a[0], c);
    }

    #[test]
    fn generation_order_does_not_matter() {
        let s = spec(32);
        let alone = s.generate(WorkloadKind::Gaussian).unwrap();
        let all = s.generate_all().unwrap();
        assert_eq!(all[4], alone);
    }

    #[test]
    fn empty_length_is_allowed() {
        let all = spec(0).generate_all().unwrap();
        assert!(all.iter().all(AccessSequence::is_empty));
    }

    #[test]
    fn labels_and_parsing() {
        let labels: Vec<_> = WorkloadKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec!["uniform", "sequential", "periodic", "repeating", "gaussian"]
        );
        assert_eq!("Gaussian".parse::<WorkloadKind>(), Ok(WorkloadKind::Gaussian));
        assert!(matches!(
            "zipf".parse::<WorkloadKind>(),
            Err(ConfigError::UnknownWorkload(_))
        ));
    }

    mod validation {
        use super::*;

        #[test]
        fn inverted_bounds() {
            let s = WorkloadSpec {
                low: 30,
                high: 1,
                ..WorkloadSpec::default()
            };
            assert_eq!(
                s.generate(WorkloadKind::Uniform),
                Err(ConfigError::InvalidBounds { low: 30, high: 1 })
            );
        }

        #[test]
        fn zero_cycle() {
            let s = WorkloadSpec {
                cycle_len: 0,
                ..WorkloadSpec::default()
            };
            assert_eq!(s.validate(), Err(ConfigError::InvalidCycleLength));
        }

        #[test]
        fn bad_period_and_std_dev() {
            let s = WorkloadSpec {
                period: 0.0,
                ..WorkloadSpec::default()
            };
            assert_eq!(s.validate(), Err(ConfigError::InvalidPeriod(0.0)));

            let s = WorkloadSpec {
                std_dev: -1.0,
                ..WorkloadSpec::default()
            };
            assert_eq!(s.validate(), Err(ConfigError::InvalidStdDev(-1.0)));
        }

        #[test]
        fn single_key_bounds_are_valid() {
            let s = WorkloadSpec {
                low: 3,
                high: 3,
                len: 4,
                ..WorkloadSpec::default()
            };
            let seq = s.generate(WorkloadKind::Uniform).unwrap();
            assert_eq!(seq.keys, vec![3, 3, 3, 3]);
        }
    }
}
