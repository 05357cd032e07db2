//! Benchmark harness: runs a policy over a sequence in both directions.
//!
//! ## Run Layout
//!
//! ```text
//!   fresh policy(capacity, expected_len = seq.len())
//!        │
//!        ▼
//!   ┌──────────────┐   clear()   ┌────────┐   ┌──────────────┐
//!   │ forward pass │ ──────────► │ settle │ ─►│ reverse pass │
//!   └──────────────┘             └────────┘   └──────────────┘
//!    hit_rate, hits                            hit_rate, hits
//!
//!   elapsed    = wall time of the whole run + unslept latency charges
//!   throughput = (forward hits + reverse hits) / elapsed
//! ```
//!
//! Every access is charged through the configured
//! [`LatencyModel`](crate::cost::LatencyModel). The settle delay follows the
//! same [`LatencyMode`](crate::cost::LatencyMode): slept in `Sleep` mode,
//! accounted for in `Simulated` mode.
//!
//! ## Example
//!
//! ```
//! use cachelab::builder::PolicyKind;
//! use cachelab::harness::{Harness, HarnessConfig};
//! use cachelab::workload::AccessSequence;
//!
//! let harness = Harness::new(HarnessConfig { capacity: 3, ..Default::default() }).unwrap();
//! let seq = AccessSequence::new("demo", vec![1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5]);
//! let report = harness.run(PolicyKind::Lru, &seq).unwrap();
//!
//! assert_eq!(report.forward.hits, 2);
//! assert_eq!(report.tuples().len(), 2);
//! ```

pub mod report;

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::builder::{PolicyBuilder, PolicyKind};
use crate::cost::{CostLedger, LatencyMode, LatencyModel, secs_f64};
use crate::error::{ConfigError, check_capacity};
use crate::traits::ReplacementPolicy;
use crate::workload::AccessSequence;

pub use report::{Direction, PassResult, ResultTuple, RunReport, throughput};

/// Default cache capacity used by the driver.
pub const DEFAULT_CAPACITY: usize = 10;
/// Default pause between the forward and reverse passes.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(10);

/// Harness parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub capacity: usize,
    pub latency: LatencyModel,
    #[serde(with = "secs_f64")]
    pub settle: Duration,
    /// Seed for randomized policies; `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            latency: LatencyModel::default(),
            settle: DEFAULT_SETTLE,
            seed: None,
        }
    }
}

impl HarnessConfig {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_capacity(self.capacity)
    }
}

/// Drives policies over access sequences and measures them.
#[derive(Debug, Clone)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if the configured capacity is zero.
    pub fn new(config: HarnessConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Builds a fresh policy of `kind` and runs it over `seq`.
    ///
    /// # Errors
    ///
    /// Propagates construction errors from [`PolicyBuilder::build`].
    pub fn run(&self, kind: PolicyKind, seq: &AccessSequence) -> Result<RunReport, ConfigError> {
        let mut builder = PolicyBuilder::new(self.config.capacity).expected_len(seq.len());
        if let Some(seed) = self.config.seed {
            builder = builder.seed(seed);
        }
        let mut policy = builder.build::<i64>(kind)?;
        Ok(self.run_with(&mut policy, seq))
    }

    /// Runs an already-constructed policy over `seq`.
    ///
    /// The policy is cleared between the passes; it is left holding the
    /// reverse pass's resident set.
    pub fn run_with<P>(&self, policy: &mut P, seq: &AccessSequence) -> RunReport
    where
        P: ReplacementPolicy<i64> + ?Sized,
    {
        let span = info_span!(
            "run",
            policy = %policy.name(),
            dataset = %seq.label,
            capacity = policy.capacity(),
        );
        let _guard = span.enter();

        let start = Instant::now();
        let forward = self.pass(policy, seq.keys.iter().copied(), Direction::Forward);
        policy.clear();
        let settle_unslept = self.settle();
        let reverse = self.pass(policy, seq.keys.iter().rev().copied(), Direction::Reverse);

        let elapsed = start.elapsed() + forward.unslept() + reverse.unslept() + settle_unslept;
        let total_hits = forward.hits + reverse.hits;
        let report = RunReport {
            policy: policy.name().to_string(),
            dataset: seq.label.clone(),
            capacity: policy.capacity(),
            sequence_len: seq.len(),
            forward,
            reverse,
            elapsed,
            throughput: throughput(total_hits, elapsed),
        };
        info!(
            forward_hit_rate = report.forward.hit_rate,
            reverse_hit_rate = report.reverse.hit_rate,
            elapsed_s = report.elapsed.as_secs_f64(),
            throughput = report.throughput,
            "run complete"
        );
        report
    }

    /// Runs every `(policy, sequence)` pair, datasets outermost.
    ///
    /// # Errors
    ///
    /// Stops at the first pair whose policy cannot be built.
    pub fn run_matrix(
        &self,
        kinds: &[PolicyKind],
        sequences: &[AccessSequence],
    ) -> Result<Vec<RunReport>, ConfigError> {
        let mut reports = Vec::with_capacity(kinds.len() * sequences.len());
        for seq in sequences {
            for &kind in kinds {
                reports.push(self.run(kind, seq)?);
            }
        }
        Ok(reports)
    }

    /// Like [`run_matrix`](Self::run_matrix), with one scoped thread per pair.
    ///
    /// Each pair owns its policy instance; results come back in the same
    /// order `run_matrix` produces.
    ///
    /// # Errors
    ///
    /// Returns the first construction error in matrix order.
    #[cfg(feature = "concurrency")]
    pub fn run_matrix_parallel(
        &self,
        kinds: &[PolicyKind],
        sequences: &[AccessSequence],
    ) -> Result<Vec<RunReport>, ConfigError> {
        use parking_lot::Mutex;

        let pairs: Vec<(PolicyKind, &AccessSequence)> = sequences
            .iter()
            .flat_map(|seq| kinds.iter().map(move |&kind| (kind, seq)))
            .collect();
        let slots: Mutex<Vec<Option<Result<RunReport, ConfigError>>>> =
            Mutex::new((0..pairs.len()).map(|_| None).collect());

        std::thread::scope(|scope| {
            for (idx, &(kind, seq)) in pairs.iter().enumerate() {
                let slots = &slots;
                scope.spawn(move || {
                    let result = self.run(kind, seq);
                    slots.lock()[idx] = Some(result);
                });
            }
        });

        slots.into_inner().into_iter().flatten().collect()
    }

    fn pass<P, I>(&self, policy: &mut P, keys: I, direction: Direction) -> PassResult
    where
        P: ReplacementPolicy<i64> + ?Sized,
        I: Iterator<Item = i64>,
    {
        let model = &self.config.latency;
        let mut ledger = CostLedger::default();
        let start = Instant::now();
        for key in keys {
            let hit = policy.access(key).is_hit();
            ledger.charge(model, hit);
        }
        let wall = start.elapsed();

        let result = PassResult {
            direction,
            hit_rate: policy.hit_rate(),
            hits: ledger.hits,
            misses: ledger.misses,
            accesses: ledger.accesses(),
            wall,
            modeled: ledger.modeled,
            elapsed: wall + ledger.unslept(model),
        };
        debug!(
            %direction,
            hit_rate = result.hit_rate,
            hits = result.hits,
            misses = result.misses,
            elapsed_s = result.elapsed.as_secs_f64(),
            "pass complete"
        );
        result
    }

    /// Applies the settle delay, returning the part that was not slept.
    fn settle(&self) -> Duration {
        let settle = self.config.settle;
        if settle.is_zero() {
            return Duration::ZERO;
        }
        match self.config.latency.mode {
            LatencyMode::Sleep => {
                std::thread::sleep(settle);
                Duration::ZERO
            },
            LatencyMode::Simulated => settle,
        }
    }
}
