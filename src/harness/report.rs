//! Measurements produced by the benchmark harness.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which way a pass walked the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One walk over the sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassResult {
    pub direction: Direction,
    /// `hit_rate()` of the policy right after the pass.
    pub hit_rate: f64,
    pub hits: u64,
    pub misses: u64,
    pub accesses: u64,
    /// Measured wall time of the access loop.
    pub wall: Duration,
    /// Total synthetic latency charged, slept or not.
    pub modeled: Duration,
    /// `wall` plus any charge that was not slept.
    pub elapsed: Duration,
}

impl PassResult {
    /// Charge that was accounted for but never slept.
    pub fn unslept(&self) -> Duration {
        self.elapsed.saturating_sub(self.wall)
    }
}

/// Forward pass, clear, settle, reverse pass of one policy over one sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub policy: String,
    pub dataset: String,
    pub capacity: usize,
    pub sequence_len: usize,
    pub forward: PassResult,
    pub reverse: PassResult,
    /// Whole run: both passes, the clear and the settle delay.
    pub elapsed: Duration,
    /// `(forward.hits + reverse.hits) / elapsed` seconds; 0 if `elapsed` is 0.
    pub throughput: f64,
}

impl RunReport {
    pub fn total_hits(&self) -> u64 {
        self.forward.hits + self.reverse.hits
    }

    /// Flattens the report into one tuple per direction.
    ///
    /// Both tuples carry the run's elapsed time and throughput; only the hit
    /// rate is per pass.
    pub fn tuples(&self) -> [ResultTuple; 2] {
        [self.tuple(&self.forward), self.tuple(&self.reverse)]
    }

    fn tuple(&self, pass: &PassResult) -> ResultTuple {
        ResultTuple {
            policy: self.policy.clone(),
            dataset: self.dataset.clone(),
            direction: pass.direction,
            hit_rate: pass.hit_rate,
            elapsed_seconds: self.elapsed.as_secs_f64(),
            throughput: self.throughput,
        }
    }

    /// Format as a single-line summary.
    pub fn summary(&self) -> String {
        format!(
            "{}/{}: fwd_hit={:.2}% rev_hit={:.2}% elapsed={:.4}s throughput={:.2}hits/s",
            self.policy,
            self.dataset,
            self.forward.hit_rate * 100.0,
            self.reverse.hit_rate * 100.0,
            self.elapsed.as_secs_f64(),
            self.throughput,
        )
    }
}

/// One row of the reporting stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultTuple {
    pub policy: String,
    pub dataset: String,
    pub direction: Direction,
    pub hit_rate: f64,
    pub elapsed_seconds: f64,
    pub throughput: f64,
}

/// Hits per second, or 0 when no time elapsed.
pub fn throughput(hits: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs == 0.0 { 0.0 } else { hits as f64 / secs }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pass(direction: Direction, hits: u64) -> PassResult {
        PassResult {
            direction,
            hit_rate: hits as f64 / 10.0,
            hits,
            misses: 10 - hits,
            accesses: 10,
            wall: Duration::from_millis(1),
            modeled: Duration::from_millis(4),
            elapsed: Duration::from_millis(5),
        }
    }

    fn report() -> RunReport {
        RunReport {
            policy: "LRU".into(),
            dataset: "uniform".into(),
            capacity: 3,
            sequence_len: 10,
            forward: pass(Direction::Forward, 2),
            reverse: pass(Direction::Reverse, 3),
            elapsed: Duration::from_millis(500),
            throughput: throughput(5, Duration::from_millis(500)),
        }
    }

    #[test]
    fn throughput_guards_zero_elapsed() {
        assert_eq!(throughput(10, Duration::ZERO), 0.0);
        assert_eq!(throughput(10, Duration::from_secs(2)), 5.0);
    }

    #[test]
    fn tuples_split_by_direction() {
        let r = report();
        assert_eq!(r.total_hits(), 5);
        let [fwd, rev] = r.tuples();
        assert_eq!(fwd.direction, Direction::Forward);
        assert_eq!(rev.direction, Direction::Reverse);
        assert!((fwd.hit_rate - 0.2).abs() < 1e-12);
        assert!((rev.hit_rate - 0.3).abs() < 1e-12);
        assert_eq!(fwd.elapsed_seconds, 0.5);
        assert_eq!(fwd.throughput, 10.0);
        assert_eq!(fwd.throughput, rev.throughput);
    }

    #[test]
    fn tuple_serializes_as_flat_object() {
        let [fwd, _] = report().tuples();
        let json = serde_json::to_value(&fwd).unwrap();
        assert_eq!(json["policy"], "LRU");
        assert_eq!(json["dataset"], "uniform");
        assert_eq!(json["direction"], "forward");
    }

    #[test]
    fn unslept_is_elapsed_minus_wall() {
        assert_eq!(pass(Direction::Forward, 1).unslept(), Duration::from_millis(4));
    }

    #[test]
    fn summary_mentions_policy_and_dataset() {
        let s = report().summary();
        assert!(s.starts_with("LRU/uniform:"));
        assert!(s.contains("rev_hit=30.00%"));
    }
}
