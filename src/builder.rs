//! Unified builder for every replacement policy.
//!
//! Lets the harness and the driver pick a policy by value ([`PolicyKind`])
//! and drive it through one concrete type ([`AnyPolicy`]) without boxing.
//!
//! ## Example
//!
//! ```rust
//! use cachelab::builder::{PolicyBuilder, PolicyKind};
//! use cachelab::traits::ReplacementPolicy;
//!
//! let mut policy = PolicyBuilder::new(2)
//!     .expected_len(4)
//!     .build::<i64>(PolicyKind::Lru)
//!     .unwrap();
//! policy.access(1);
//! policy.access(2);
//! policy.access(1);
//! assert_eq!(policy.access(3).evicted(), Some(&2));
//! assert_eq!(policy.name(), "LRU");
//! ```

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::metrics::{MetricsSnapshotProvider, PolicyMetricsSnapshot};
use crate::policy::{
    ArcPolicy, ClockPolicy, FifoPolicy, LfuPolicy, LruPolicy, MruPolicy, RandomPolicy,
};
use crate::traits::{AccessOutcome, ReplacementPolicy};

/// Available replacement policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// First In, First Out eviction.
    Fifo,
    /// Least Recently Used eviction.
    Lru,
    /// Least Frequently Used eviction (FIFO among ties).
    Lfu,
    /// Most Recently Used eviction.
    Mru,
    /// Random Replacement.
    #[serde(alias = "rr")]
    Random,
    /// Simplified Adaptive Replacement Cache.
    Arc,
    /// Clock / second chance.
    Clock,
}

impl PolicyKind {
    /// Every policy, in report order.
    pub const ALL: [PolicyKind; 7] = [
        PolicyKind::Fifo,
        PolicyKind::Lru,
        PolicyKind::Lfu,
        PolicyKind::Mru,
        PolicyKind::Random,
        PolicyKind::Arc,
        PolicyKind::Clock,
    ];

    /// Label used in reports; matches [`ReplacementPolicy::name`].
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Fifo => "FIFO",
            PolicyKind::Lru => "LRU",
            PolicyKind::Lfu => "LFU",
            PolicyKind::Mru => "MRU",
            PolicyKind::Random => "RR",
            PolicyKind::Arc => "ARC",
            PolicyKind::Clock => "Clock",
        }
    }

    /// `true` for policies whose behaviour depends on an RNG.
    pub fn is_randomized(self) -> bool {
        matches!(self, PolicyKind::Random)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lru" => Ok(PolicyKind::Lru),
            "lfu" => Ok(PolicyKind::Lfu),
            "mru" => Ok(PolicyKind::Mru),
            "rr" | "random" => Ok(PolicyKind::Random),
            "arc" => Ok(PolicyKind::Arc),
            "clock" => Ok(PolicyKind::Clock),
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

/// Policy chosen at runtime, dispatched by enum.
pub struct AnyPolicy<K> {
    inner: PolicyInner<K>,
}

enum PolicyInner<K> {
    Fifo(FifoPolicy<K>),
    Lru(LruPolicy<K>),
    Lfu(LfuPolicy<K>),
    Mru(MruPolicy<K>),
    Random(RandomPolicy<K>),
    Arc(ArcPolicy<K>),
    Clock(ClockPolicy<K>),
}

macro_rules! dispatch {
    ($inner:expr, $p:ident => $body:expr) => {
        match $inner {
            PolicyInner::Fifo($p) => $body,
            PolicyInner::Lru($p) => $body,
            PolicyInner::Lfu($p) => $body,
            PolicyInner::Mru($p) => $body,
            PolicyInner::Random($p) => $body,
            PolicyInner::Arc($p) => $body,
            PolicyInner::Clock($p) => $body,
        }
    };
}

impl<K> AnyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    /// Which policy this instance runs.
    pub fn kind(&self) -> PolicyKind {
        match &self.inner {
            PolicyInner::Fifo(_) => PolicyKind::Fifo,
            PolicyInner::Lru(_) => PolicyKind::Lru,
            PolicyInner::Lfu(_) => PolicyKind::Lfu,
            PolicyInner::Mru(_) => PolicyKind::Mru,
            PolicyInner::Random(_) => PolicyKind::Random,
            PolicyInner::Arc(_) => PolicyKind::Arc,
            PolicyInner::Clock(_) => PolicyKind::Clock,
        }
    }
}

impl<K> ReplacementPolicy<K> for AnyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn name(&self) -> &'static str {
        dispatch!(&self.inner, p => p.name())
    }

    fn access(&mut self, key: K) -> AccessOutcome<K> {
        dispatch!(&mut self.inner, p => p.access(key))
    }

    fn clear(&mut self) {
        dispatch!(&mut self.inner, p => p.clear())
    }

    fn hits(&self) -> u64 {
        dispatch!(&self.inner, p => p.hits())
    }

    fn len(&self) -> usize {
        dispatch!(&self.inner, p => p.len())
    }

    fn capacity(&self) -> usize {
        dispatch!(&self.inner, p => p.capacity())
    }

    fn expected_len(&self) -> usize {
        dispatch!(&self.inner, p => p.expected_len())
    }

    fn contains(&self, key: &K) -> bool {
        dispatch!(&self.inner, p => p.contains(key))
    }

    fn resident_keys(&self) -> Vec<K> {
        dispatch!(&self.inner, p => p.resident_keys())
    }
}

impl<K> MetricsSnapshotProvider<PolicyMetricsSnapshot> for AnyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> PolicyMetricsSnapshot {
        dispatch!(&self.inner, p => p.snapshot())
    }
}

impl<K> fmt::Debug for AnyPolicy<K>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(&self.inner, p => fmt::Debug::fmt(p, f))
    }
}

/// Builder for policy instances.
#[derive(Debug, Clone, Copy)]
pub struct PolicyBuilder {
    capacity: usize,
    expected_len: usize,
    seed: Option<u64>,
}

impl PolicyBuilder {
    /// Starts a builder for `capacity` resident keys.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            expected_len: 0,
            seed: None,
        }
    }

    /// Length of the sequence the policy will be scored against.
    pub fn expected_len(mut self, expected_len: usize) -> Self {
        self.expected_len = expected_len;
        self
    }

    /// Seeds randomized policies; ignored by deterministic ones.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds a policy of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCapacity`] if the capacity is zero.
    pub fn build<K>(self, kind: PolicyKind) -> Result<AnyPolicy<K>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let (capacity, expected_len) = (self.capacity, self.expected_len);
        let inner = match kind {
            PolicyKind::Fifo => PolicyInner::Fifo(FifoPolicy::try_new(capacity, expected_len)?),
            PolicyKind::Lru => PolicyInner::Lru(LruPolicy::try_new(capacity, expected_len)?),
            PolicyKind::Lfu => PolicyInner::Lfu(LfuPolicy::try_new(capacity, expected_len)?),
            PolicyKind::Mru => PolicyInner::Mru(MruPolicy::try_new(capacity, expected_len)?),
            PolicyKind::Random => PolicyInner::Random(match self.seed {
                Some(seed) => RandomPolicy::with_seed(capacity, expected_len, seed)?,
                None => RandomPolicy::try_new(capacity, expected_len)?,
            }),
            PolicyKind::Arc => PolicyInner::Arc(ArcPolicy::try_new(capacity, expected_len)?),
            PolicyKind::Clock => PolicyInner::Clock(ClockPolicy::try_new(capacity, expected_len)?),
        };
        Ok(AnyPolicy { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_policies_basic_ops() {
        for kind in PolicyKind::ALL {
            let mut policy = PolicyBuilder::new(10)
                .expected_len(4)
                .seed(7)
                .build::<u64>(kind)
                .unwrap();

            assert_eq!(policy.kind(), kind);
            assert_eq!(policy.name(), kind.name());
            assert!(policy.access(1).is_miss());
            assert!(policy.access(2).is_miss());
            assert!(policy.access(1).is_hit());
            assert!(policy.contains(&2));
            assert!(!policy.contains(&99));
            assert_eq!(policy.len(), 2);
            assert_eq!(policy.capacity(), 10);
            assert_eq!(policy.hits(), 1);
            assert!((policy.hit_rate() - 0.25).abs() < 1e-12);
            assert_eq!(policy.metrics().accesses, 3);

            policy.clear();
            assert!(policy.is_empty());
            assert_eq!(policy.hits(), 0);
            assert_eq!(policy.expected_len(), 4);
        }
    }

    #[test]
    fn test_capacity_enforcement() {
        let mut policy = PolicyBuilder::new(2).build::<u64>(PolicyKind::Lru).unwrap();
        policy.access(1);
        policy.access(2);
        policy.access(3);
        assert_eq!(policy.len(), 2);
        assert!(!policy.contains(&1));
    }

    #[test]
    fn test_zero_capacity_is_rejected_for_every_kind() {
        for kind in PolicyKind::ALL {
            let err = PolicyBuilder::new(0).build::<u64>(kind).unwrap_err();
            assert_eq!(err, ConfigError::InvalidCapacity { capacity: 0 });
        }
    }

    #[test]
    fn test_policy_kind_parsing() {
        assert_eq!("lru".parse::<PolicyKind>(), Ok(PolicyKind::Lru));
        assert_eq!("RR".parse::<PolicyKind>(), Ok(PolicyKind::Random));
        assert_eq!("Clock".parse::<PolicyKind>(), Ok(PolicyKind::Clock));
        assert!(matches!(
            "lirs".parse::<PolicyKind>(),
            Err(ConfigError::UnknownPolicy(_))
        ));
        for kind in PolicyKind::ALL {
            assert_eq!(kind.to_string().parse::<PolicyKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_policy_kind_serde() {
        assert_eq!(serde_json::to_string(&PolicyKind::Arc).unwrap(), "\"arc\"");
        let parsed: PolicyKind = serde_json::from_str("\"rr\"").unwrap();
        assert_eq!(parsed, PolicyKind::Random);
    }
}
