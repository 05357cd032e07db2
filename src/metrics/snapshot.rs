use serde::Serialize;

/// Point-in-time copy of a policy's lifetime counters.
///
/// Counters accumulate across [`clear`](crate::traits::ReplacementPolicy::clear)
/// calls; `clears` records how many resets happened. The per-run hit counter
/// that feeds `hit_rate` lives on the policy itself.
///
/// Policy-specific fields stay zero for policies that do not record them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolicyMetricsSnapshot {
    pub accesses: u64,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub clears: u64,

    // ARC
    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub t1_evictions: u64,
    pub t2_evictions: u64,

    // Clock
    pub hand_advances: u64,
    pub ref_bit_resets: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}

impl PolicyMetricsSnapshot {
    /// Lifetime hit ratio over every recorded access (0 when nothing was accessed).
    pub fn lifetime_hit_ratio(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }
}
