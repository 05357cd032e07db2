use crate::metrics::snapshot::PolicyMetricsSnapshot;
use crate::metrics::traits::{ArcMetricsRecorder, ClockMetricsRecorder, CoreMetricsRecorder};

/// Counter block embedded in every policy.
#[derive(Debug, Default, Clone)]
pub struct PolicyMetrics {
    pub accesses: u64,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub clears: u64,
    pub t1_to_t2_promotions: u64,
    pub b1_ghost_hits: u64,
    pub b2_ghost_hits: u64,
    pub t1_evictions: u64,
    pub t2_evictions: u64,
    pub hand_advances: u64,
    pub ref_bit_resets: u64,
}

impl PolicyMetrics {
    /// Builds a snapshot with the caller's current gauges.
    pub fn snapshot_with(&self, len: usize, capacity: usize) -> PolicyMetricsSnapshot {
        PolicyMetricsSnapshot {
            accesses: self.accesses,
            hits: self.hits,
            misses: self.misses,
            inserts: self.inserts,
            evictions: self.evictions,
            clears: self.clears,
            t1_to_t2_promotions: self.t1_to_t2_promotions,
            b1_ghost_hits: self.b1_ghost_hits,
            b2_ghost_hits: self.b2_ghost_hits,
            t1_evictions: self.t1_evictions,
            t2_evictions: self.t2_evictions,
            hand_advances: self.hand_advances,
            ref_bit_resets: self.ref_bit_resets,
            len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for PolicyMetrics {
    fn record_hit(&mut self) {
        self.accesses += 1;
        self.hits += 1;
    }
    fn record_miss(&mut self) {
        self.accesses += 1;
        self.misses += 1;
    }
    fn record_insert(&mut self) {
        self.inserts += 1;
    }
    fn record_eviction(&mut self) {
        self.evictions += 1;
    }
    fn record_clear(&mut self) {
        self.clears += 1;
    }
}

impl ArcMetricsRecorder for PolicyMetrics {
    fn record_t1_to_t2_promotion(&mut self) {
        self.t1_to_t2_promotions += 1;
    }
    fn record_b1_ghost_hit(&mut self) {
        self.b1_ghost_hits += 1;
    }
    fn record_b2_ghost_hit(&mut self) {
        self.b2_ghost_hits += 1;
    }
    fn record_t1_eviction(&mut self) {
        self.t1_evictions += 1;
    }
    fn record_t2_eviction(&mut self) {
        self.t2_evictions += 1;
    }
}

impl ClockMetricsRecorder for PolicyMetrics {
    fn record_hand_advance(&mut self) {
        self.hand_advances += 1;
    }
    fn record_ref_bit_reset(&mut self) {
        self.ref_bit_resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_counters_split_hits_and_misses() {
        let mut m = PolicyMetrics::default();
        m.record_hit();
        m.record_miss();
        m.record_miss();
        m.record_insert();
        m.record_eviction();
        m.record_clear();

        let snap = m.snapshot_with(3, 10);
        assert_eq!(snap.accesses, 3);
        assert_eq!(snap.hits, 1);
        assert_eq!(snap.misses, 2);
        assert_eq!(snap.inserts, 1);
        assert_eq!(snap.evictions, 1);
        assert_eq!(snap.clears, 1);
        assert_eq!(snap.len, 3);
        assert_eq!(snap.capacity, 10);
        assert!((snap.lifetime_hit_ratio() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn policy_specific_counters_start_at_zero() {
        let mut m = PolicyMetrics::default();
        assert_eq!(m.snapshot_with(0, 1).lifetime_hit_ratio(), 0.0);
        m.record_b2_ghost_hit();
        m.record_hand_advance();
        let snap = m.snapshot_with(0, 1);
        assert_eq!(snap.b2_ghost_hits, 1);
        assert_eq!(snap.hand_advances, 1);
        assert_eq!(snap.t1_to_t2_promotions, 0);
        assert_eq!(snap.ref_bit_resets, 0);
    }
}
