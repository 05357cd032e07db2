//! # Metrics Trait Hierarchy
//!
//! Recording and snapshotting are split into small traits so policies only
//! write counters and the harness only reads them.
//!
//! ## Architecture
//!
//! ```text
//!                      ┌─────────────────────────────┐
//!                      │     CoreMetricsRecorder     │
//!                      │  hit/miss/insert/evict      │
//!                      │  clear                      │
//!                      └──────────────┬──────────────┘
//!                                     │
//!                    ┌────────────────┴────────────────┐
//!                    ▼                                 ▼
//!              ┌──────────┐                      ┌──────────┐
//!              │   Arc    │                      │  Clock   │
//!              │ Recorder │                      │ Recorder │
//!              └──────────┘                      └──────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │
//!   └──────────────────────────────┘
//! ```
//!
//! FIFO, LRU, LFU, MRU and Random Replacement only need the core counters.

/// Common counters for any replacement policy.
pub trait CoreMetricsRecorder {
    fn record_hit(&mut self);
    fn record_miss(&mut self);
    fn record_insert(&mut self);
    fn record_eviction(&mut self);
    fn record_clear(&mut self);
}

/// Metrics for ARC list movement.
pub trait ArcMetricsRecorder: CoreMetricsRecorder {
    fn record_t1_to_t2_promotion(&mut self);
    fn record_b1_ghost_hit(&mut self);
    fn record_b2_ghost_hit(&mut self);
    fn record_t1_eviction(&mut self);
    fn record_t2_eviction(&mut self);
}

/// Metrics for the clock sweep.
pub trait ClockMetricsRecorder: CoreMetricsRecorder {
    fn record_hand_advance(&mut self);
    fn record_ref_bit_reset(&mut self);
}

/// Read a point-in-time copy of a policy's counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
