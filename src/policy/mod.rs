//! Replacement policies.
//!
//! | Policy | Type           | Victim                                      |
//! |--------|----------------|---------------------------------------------|
//! | FIFO   | [`FifoPolicy`] | Oldest inserted                             |
//! | LRU    | [`LruPolicy`]  | Least recently referenced                   |
//! | LFU    | [`LfuPolicy`]  | Lowest count, oldest at that count          |
//! | MRU    | [`MruPolicy`]  | Most recently referenced                    |
//! | RR     | [`RandomPolicy`] | Uniformly random slot                     |
//! | ARC    | [`ArcPolicy`]  | T1 or T2 tail, chosen by list/ghost ratio   |
//! | Clock  | [`ClockPolicy`] | First unreferenced slot from the hand      |
//!
//! Every policy implements [`ReplacementPolicy`](crate::traits::ReplacementPolicy)
//! and offers the same `new` / `try_new(capacity, expected_len)` pair.

pub mod arc;
pub mod clock;
pub mod fifo;
pub mod lfu;
pub mod lru;
pub mod mru;
pub mod random;

pub use arc::ArcPolicy;
pub use clock::ClockPolicy;
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;
pub use mru::MruPolicy;
pub use random::RandomPolicy;
