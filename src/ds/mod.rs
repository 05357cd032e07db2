pub mod clock_ring;
pub mod frequency_buckets;
pub mod ghost_list;
pub mod intrusive_list;
pub mod keyed_list;
pub mod slot_arena;

pub use clock_ring::{ClockRing, SweepStats};
pub use frequency_buckets::FrequencyBuckets;
pub use ghost_list::GhostList;
pub use intrusive_list::{IntrusiveList, IntrusiveListIter};
pub use keyed_list::KeyedList;
pub use slot_arena::{SlotArena, SlotId};
