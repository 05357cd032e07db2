//! cachelab: cache replacement policies and a harness for comparing them.
//!
//! ```text
//!   ┌──────────────┐  AccessSequence  ┌──────────────┐  access / clear  ┌──────────────┐
//!   │   workload   │ ───────────────► │   harness    │ ───────────────► │    policy    │
//!   │  generators  │                  │ (cost model) │ ◄─────────────── │ (7 variants) │
//!   └──────────────┘                  └──────┬───────┘     hit/miss     └──────────────┘
//!                                            │ RunReport / ResultTuple
//!                                            ▼
//!                                        reporting
//! ```
//!
//! Policies are plain single-threaded state machines over keys; they track
//! residency only and never store values. See `DESIGN.md` for the layout.

pub mod builder;
pub mod config;
pub mod cost;
pub mod ds;
pub mod error;
pub mod harness;
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;
pub mod workload;
