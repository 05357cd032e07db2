pub use crate::builder::{AnyPolicy, PolicyBuilder, PolicyKind};
pub use crate::config::LabConfig;
pub use crate::cost::{LatencyMode, LatencyModel};
pub use crate::error::ConfigError;
pub use crate::harness::{Direction, Harness, HarnessConfig, PassResult, ResultTuple, RunReport};
pub use crate::metrics::{MetricsSnapshotProvider, PolicyMetricsSnapshot};
pub use crate::policy::{
    ArcPolicy, ClockPolicy, FifoPolicy, LfuPolicy, LruPolicy, MruPolicy, RandomPolicy,
};
pub use crate::traits::{AccessOutcome, ReplacementPolicy};
pub use crate::workload::{AccessSequence, WorkloadKind, WorkloadSpec};
