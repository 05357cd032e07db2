pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use metrics_impl::PolicyMetrics;
pub use snapshot::PolicyMetricsSnapshot;
pub use traits::{
    ArcMetricsRecorder, ClockMetricsRecorder, CoreMetricsRecorder, MetricsSnapshotProvider,
};
