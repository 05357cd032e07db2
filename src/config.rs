//! Lab configuration.
//!
//! One JSON document sets the harness parameters, the workload generator and
//! which policies and workloads make up the matrix. Every field is optional;
//! missing fields take their defaults.
//!
//! ```json
//! {
//!   "harness": { "capacity": 10, "settle": 0.01,
//!                "latency": { "hit": 0.0001, "miss": 0.003, "mode": "simulated" } },
//!   "workload": { "low": 1, "high": 30, "len": 100, "seed": 42 },
//!   "policies": ["fifo", "lru", "arc"],
//!   "workloads": ["uniform", "gaussian"]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::builder::PolicyKind;
use crate::error::ConfigError;
use crate::harness::HarnessConfig;
use crate::workload::{AccessSequence, WorkloadKind, WorkloadSpec};

/// Everything a lab run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub harness: HarnessConfig,
    pub workload: WorkloadSpec,
    pub policies: Vec<PolicyKind>,
    pub workloads: Vec<WorkloadKind>,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            harness: HarnessConfig::default(),
            workload: WorkloadSpec::default(),
            policies: PolicyKind::ALL.to_vec(),
            workloads: WorkloadKind::ALL.to_vec(),
        }
    }
}

impl LabConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed JSON, otherwise whatever
    /// [`validate`](Self::validate) rejects.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: LabConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, then as
    /// [`from_json_str`](Self::from_json_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.harness.validate()?;
        self.workload.validate()
    }

    /// Generates the configured workloads, in configured order.
    pub fn sequences(&self) -> Result<Vec<AccessSequence>, ConfigError> {
        self.workloads
            .iter()
            .map(|&kind| self.workload.generate(kind))
            .collect()
    }
}
