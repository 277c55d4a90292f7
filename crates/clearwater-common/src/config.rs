//! Fee schedule configuration.

use serde::{Deserialize, Serialize};

/// Transaction fee schedule, in native currency units.
///
/// The schedule is threaded into the transaction engine at construction;
/// there is no process-wide fee configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Fee for ordinary fee-bearing transactions.
    #[serde(default = "default_fee")]
    pub fee_default: i64,

    /// Fee for payments that create the destination account.
    #[serde(default = "default_fee_create")]
    pub fee_create: i64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            fee_default: default_fee(),
            fee_create: default_fee_create(),
        }
    }
}

fn default_fee() -> i64 {
    100
}

fn default_fee_create() -> i64 {
    1_000
}

impl FeeSchedule {
    /// Load a fee schedule from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
