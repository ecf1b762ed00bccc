use serde::{Deserialize, Serialize};
use std::fmt;

/// How the vertical reference of an open row is tracked while sweeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceMode {
    /// Compare against the first word placed in the row. A slowly drifting
    /// baseline eventually splits into a new row.
    #[default]
    FirstWord,
    /// Compare against the mean position of the words placed so far.
    RunningMean,
}

impl fmt::Display for ReferenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceMode::FirstWord => write!(f, "first-word"),
            ReferenceMode::RunningMean => write!(f, "running-mean"),
        }
    }
}

impl ReferenceMode {
    pub fn from_str_loose(s: &str) -> Option<ReferenceMode> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "first-word" | "first" => Some(ReferenceMode::FirstWord),
            "running-mean" | "mean" => Some(ReferenceMode::RunningMean),
            _ => None,
        }
    }
}

/// Parameters of a clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Maximum vertical distance (in page units) between a word and the
    /// row reference for the word to join the row.
    pub tolerance: f64,
    #[serde(default)]
    pub reference_mode: ReferenceMode,
}

impl ClusterConfig {
    pub fn new(tolerance: f64) -> Self {
        ClusterConfig {
            tolerance,
            reference_mode: ReferenceMode::default(),
        }
    }

    pub fn with_reference_mode(mut self, reference_mode: ReferenceMode) -> Self {
        self.reference_mode = reference_mode;
        self
    }
}
