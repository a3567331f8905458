//! Explicit run configuration.
//!
//! Thresholds and substitution tables live here and are passed into the
//! `RunContext` at construction. Nothing in the crate reads ambient globals.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Frequency (Hz) of the master time axis that phases and markers index.
    pub master_hz: f64,

    /// Longest run of invalid samples `repair_gaps` will interpolate across.
    pub max_repair_gap: usize,

    /// Engine numbers a per-engine rule family expands over. An aircraft
    /// with two engines simply lists `[1, 2]`.
    pub engine_numbers: Vec<u8>,

    /// N1 percentage below which an engine is considered cooling down.
    pub cooldown_n1_threshold: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            master_hz: 1.0,
            max_repair_gap: 8,
            engine_numbers: vec![1, 2, 3, 4],
            cooldown_n1_threshold: 60.0,
        }
    }
}
