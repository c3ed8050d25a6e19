use serde::Serialize;
use toroid_core::FieldSummary;
use toroid_data::Dimensionality;

/// End-of-run summary printed by the CLI.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RunReport {
    pub seed: u64,
    /// Config fingerprint; equal fingerprints and scripts replay identically.
    pub fingerprint: String,
    pub dimensionality: Dimensionality,
    pub side: usize,
    pub frames: u64,
    pub ticks: u64,
    pub paused_frames: u64,
    pub perturbations: u64,
    pub infections: u64,
    pub current_buffer: usize,
    pub elapsed_ms: u64,
    pub mean_tick_us: u64,
    pub summary: FieldSummary,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
