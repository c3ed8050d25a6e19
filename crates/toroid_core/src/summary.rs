//! Whole-lattice aggregates for logs and run reports.

use serde::{Deserialize, Serialize};
use toroid_data::CellState;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldSummary {
    pub cells: usize,
    pub mean_temperature: f32,
    pub min_temperature: f32,
    pub max_temperature: f32,
    pub mean_illness: f32,
    /// Cells with any illness at all.
    pub infected_cells: usize,
    pub max_abs_height: f32,
    /// Σ height², a rough measure of how much the wave field still moves.
    pub wave_energy: f64,
}

impl FieldSummary {
    #[must_use]
    pub fn from_cells(cells: &[CellState]) -> Self {
        if cells.is_empty() {
            return Self::default();
        }

        let mut temperature_sum = 0.0f64;
        let mut illness_sum = 0.0f64;
        let mut summary = Self {
            cells: cells.len(),
            min_temperature: f32::INFINITY,
            max_temperature: f32::NEG_INFINITY,
            ..Self::default()
        };

        for cell in cells {
            temperature_sum += f64::from(cell.temperature);
            illness_sum += f64::from(cell.illness);
            summary.min_temperature = summary.min_temperature.min(cell.temperature);
            summary.max_temperature = summary.max_temperature.max(cell.temperature);
            if cell.illness > 0.0 {
                summary.infected_cells += 1;
            }
            summary.max_abs_height = summary.max_abs_height.max(cell.height.abs());
            summary.wave_energy += f64::from(cell.height) * f64::from(cell.height);
        }

        let n = cells.len() as f64;
        summary.mean_temperature = (temperature_sum / n) as f32;
        summary.mean_illness = (illness_sum / n) as f32;

        if !summary.is_finite() {
            tracing::warn!(?summary, "Non-finite values in lattice fields");
        }
        summary
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.mean_temperature.is_finite()
            && self.min_temperature.is_finite()
            && self.max_temperature.is_finite()
            && self.mean_illness.is_finite()
            && self.max_abs_height.is_finite()
            && self.wave_energy.is_finite()
    }
}
