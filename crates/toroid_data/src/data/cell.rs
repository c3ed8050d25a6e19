use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
#[repr(C)]
/// State of a single lattice cell, stored in a flat buffer indexed by the
/// flattened coordinate.
pub struct CellState {
    /// Unconstrained scalar that relaxes toward the neighbour average.
    pub temperature: f32,
    /// Contagion level in [0, 1].
    pub illness: f32,
    /// Wave displacement.
    pub height: f32,
    /// Height change applied on the previous tick (`new - old`).
    pub height_diff: f32,
}

impl CellState {
    #[must_use]
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature,
            ..Self::default()
        }
    }

    /// Height two ticks ago, recovered from the stored change.
    #[inline(always)]
    #[must_use]
    pub fn prior_height(&self) -> f32 {
        self.height - self.height_diff
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.temperature.is_finite()
            && self.illness.is_finite()
            && self.height.is_finite()
            && self.height_diff.is_finite()
    }
}
