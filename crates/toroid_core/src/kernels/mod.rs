//! Per-cell update rules.
//!
//! A tick runs three full passes in a fixed order: heat, wave, illness.
//! Every pass reads only the previous buffer and writes only its own fields
//! of the cell's slot in the current buffer, so cells within a pass are
//! independent and the pass can be split across threads freely.

pub mod heat;
pub mod illness;
pub mod wave;

pub use heat::HeatKernel;
pub use illness::IllnessKernel;
pub use wave::WaveKernel;

use toroid_data::CellState;

/// Read-only view of one cell's inputs for a kernel pass.
pub struct CellView<'a> {
    pub index: usize,
    pub previous: &'a [CellState],
    pub neighbors: &'a [usize],
}

impl<'a> CellView<'a> {
    /// The cell's own state from the previous tick.
    #[inline(always)]
    #[must_use]
    pub fn own(&self) -> &'a CellState {
        &self.previous[self.index]
    }

    #[inline(always)]
    pub fn neighbor_states(&self) -> impl Iterator<Item = &'a CellState> + '_ {
        let previous = self.previous;
        self.neighbors.iter().map(move |&n| &previous[n])
    }
}

/// One update rule applied to every cell of the lattice.
pub trait CellKernel: Sync {
    const NAME: &'static str;

    fn apply(&self, cell: &CellView<'_>, out: &mut CellState);
}
