//! Input-driven height perturbation.

use crate::error::Result;
use crate::indexer::GridIndexer;
use toroid_data::{CellState, Dimensionality, TickInput};

/// Height added by a plain poke. Bigger lattices spread a poke over more
/// neighbours, so the default grows with the axis count.
#[must_use]
pub fn default_height_delta(dims: Dimensionality) -> f32 {
    match dims {
        Dimensionality::Two => 1.0,
        Dimensionality::Three => 2.0,
        Dimensionality::Four => 3.0,
    }
}

/// Adds the input's height delta to the selected cell of `previous`.
///
/// Only `height` changes; no clamping. Returns the touched index, or `None`
/// when the input carries no perturbation.
pub fn inject_perturbation(
    indexer: &GridIndexer,
    previous: &mut [CellState],
    input: &TickInput,
) -> Result<Option<usize>> {
    let Some((coord, delta)) = input.perturbation() else {
        return Ok(None);
    };
    let index = indexer.checked_index(&coord)?;
    previous[index].height += delta;
    tracing::debug!(%coord, index, delta, "Injected height perturbation");
    Ok(Some(index))
}
