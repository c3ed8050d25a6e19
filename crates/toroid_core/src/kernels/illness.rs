//! Contagion: illness creeps toward the sickest neighbour and never recedes.

use super::{CellKernel, CellView};
use toroid_data::CellState;

#[derive(Debug, Clone, Copy)]
pub struct IllnessKernel<'a> {
    pub speed: f32,
    /// Per-cell spread factor, indexed like the buffers.
    pub noise: &'a [f32],
}

impl CellKernel for IllnessKernel<'_> {
    const NAME: &'static str = "illness";

    #[inline(always)]
    fn apply(&self, cell: &CellView<'_>, out: &mut CellState) {
        let sickest = cell
            .neighbor_states()
            .map(|n| n.illness)
            .fold(0.0f32, f32::max);
        let own = cell.own().illness;
        let gap = (sickest - own).max(0.0);
        let delta = gap * self.speed * self.noise[cell.index];
        out.illness = (own + delta).clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::GridIndexer;
    use crate::kernels::testing::run_sequential;
    use toroid_data::{Coord, Dimensionality};

    fn seeded(idx: &GridIndexer, at: Coord, level: f32) -> Vec<CellState> {
        let mut cells = vec![CellState::default(); idx.cell_count()];
        cells[idx.coordinate_to_index(&at)].illness = level;
        cells
    }

    #[test]
    fn test_spreads_one_step_per_tick() {
        let idx = GridIndexer::new(6, Dimensionality::Two).unwrap();
        let noise = vec![1.0; idx.cell_count()];
        let previous = seeded(&idx, Coord::xy(3, 3), 1.0);
        let mut current = previous.clone();
        run_sequential(
            &IllnessKernel { speed: 0.5, noise: &noise },
            &idx,
            &previous,
            &mut current,
        );

        assert_eq!(current[idx.coordinate_to_index(&Coord::xy(3, 3))].illness, 1.0);
        assert_eq!(current[idx.coordinate_to_index(&Coord::xy(4, 3))].illness, 0.5);
        assert_eq!(current[idx.coordinate_to_index(&Coord::xy(3, 2))].illness, 0.5);
        assert_eq!(current[idx.coordinate_to_index(&Coord::xy(4, 4))].illness, 0.0);
    }

    #[test]
    fn test_never_decreases() {
        let idx = GridIndexer::new(4, Dimensionality::Three).unwrap();
        let noise = vec![0.7; idx.cell_count()];
        let mut previous = vec![CellState::default(); idx.cell_count()];
        for (i, c) in previous.iter_mut().enumerate() {
            c.illness = (i % 5) as f32 / 4.0;
        }
        let mut current = previous.clone();
        run_sequential(
            &IllnessKernel { speed: 1.0, noise: &noise },
            &idx,
            &previous,
            &mut current,
        );
        for (p, c) in previous.iter().zip(current.iter()) {
            assert!(c.illness >= p.illness);
            assert!(c.illness <= 1.0);
        }
    }

    #[test]
    fn test_noise_gates_spread() {
        let idx = GridIndexer::new(4, Dimensionality::Two).unwrap();
        let noise = vec![0.0; idx.cell_count()];
        let previous = seeded(&idx, Coord::xy(1, 1), 1.0);
        let mut current = previous.clone();
        run_sequential(
            &IllnessKernel { speed: 1.0, noise: &noise },
            &idx,
            &previous,
            &mut current,
        );
        assert_eq!(current, previous);
    }
}
