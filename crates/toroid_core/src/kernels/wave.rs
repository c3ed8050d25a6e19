//! Damped wave propagation without an explicit velocity field.
//!
//! Each cell carries the change applied on the previous tick, so the height
//! two ticks back is `height - height_diff`. The update
//! `new = (smoothed - prior) * damping` is a leapfrog step of the wave
//! equation (Hugo Elias' 2D water algorithm, generalised to N dimensions).

use super::{CellKernel, CellView};
use toroid_data::CellState;

#[derive(Debug, Clone, Copy)]
pub struct WaveKernel {
    /// 1 keeps wave energy, 0 collapses onto the neighbour sum each tick.
    pub damping: f32,
}

impl CellKernel for WaveKernel {
    const NAME: &'static str = "wave";

    #[inline(always)]
    fn apply(&self, cell: &CellView<'_>, out: &mut CellState) {
        let sum: f32 = cell.neighbor_states().map(|n| n.height).sum();
        // Half the neighbour count: sets propagation speed and stability.
        let smoothed = sum / (cell.neighbors.len() / 2) as f32;

        let own = cell.own();
        let height = (smoothed - own.prior_height()) * self.damping;
        out.height = height;
        out.height_diff = height - own.height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::GridIndexer;
    use crate::kernels::testing::run_sequential;
    use toroid_data::{Coord, Dimensionality};

    #[test]
    fn test_impulse_reaches_direct_neighbors_only() {
        let idx = GridIndexer::new(8, Dimensionality::Two).unwrap();
        let mut previous = vec![CellState::default(); idx.cell_count()];
        let center = idx.coordinate_to_index(&Coord::xy(4, 4));
        previous[center].height = 1.0;
        let mut current = vec![CellState::default(); idx.cell_count()];

        run_sequential(&WaveKernel { damping: 1.0 }, &idx, &previous, &mut current);

        for &n in idx.neighbor_indices(center).as_slice() {
            assert!((current[n].height - 0.5).abs() < 1e-6);
        }
        assert!((current[center].height + 1.0).abs() < 1e-6);
        for coord in [Coord::xy(6, 4), Coord::xy(2, 4), Coord::xy(5, 5), Coord::xy(4, 2)] {
            assert_eq!(current[idx.coordinate_to_index(&coord)].height, 0.0);
        }
    }

    #[test]
    fn test_zero_damping_flattens() {
        let idx = GridIndexer::new(4, Dimensionality::Three).unwrap();
        let mut previous = vec![CellState::default(); idx.cell_count()];
        previous[5].height = 2.0;
        previous[5].height_diff = 1.0;
        let mut current = previous.clone();
        run_sequential(&WaveKernel { damping: 0.0 }, &idx, &previous, &mut current);
        assert!(current.iter().all(|c| c.height == 0.0));
        assert_eq!(current[5].height_diff, -2.0);
    }

    #[test]
    fn test_height_diff_tracks_change() {
        let idx = GridIndexer::new(4, Dimensionality::Four).unwrap();
        let mut previous = vec![CellState::default(); idx.cell_count()];
        previous[0].height = 0.8;
        let mut current = previous.clone();
        run_sequential(&WaveKernel { damping: 0.9 }, &idx, &previous, &mut current);
        for (p, c) in previous.iter().zip(current.iter()) {
            assert!((c.height_diff - (c.height - p.height)).abs() < 1e-6);
        }
    }
}
