//! Discrete heat relaxation toward the neighbour average.

use super::{CellKernel, CellView};
use toroid_data::CellState;

#[derive(Debug, Clone, Copy)]
pub struct HeatKernel {
    /// Per-tick blend factor in [0, 1].
    pub conductivity: f32,
}

impl CellKernel for HeatKernel {
    const NAME: &'static str = "heat";

    #[inline(always)]
    fn apply(&self, cell: &CellView<'_>, out: &mut CellState) {
        let sum: f32 = cell.neighbor_states().map(|n| n.temperature).sum();
        let average = sum / cell.neighbors.len() as f32;
        let current = cell.own().temperature;
        out.temperature = current + (average - current) * self.conductivity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::GridIndexer;
    use crate::kernels::testing::run_sequential;
    use toroid_data::{Coord, Dimensionality};

    #[test]
    fn test_uniform_field_stays_uniform() {
        let idx = GridIndexer::new(4, Dimensionality::Two).unwrap();
        let previous = vec![CellState::with_temperature(0.5); idx.cell_count()];
        let mut current = vec![CellState::default(); idx.cell_count()];
        run_sequential(
            &HeatKernel { conductivity: 0.3 },
            &idx,
            &previous,
            &mut current,
        );
        assert!(current.iter().all(|c| (c.temperature - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_hot_spot_spreads() {
        let idx = GridIndexer::new(5, Dimensionality::Three).unwrap();
        let mut previous = vec![CellState::default(); idx.cell_count()];
        let center = idx.coordinate_to_index(&Coord::xyz(2, 2, 2));
        previous[center].temperature = 6.0;
        let mut current = previous.clone();

        run_sequential(
            &HeatKernel { conductivity: 0.5 },
            &idx,
            &previous,
            &mut current,
        );

        // Centre moves halfway to its zero neighbourhood, each neighbour
        // halfway to 6/6 = 1.
        assert!((current[center].temperature - 3.0).abs() < 1e-6);
        for &n in idx.neighbor_indices(center).as_slice() {
            assert!((current[n].temperature - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_leaves_other_fields_alone() {
        let idx = GridIndexer::new(3, Dimensionality::Two).unwrap();
        let previous = vec![CellState::with_temperature(1.0); idx.cell_count()];
        let marker = CellState {
            temperature: 0.0,
            illness: 0.4,
            height: 0.2,
            height_diff: 0.1,
        };
        let mut current = vec![marker; idx.cell_count()];
        run_sequential(&HeatKernel { conductivity: 1.0 }, &idx, &previous, &mut current);
        for c in &current {
            assert_eq!(c.illness, 0.4);
            assert_eq!(c.height, 0.2);
            assert_eq!(c.height_diff, 0.1);
            assert_eq!(c.temperature, 1.0);
        }
    }
}
