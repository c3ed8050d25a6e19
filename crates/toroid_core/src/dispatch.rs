//! Runs one kernel over the whole lattice, sequentially or on rayon.
//!
//! Both strategies visit every cell exactly once and compute each cell from
//! the previous buffer alone, so they produce bit-identical output.

use crate::config::DispatchConfig;
use crate::drivers::LatticeDriver;
use crate::indexer::GridIndexer;
use crate::kernels::{CellKernel, CellView};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use toroid_data::CellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchStrategy {
    Sequential,
    /// Contiguous chunks of `chunk_size` cells, one rayon task each.
    Parallel { chunk_size: usize },
}

impl DispatchStrategy {
    /// Small grids stay on the calling thread; scheduling overhead dominates.
    #[must_use]
    pub fn for_cell_count(cell_count: usize, config: &DispatchConfig) -> Self {
        if cell_count <= config.parallel_threshold {
            Self::Sequential
        } else {
            Self::Parallel {
                chunk_size: config.chunk_size.max(1),
            }
        }
    }
}

#[inline(always)]
fn update_range<D: LatticeDriver, K: CellKernel>(
    kernel: &K,
    indexer: &GridIndexer,
    previous: &[CellState],
    base: usize,
    out: &mut [CellState],
) {
    for (offset, cell) in out.iter_mut().enumerate() {
        let index = base + offset;
        let neighbors = D::neighbors(indexer, index);
        let view = CellView {
            index,
            previous,
            neighbors: neighbors.as_slice(),
        };
        kernel.apply(&view, cell);
    }
}

/// One complete pass of `kernel`. Returns once every cell is written.
pub fn run_pass<D: LatticeDriver, K: CellKernel>(
    strategy: DispatchStrategy,
    kernel: &K,
    indexer: &GridIndexer,
    previous: &[CellState],
    current: &mut [CellState],
) {
    debug_assert_eq!(previous.len(), current.len());
    debug_assert_eq!(current.len(), indexer.cell_count());

    match strategy {
        DispatchStrategy::Sequential => {
            update_range::<D, K>(kernel, indexer, previous, 0, current);
        }
        DispatchStrategy::Parallel { chunk_size } => {
            let chunk_size = chunk_size.max(1);
            #[cfg(feature = "parallel")]
            current
                .par_chunks_mut(chunk_size)
                .enumerate()
                .for_each(|(chunk, out)| {
                    update_range::<D, K>(kernel, indexer, previous, chunk * chunk_size, out);
                });

            #[cfg(not(feature = "parallel"))]
            for (chunk, out) in current.chunks_mut(chunk_size).enumerate() {
                update_range::<D, K>(kernel, indexer, previous, chunk * chunk_size, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::Cubic;
    use crate::kernels::{HeatKernel, IllnessKernel, WaveKernel};
    use toroid_data::Dimensionality;

    fn field(n: usize) -> Vec<CellState> {
        (0..n)
            .map(|i| CellState {
                temperature: ((i * 37) % 11) as f32 / 5.0 - 1.0,
                illness: if i % 13 == 0 { 1.0 } else { 0.0 },
                height: ((i * 7) % 5) as f32 / 4.0,
                height_diff: ((i * 3) % 4) as f32 / 8.0,
            })
            .collect()
    }

    #[test]
    fn test_strategy_selection() {
        let config = DispatchConfig {
            parallel_threshold: 100,
            chunk_size: 16,
        };
        assert_eq!(
            DispatchStrategy::for_cell_count(100, &config),
            DispatchStrategy::Sequential
        );
        assert_eq!(
            DispatchStrategy::for_cell_count(101, &config),
            DispatchStrategy::Parallel { chunk_size: 16 }
        );
    }

    fn all_passes(strategy: DispatchStrategy, idx: &GridIndexer, previous: &[CellState]) -> Vec<CellState> {
        let noise = vec![0.8; idx.cell_count()];
        let mut current = previous.to_vec();
        run_pass::<Cubic, _>(strategy, &HeatKernel { conductivity: 0.3 }, idx, previous, &mut current);
        run_pass::<Cubic, _>(strategy, &WaveKernel { damping: 0.95 }, idx, previous, &mut current);
        let illness = IllnessKernel {
            speed: 0.5,
            noise: &noise,
        };
        run_pass::<Cubic, _>(strategy, &illness, idx, previous, &mut current);
        current
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let idx = GridIndexer::new(7, Dimensionality::Three).unwrap();
        let previous = field(idx.cell_count());

        let seq = all_passes(DispatchStrategy::Sequential, &idx, &previous);
        // Chunk size that does not divide the cell count.
        let par = all_passes(DispatchStrategy::Parallel { chunk_size: 10 }, &idx, &previous);
        assert_eq!(seq, par);
    }
}
