//! Zero-sized drivers that fix the dimensionality at compile time.
//!
//! The scheduler matches on [`Dimensionality`] once per tick and runs every
//! pass monomorphised over one driver, so the neighbour gather loop has a
//! constant trip count.

use crate::indexer::{GridIndexer, NeighborSet};
use toroid_data::Dimensionality;

pub trait LatticeDriver: Send + Sync + 'static {
    const DIMS: Dimensionality;
    const AXES: usize = Self::DIMS.axes();
    const NEIGHBORS: usize = Self::DIMS.neighbor_count();

    /// Neighbours of `index`, ordered −x, +x, −y, +y, ...
    #[inline(always)]
    fn neighbors(indexer: &GridIndexer, index: usize) -> NeighborSet {
        debug_assert_eq!(indexer.dims(), Self::DIMS);
        let mut set = NeighborSet::empty();
        for axis in 0..Self::AXES {
            set.push(indexer.neighbor(index, axis, -1));
            set.push(indexer.neighbor(index, axis, 1));
        }
        set
    }
}

/// 2D lattice, 4 neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct Planar;

/// 3D lattice, 6 neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cubic;

/// 4D lattice, 8 neighbours.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tesseract;

impl LatticeDriver for Planar {
    const DIMS: Dimensionality = Dimensionality::Two;
}

impl LatticeDriver for Cubic {
    const DIMS: Dimensionality = Dimensionality::Three;
}

impl LatticeDriver for Tesseract {
    const DIMS: Dimensionality = Dimensionality::Four;
}
