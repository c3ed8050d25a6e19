//! Flattened addressing for hypercubic toroidal lattices.
//!
//! Cells are laid out with the first axis varying fastest:
//! `index = Σ coord[k] · side^k`. Neighbour lookups wrap at every edge, so
//! the lattice has no boundary cells.
//!
//! Out-of-range coordinates handed to [`GridIndexer::coordinate_to_index`]
//! are an invariant violation: debug builds panic, release builds reduce each
//! axis modulo `side`. Coordinates coming from outside the engine must go
//! through [`GridIndexer::checked_index`] instead.

use crate::error::{Result, SimError};
use toroid_data::{Coord, Dimensionality, MAX_AXES};

/// Maximum von Neumann neighbourhood size (4D).
pub const MAX_NEIGHBORS: usize = MAX_AXES * 2;

/// Unit deltas in neighbour order: −x, +x, −y, +y, −z, +z, −w, +w.
const NEIGHBOR_OFFSETS: [[i32; MAX_AXES]; MAX_NEIGHBORS] = [
    [-1, 0, 0, 0],
    [1, 0, 0, 0],
    [0, -1, 0, 0],
    [0, 1, 0, 0],
    [0, 0, -1, 0],
    [0, 0, 1, 0],
    [0, 0, 0, -1],
    [0, 0, 0, 1],
];

/// The von Neumann neighbourhood as coordinate deltas, `2 · dims` entries.
#[must_use]
pub fn neighbor_offsets(dims: Dimensionality) -> Vec<Coord> {
    NEIGHBOR_OFFSETS[..dims.neighbor_count()]
        .iter()
        .filter_map(|delta| Coord::from_slice(&delta[..dims.axes()]))
        .collect()
}

/// Flat indices of one cell's neighbours, in [`neighbor_offsets`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborSet {
    indices: [usize; MAX_NEIGHBORS],
    len: usize,
}

impl NeighborSet {
    #[inline(always)]
    pub(crate) fn empty() -> Self {
        Self {
            indices: [0; MAX_NEIGHBORS],
            len: 0,
        }
    }

    #[inline(always)]
    pub(crate) fn push(&mut self, index: usize) {
        self.indices[self.len] = index;
        self.len += 1;
    }

    #[inline(always)]
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices[..self.len]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIndexer {
    side: usize,
    dims: Dimensionality,
    strides: [usize; MAX_AXES],
    cell_count: usize,
}

impl GridIndexer {
    pub fn new(side: usize, dims: Dimensionality) -> Result<Self> {
        if side == 0 {
            return Err(SimError::invalid_config("Grid side must be positive"));
        }
        let cell_count = dims
            .cell_count(side)
            .ok_or(SimError::CellCountOverflow { side, dims })?;

        let mut strides = [0; MAX_AXES];
        let mut stride = 1usize;
        for s in strides.iter_mut().take(dims.axes()) {
            *s = stride;
            stride *= side;
        }

        Ok(Self {
            side,
            dims,
            strides,
            cell_count,
        })
    }

    #[inline(always)]
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline(always)]
    #[must_use]
    pub fn dims(&self) -> Dimensionality {
        self.dims
    }

    #[inline(always)]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    #[inline(always)]
    #[must_use]
    pub fn stride(&self, axis: usize) -> usize {
        self.strides[axis]
    }

    /// Toroidal wrap of a single axis value into `[0, side)`.
    #[inline(always)]
    #[must_use]
    pub fn wrap(&self, c: i64) -> usize {
        c.rem_euclid(self.side as i64) as usize
    }

    #[must_use]
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.dims() == self.dims
            && coord
                .as_slice()
                .iter()
                .all(|&c| c >= 0 && (c as usize) < self.side)
    }

    #[must_use]
    pub fn coordinate_to_index(&self, coord: &Coord) -> usize {
        debug_assert!(
            self.contains(coord),
            "coordinate {coord} outside {} lattice of side {}",
            self.dims,
            self.side
        );
        coord
            .as_slice()
            .iter()
            .zip(self.strides.iter())
            .map(|(&c, &stride)| self.wrap(c as i64) * stride)
            .sum()
    }

    #[must_use]
    pub fn index_to_coordinate(&self, index: usize) -> Coord {
        debug_assert!(index < self.cell_count, "index {index} out of range");
        let mut coord = Coord::origin(self.dims);
        let mut rest = index;
        for k in 0..self.dims.axes() {
            coord.set_axis(k, (rest % self.side) as i32);
            rest /= self.side;
        }
        coord
    }

    /// Validated lookup for coordinates that originate outside the engine.
    pub fn checked_index(&self, coord: &Coord) -> Result<usize> {
        if coord.dims() != self.dims {
            return Err(SimError::DimensionMismatch {
                coord: *coord,
                found: coord.dims(),
                expected: self.dims,
            });
        }
        if !self.contains(coord) {
            return Err(SimError::CoordOutOfBounds {
                coord: *coord,
                side: self.side,
            });
        }
        Ok(self.coordinate_to_index(coord))
    }

    /// Index of the cell one `step` away from `index` along `axis`, wrapped.
    #[inline(always)]
    #[must_use]
    pub fn neighbor(&self, index: usize, axis: usize, step: i64) -> usize {
        let stride = self.strides[axis];
        let c = (index / stride) % self.side;
        let n = self.wrap(c as i64 + step);
        index - c * stride + n * stride
    }

    /// All `2 · dims` von Neumann neighbours of `index`.
    #[must_use]
    pub fn neighbor_indices(&self, index: usize) -> NeighborSet {
        let mut set = NeighborSet::empty();
        for axis in 0..self.dims.axes() {
            set.push(self.neighbor(index, axis, -1));
            set.push(self.neighbor(index, axis, 1));
        }
        set
    }
}
