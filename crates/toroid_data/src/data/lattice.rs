use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest supported lattice dimensionality.
pub const MAX_AXES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
/// Number of axes of the hypercubic lattice.
pub enum Dimensionality {
    Two,
    Three,
    Four,
}

impl Dimensionality {
    pub const ALL: [Dimensionality; 3] = [Self::Two, Self::Three, Self::Four];

    #[inline(always)]
    #[must_use]
    pub const fn axes(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Size of the von Neumann neighbourhood (two cells per axis).
    #[inline(always)]
    #[must_use]
    pub const fn neighbor_count(self) -> usize {
        self.axes() * 2
    }

    /// `side^axes`, or `None` on overflow.
    #[must_use]
    pub fn cell_count(self, side: usize) -> Option<usize> {
        side.checked_pow(self.axes() as u32)
    }
}

impl TryFrom<u8> for Dimensionality {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(format!("unsupported dimensionality {other}, expected 2, 3 or 4")),
        }
    }
}

impl From<Dimensionality> for u8 {
    fn from(value: Dimensionality) -> Self {
        value.axes() as u8
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.axes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// An N-dimensional integer lattice coordinate. Axes past `dims` are zero.
pub struct Coord {
    axes: [i32; MAX_AXES],
    dims: Dimensionality,
}

impl Coord {
    /// The origin of a lattice with the given dimensionality.
    #[must_use]
    pub const fn origin(dims: Dimensionality) -> Self {
        Self {
            axes: [0; MAX_AXES],
            dims,
        }
    }

    /// Builds a coordinate from 2, 3 or 4 axis values.
    #[must_use]
    pub fn from_slice(values: &[i32]) -> Option<Self> {
        let dims = Dimensionality::try_from(u8::try_from(values.len()).ok()?).ok()?;
        let mut axes = [0; MAX_AXES];
        axes[..values.len()].copy_from_slice(values);
        Some(Self { axes, dims })
    }

    #[must_use]
    pub fn xy(x: i32, y: i32) -> Self {
        Self {
            axes: [x, y, 0, 0],
            dims: Dimensionality::Two,
        }
    }

    #[must_use]
    pub fn xyz(x: i32, y: i32, z: i32) -> Self {
        Self {
            axes: [x, y, z, 0],
            dims: Dimensionality::Three,
        }
    }

    #[must_use]
    pub fn xyzw(x: i32, y: i32, z: i32, w: i32) -> Self {
        Self {
            axes: [x, y, z, w],
            dims: Dimensionality::Four,
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn dims(&self) -> Dimensionality {
        self.dims
    }

    #[inline(always)]
    #[must_use]
    pub fn axis(&self, k: usize) -> i32 {
        self.axes[k]
    }

    pub fn set_axis(&mut self, k: usize, value: i32) {
        debug_assert!(k < self.dims.axes(), "axis {k} outside {}", self.dims);
        self.axes[k] = value;
    }

    #[must_use]
    pub fn as_slice(&self) -> &[i32] {
        &self.axes[..self.dims.axes()]
    }

    /// Component-wise sum. Both operands must share a dimensionality.
    #[must_use]
    pub fn offset(&self, delta: &Coord) -> Coord {
        debug_assert_eq!(self.dims, delta.dims);
        let mut out = *self;
        for k in 0..self.dims.axes() {
            out.axes[k] = self.axes[k] + delta.axes[k];
        }
        out
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (k, v) in self.as_slice().iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}
