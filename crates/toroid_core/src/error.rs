//! Error types for toroid_core.
//!
//! Setup problems (bad configuration, buffer/size mismatches) are fatal and
//! surface here. Kernel passes themselves cannot fail.

use thiserror::Error;
use toroid_data::{Coord, Dimensionality};

/// Main error type for engine setup and external-input validation.
#[derive(Error, Debug)]
pub enum SimError {
    /// Configuration values outside their legal range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Buffer length does not match `side^dimensionality`
    #[error("Buffer size mismatch: expected {expected} cells, found {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// `side^dimensionality` does not fit in memory addressing
    #[error("Cell count overflows for side {side} in {dims}")]
    CellCountOverflow { side: usize, dims: Dimensionality },

    /// A coordinate from outside the engine falls off the lattice
    #[error("Coordinate {coord} outside lattice of side {side}")]
    CoordOutOfBounds { coord: Coord, side: usize },

    /// A coordinate of the wrong arity for this lattice
    #[error("Coordinate {coord} is {found}, lattice is {expected}")]
    DimensionMismatch {
        coord: Coord,
        found: Dimensionality,
        expected: Dimensionality,
    },

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for toroid_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<anyhow::Error> for SimError {
    fn from(err: anyhow::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
