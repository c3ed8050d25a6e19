//! Configuration management for simulation parameters.
//!
//! Strongly-typed configuration that maps onto a `config.toml` file. Every
//! section has defaults, so a partial file (or none at all) is valid.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [grid]
//! side = 32
//! dimensionality = 3
//!
//! [coefficients]
//! heat_spread_speed = 0.1
//! wave_damp_coeff = 0.985
//! ill_speed = 0.5
//!
//! [run]
//! seed = 42
//! timestep = 0.0666
//!
//! [dispatch]
//! parallel_threshold = 65536
//! chunk_size = 2048
//! ```

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use toroid_data::Dimensionality;

/// Lattice shape. The lattice is always a hypercube.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub side: u32,
    pub dimensionality: Dimensionality,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            side: 64,
            dimensionality: Dimensionality::Two,
        }
    }
}

impl GridConfig {
    /// Total number of cells, `side^dimensionality`.
    pub fn cell_count(&self) -> Result<usize> {
        self.dimensionality
            .cell_count(self.side as usize)
            .ok_or(SimError::CellCountOverflow {
                side: self.side as usize,
                dims: self.dimensionality,
            })
    }
}

/// Per-field update coefficients. Values are clamped to [0, 1] before use.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CoefficientConfig {
    /// Blend factor toward the neighbour temperature average.
    pub heat_spread_speed: f32,
    /// Wave damping; 1 keeps energy, 0 kills the wave every tick.
    pub wave_damp_coeff: f32,
    /// Contagion speed.
    pub ill_speed: f32,
}

impl Default for CoefficientConfig {
    fn default() -> Self {
        Self {
            heat_spread_speed: 0.1,
            wave_damp_coeff: 0.985,
            ill_speed: 0.5,
        }
    }
}

impl CoefficientConfig {
    /// Coefficients saturated into [0, 1]. NaN becomes 0.
    #[must_use]
    pub fn saturated(&self) -> Self {
        Self {
            heat_spread_speed: saturate(self.heat_spread_speed),
            wave_damp_coeff: saturate(self.wave_damp_coeff),
            ill_speed: saturate(self.ill_speed),
        }
    }

    #[must_use]
    pub fn is_saturated(&self) -> bool {
        *self == self.saturated()
    }
}

#[inline]
fn saturate(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// RNG seed; a random one is drawn when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Fixed tick length in seconds.
    pub timestep: f32,
    /// Ticks between periodic progress logs.
    pub log_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            timestep: 1.0 / 15.0,
            log_interval: 100,
        }
    }
}

/// Controls when kernel passes fan out over the rayon pool.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Grids with at most this many cells run single-threaded.
    pub parallel_threshold: usize,
    /// Cells per parallel work item.
    pub chunk_size: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 65_536,
            chunk_size: 2_048,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    pub grid: GridConfig,
    pub coefficients: CoefficientConfig,
    pub run: RunConfig,
    pub dispatch: DispatchConfig,
}

impl SimConfig {
    /// Checks every value that cannot be fixed up by clamping.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.grid.side >= 2, "Grid side must be at least 2");
        anyhow::ensure!(
            self.grid
                .dimensionality
                .cell_count(self.grid.side as usize)
                .is_some_and(|n| n <= u32::MAX as usize),
            "Grid of side {} in {} is too large",
            self.grid.side,
            self.grid.dimensionality
        );

        anyhow::ensure!(
            self.coefficients.heat_spread_speed.is_finite(),
            "Heat spread speed must be finite"
        );
        anyhow::ensure!(
            self.coefficients.wave_damp_coeff.is_finite(),
            "Wave damping coefficient must be finite"
        );
        anyhow::ensure!(
            self.coefficients.ill_speed.is_finite(),
            "Illness speed must be finite"
        );

        anyhow::ensure!(
            self.run.timestep.is_finite() && self.run.timestep > 0.0,
            "Timestep must be positive"
        );
        anyhow::ensure!(self.run.log_interval > 0, "Log interval must be positive");
        anyhow::ensure!(self.dispatch.chunk_size > 0, "Chunk size must be positive");

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Stable hash of everything that affects simulation results.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.grid).as_bytes());
        hasher.update(format!("{:?}", self.coefficients.saturated()).as_bytes());
        hasher.update(format!("{:?}", self.run.seed).as_bytes());
        hex::encode(hasher.finalize())
    }
}
