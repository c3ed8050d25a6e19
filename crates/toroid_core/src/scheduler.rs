//! The tick scheduler: owns the buffers and drives every pass.
//!
//! Per tick, unless paused:
//! 1. toggle which buffer is current,
//! 2. apply the pending perturbation to the previous buffer,
//! 3. run heat, then wave, then illness over every cell.
//!
//! A paused tick touches nothing. Each pass finishes completely before the
//! next begins, and the passes never read the buffer they write.

use crate::buffer::BufferPair;
use crate::config::{CoefficientConfig, SimConfig};
use crate::dispatch::{run_pass, DispatchStrategy};
use crate::drivers::{Cubic, LatticeDriver, Planar, Tesseract};
use crate::error::{Result, SimError};
use crate::generation::{initial_cells, resolve_seed};
use crate::indexer::GridIndexer;
use crate::injector::inject_perturbation;
use crate::kernels::{CellKernel, HeatKernel, IllnessKernel, WaveKernel};
use crate::noise::SpreadNoise;
use crate::state::{SimulationState, TickPhase};
use crate::summary::FieldSummary;
use toroid_data::{CellState, Coord, Dimensionality, TickInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing ran; the current buffer is unchanged.
    Paused,
    Advanced { tick: u64, perturbed: bool },
}

pub struct Simulation {
    config: SimConfig,
    /// Saturated copy of `config.coefficients`.
    coefficients: CoefficientConfig,
    indexer: GridIndexer,
    state: SimulationState,
    noise: SpreadNoise,
    strategy: DispatchStrategy,
    seed: u64,
    tick: u64,
}

impl Simulation {
    /// Validates `config` and generates a seeded lattice.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let seed = resolve_seed(config.run.seed);
        let cells = initial_cells(config.grid.cell_count()?, seed);
        Self::build(config, cells, seed)
    }

    /// Starts from caller-provided cells, written to both buffers.
    pub fn from_cells(config: SimConfig, cells: Vec<CellState>, seed: u64) -> Result<Self> {
        config.validate()?;
        let expected = config.grid.cell_count()?;
        if cells.len() != expected {
            return Err(SimError::SizeMismatch {
                expected,
                actual: cells.len(),
            });
        }
        Self::build(config, cells, seed)
    }

    fn build(config: SimConfig, cells: Vec<CellState>, seed: u64) -> Result<Self> {
        let indexer = GridIndexer::new(config.grid.side as usize, config.grid.dimensionality)?;
        let noise = SpreadNoise::generate(&indexer, seed);
        let strategy = DispatchStrategy::for_cell_count(indexer.cell_count(), &config.dispatch);

        tracing::info!(
            dims = %indexer.dims(),
            side = indexer.side(),
            cells = indexer.cell_count(),
            seed,
            ?strategy,
            fingerprint = %config.fingerprint(),
            "Lattice generated"
        );

        Ok(Self {
            coefficients: config.coefficients.saturated(),
            config,
            indexer,
            state: SimulationState::new(BufferPair::mirrored(cells)),
            noise,
            strategy,
            seed,
            tick: 0,
        })
    }

    /// Advances one fixed step.
    ///
    /// An invalid perturbation coordinate is reported before anything is
    /// mutated, so a failed tick leaves the simulation untouched.
    pub fn tick(&mut self, input: &TickInput) -> Result<TickOutcome> {
        self.state.process_simulation = !input.paused;
        if !self.state.process_simulation {
            return Ok(TickOutcome::Paused);
        }

        if let Some((coord, _)) = input.perturbation() {
            self.indexer.checked_index(&coord)?;
        }

        self.state.swap_buffers();
        tracing::trace!(current = self.state.current_index(), "Swapped buffers");
        self.state.set_phase(TickPhase::Simulating);

        let perturbed = inject_perturbation(&self.indexer, self.state.previous_mut(), input)?.is_some();

        match self.indexer.dims() {
            Dimensionality::Two => self.run_passes::<Planar>(),
            Dimensionality::Three => self.run_passes::<Cubic>(),
            Dimensionality::Four => self.run_passes::<Tesseract>(),
        }

        self.state.set_phase(TickPhase::AwaitingSwap);
        self.tick += 1;
        Ok(TickOutcome::Advanced {
            tick: self.tick,
            perturbed,
        })
    }

    fn run_passes<D: LatticeDriver>(&mut self) {
        let Self {
            coefficients,
            indexer,
            state,
            noise,
            strategy,
            ..
        } = self;
        let (previous, current) = state.split();

        pass::<D, _>(
            *strategy,
            &HeatKernel {
                conductivity: coefficients.heat_spread_speed,
            },
            indexer,
            previous,
            current,
        );
        pass::<D, _>(
            *strategy,
            &WaveKernel {
                damping: coefficients.wave_damp_coeff,
            },
            indexer,
            previous,
            current,
        );
        pass::<D, _>(
            *strategy,
            &IllnessKernel {
                speed: coefficients.ill_speed,
                noise: noise.as_slice(),
            },
            indexer,
            previous,
            current,
        );
    }

    /// Sets one cell of the current buffer fully ill.
    ///
    /// Illness only spreads from existing illness, so this is how outbreaks
    /// start. It never lowers a value.
    pub fn infect(&mut self, coord: &Coord) -> Result<()> {
        let index = self.indexer.checked_index(coord)?;
        let cell = &mut self.state.current_mut()[index];
        cell.illness = 1.0;
        tracing::debug!(%coord, index, "Seeded infection");
        Ok(())
    }

    /// Replaces the update coefficients; values are saturated into [0, 1].
    pub fn set_coefficients(&mut self, coefficients: CoefficientConfig) {
        self.config.coefficients = coefficients;
        self.coefficients = coefficients.saturated();
    }

    /// Overrides the size-based dispatch choice.
    pub fn set_dispatch_strategy(&mut self, strategy: DispatchStrategy) {
        self.strategy = strategy;
    }

    /// Replaces the per-cell contagion speed factors.
    pub fn set_spread_noise(&mut self, noise: SpreadNoise) -> Result<()> {
        if noise.len() != self.indexer.cell_count() {
            return Err(SimError::SizeMismatch {
                expected: self.indexer.cell_count(),
                actual: noise.len(),
            });
        }
        self.noise = noise;
        Ok(())
    }

    /// The most recently committed cell state.
    #[must_use]
    pub fn current(&self) -> &[CellState] {
        self.state.current()
    }

    /// The state one tick older than [`Simulation::current`].
    #[must_use]
    pub fn previous(&self) -> &[CellState] {
        self.state.previous()
    }

    #[must_use]
    pub fn current_buffer_index(&self) -> usize {
        self.state.current_index()
    }

    pub fn cell(&self, coord: &Coord) -> Result<&CellState> {
        let index = self.indexer.checked_index(coord)?;
        Ok(&self.state.current()[index])
    }

    #[must_use]
    pub fn summary(&self) -> FieldSummary {
        FieldSummary::from_cells(self.current())
    }

    /// Number of ticks that actually advanced.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        !self.state.process_simulation
    }

    #[must_use]
    pub fn phase(&self) -> TickPhase {
        self.state.phase()
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn indexer(&self) -> &GridIndexer {
        &self.indexer
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Coefficients as the kernels see them.
    #[must_use]
    pub fn coefficients(&self) -> &CoefficientConfig {
        &self.coefficients
    }

    #[must_use]
    pub fn dispatch_strategy(&self) -> DispatchStrategy {
        self.strategy
    }

    #[must_use]
    pub fn spread_noise(&self) -> &SpreadNoise {
        &self.noise
    }
}

#[inline]
fn pass<D: LatticeDriver, K: CellKernel>(
    strategy: DispatchStrategy,
    kernel: &K,
    indexer: &GridIndexer,
    previous: &[CellState],
    current: &mut [CellState],
) {
    let _span = tracing::trace_span!("pass", kernel = K::NAME).entered();
    run_pass::<D, K>(strategy, kernel, indexer, previous, current);
}
