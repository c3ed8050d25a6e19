pub mod macros;

use toroid_lib::model::config::{CoefficientConfig, SimConfig};
use toroid_lib::model::dispatch::DispatchStrategy;
use toroid_lib::model::noise::SpreadNoise;
use toroid_lib::model::state::{CellState, Coord, Dimensionality};
use toroid_lib::model::Simulation;

type CellMod = Box<dyn FnOnce(&mut [CellState], &dyn Fn(&Coord) -> usize)>;

#[allow(dead_code)]
pub struct SimBuilder {
    config: SimConfig,
    seed: u64,
    fill: Option<CellState>,
    cell_mods: Vec<CellMod>,
    spread: Option<f32>,
    strategy: Option<DispatchStrategy>,
}

#[allow(dead_code)]
impl SimBuilder {
    pub fn new(side: u32, dims: Dimensionality) -> Self {
        let mut config = SimConfig::default();
        config.grid.side = side;
        config.grid.dimensionality = dims;
        config.run.seed = Some(1);
        Self {
            config,
            seed: 1,
            fill: None,
            cell_mods: Vec::new(),
            spread: None,
            strategy: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.config.run.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_coefficients(mut self, heat: f32, damping: f32, illness: f32) -> Self {
        self.config.coefficients = CoefficientConfig {
            heat_spread_speed: heat,
            wave_damp_coeff: damping,
            ill_speed: illness,
        };
        self
    }

    /// Every cell starts as `cell` instead of the seeded random field.
    pub fn filled(mut self, cell: CellState) -> Self {
        self.fill = Some(cell);
        self
    }

    pub fn with_cell<F>(mut self, coord: Coord, modifier: F) -> Self
    where
        F: FnOnce(&mut CellState) + 'static,
    {
        self.cell_mods.push(Box::new(
            move |cells: &mut [CellState], index_of: &dyn Fn(&Coord) -> usize| {
                modifier(&mut cells[index_of(&coord)]);
            },
        ));
        self
    }

    /// Replaces the noise field with a constant spread factor.
    pub fn with_uniform_spread(mut self, factor: f32) -> Self {
        self.spread = Some(factor);
        self
    }

    pub fn with_strategy(mut self, strategy: DispatchStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn build(self) -> Simulation {
        let mut sim = match self.fill {
            None if self.cell_mods.is_empty() => {
                Simulation::new(self.config).expect("Failed to create simulation in test builder")
            }
            fill => {
                let probe = Simulation::new(self.config.clone())
                    .expect("Failed to create simulation in test builder");
                let mut cells = match fill {
                    Some(cell) => vec![cell; probe.indexer().cell_count()],
                    None => probe.current().to_vec(),
                };
                let indexer = *probe.indexer();
                for modifier in self.cell_mods {
                    modifier(cells.as_mut_slice(), &|c: &Coord| indexer.coordinate_to_index(c));
                }
                Simulation::from_cells(self.config, cells, self.seed)
                    .expect("Failed to create simulation in test builder")
            }
        };

        if let Some(factor) = self.spread {
            let count = sim.indexer().cell_count();
            sim.set_spread_noise(SpreadNoise::uniform(count, factor))
                .expect("uniform noise has the lattice size");
        }
        if let Some(strategy) = self.strategy {
            sim.set_dispatch_strategy(strategy);
        }
        sim
    }
}

/// Index of `coord` in the simulation's buffers.
#[allow(dead_code)]
pub fn index_of(sim: &Simulation, coord: Coord) -> usize {
    sim.indexer().coordinate_to_index(&coord)
}
