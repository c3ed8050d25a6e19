//! Toroidal lattice engine.
//!
//! Simulates heat diffusion, a damped wave and one-way contagion over a
//! wrapping 2D, 3D or 4D lattice. State lives in two flat buffers that swap
//! roles every tick: kernels read the previous buffer and write the current
//! one.
//!
//! ```no_run
//! use toroid_core::{SimConfig, Simulation};
//! use toroid_data::{Coord, TickInput};
//!
//! let mut sim = Simulation::new(SimConfig::default())?;
//! sim.infect(&Coord::xy(10, 10))?;
//! sim.tick(&TickInput::poke(Coord::xy(32, 32), 1.0))?;
//! println!("{:?}", sim.summary());
//! # Ok::<(), toroid_core::SimError>(())
//! ```

pub mod buffer;
pub mod clock;
pub mod config;
pub mod dispatch;
pub mod drivers;
pub mod error;
pub mod generation;
pub mod indexer;
pub mod injector;
pub mod kernels;
pub mod metrics;
pub mod noise;
pub mod scheduler;
pub mod state;
pub mod summary;

pub use clock::FixedStepClock;
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use indexer::GridIndexer;
pub use scheduler::{Simulation, TickOutcome};
pub use summary::FieldSummary;
