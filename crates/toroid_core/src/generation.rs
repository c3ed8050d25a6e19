//! Seeded initial lattice state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use toroid_data::CellState;

/// The configured seed, or a fresh one so the run can still be replayed.
#[must_use]
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}

/// Random temperatures in [-1, 1); every other field starts at zero.
#[must_use]
pub fn initial_cells(cell_count: usize, seed: u64) -> Vec<CellState> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..cell_count)
        .map(|_| CellState::with_temperature(rng.gen_range(-1.0..1.0)))
        .collect()
}
