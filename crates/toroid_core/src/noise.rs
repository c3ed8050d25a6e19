//! Coherent gradient noise used to modulate contagion speed.
//!
//! The noise is a pure function of lattice position and seed, so the
//! per-cell speed factor is computed once when a grid is generated and
//! looked up by index afterwards.

use crate::indexer::GridIndexer;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use toroid_data::MAX_AXES;

/// Spatial frequency divisor for spread noise sampling.
pub const NOISE_SCALE: f32 = 6.7;

/// Seeds above this wrap around; large offsets degrade float precision.
pub const NOISE_SEED_MODULUS: u64 = 7919;

const HASH_MULTIPLIER: u64 = 0x517c_c1b7_2722_0a95;

#[inline(always)]
fn hash_step(h: u64, v: i32) -> u64 {
    let n = (h ^ (v as u32 as u64)).wrapping_mul(HASH_MULTIPLIER);
    n ^ (n >> 32)
}

/// Quintic fade, C2-continuous at lattice points.
#[inline(always)]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Hermite smoothstep between `edge0` and `edge1`.
#[inline]
#[must_use]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Gradient (Perlin-style) noise over 1 to 4 dimensions, in [-1, 1].
///
/// Each lattice corner gets a pseudo-random gradient with ±1 components;
/// corner contributions are blended with a quintic fade.
#[must_use]
pub fn gradient_noise(p: &[f32]) -> f32 {
    let d = p.len();
    debug_assert!((1..=MAX_AXES).contains(&d));

    let mut base = [0i32; MAX_AXES];
    let mut frac = [0f32; MAX_AXES];
    let mut faded = [0f32; MAX_AXES];
    for k in 0..d {
        let floor = p[k].floor();
        base[k] = floor as i32;
        frac[k] = p[k] - floor;
        faded[k] = fade(frac[k]);
    }

    let mut total = 0.0;
    for corner in 0..(1usize << d) {
        let mut h = 0xcbf2_9ce4_8422_2325u64;
        let mut weight = 1.0;
        for k in 0..d {
            let bit = (corner >> k) & 1;
            h = hash_step(h, base[k] + bit as i32);
            weight *= if bit == 1 { faded[k] } else { 1.0 - faded[k] };
        }

        let mut dot = 0.0;
        for k in 0..d {
            let offset = frac[k] - ((corner >> k) & 1) as f32;
            let sign = if (h >> (16 + k)) & 1 == 1 { 1.0 } else { -1.0 };
            dot += sign * offset;
        }
        total += weight * dot;
    }

    (total * 2.0 / d as f32).clamp(-1.0, 1.0)
}

/// Reduces a run seed to the offset added to every sampling position.
#[must_use]
pub fn noise_seed(seed: u64) -> f32 {
    ((seed % NOISE_SEED_MODULUS) + 1) as f32
}

/// Contagion speed multiplier for one lattice position, in (0, 1].
#[must_use]
pub fn spread_factor(coord: &[i32], seed_offset: f32) -> f32 {
    let mut p = [0f32; MAX_AXES];
    for (dst, &c) in p.iter_mut().zip(coord) {
        *dst = (c as f32 + seed_offset) / NOISE_SCALE;
    }
    smoothstep(-1.1, 1.0, gradient_noise(&p[..coord.len()]))
}

/// Per-cell spread factors for a whole lattice, indexed like the buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadNoise {
    factors: Vec<f32>,
}

impl SpreadNoise {
    #[must_use]
    pub fn generate(indexer: &GridIndexer, seed: u64) -> Self {
        let offset = noise_seed(seed);
        let sample = |i: usize| spread_factor(indexer.index_to_coordinate(i).as_slice(), offset);

        #[cfg(feature = "parallel")]
        let factors = (0..indexer.cell_count())
            .into_par_iter()
            .map(sample)
            .collect();
        #[cfg(not(feature = "parallel"))]
        let factors = (0..indexer.cell_count()).map(sample).collect();

        Self { factors }
    }

    /// A constant factor everywhere; handy for deterministic tests.
    #[must_use]
    pub fn uniform(cell_count: usize, factor: f32) -> Self {
        Self {
            factors: vec![factor; cell_count],
        }
    }

    #[inline(always)]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.factors
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}
