// Input Generator
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::engine::config::{RANGE_MAX, SCALE};
use crate::engine::error::{check_lengths, Error, Result};

/// Seeded source of quantized floats `randint(0, RANGE_MAX) * SCALE`.
///
/// The PRNG is owned by the generator instead of living in process-wide
/// state, so the same seed always yields the same sequences.
pub struct Generator {
    rng: StdRng,
    dist: Uniform<u32>,
    seed: u64,
}

impl Generator {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            dist: draw_range(),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A single scaled draw.
    #[inline]
    pub fn next_value(&mut self) -> f64 {
        draw(&mut self.rng, &self.dist)
    }

    /// Fill `a` and `b` in index order, drawing `a[i]` then `b[i]`.
    pub fn fill(&mut self, a: &mut [f64], b: &mut [f64]) -> Result<()> {
        check_lengths(a.len(), b.len(), b.len())?;
        for (x, y) in a.iter_mut().zip(b.iter_mut()) {
            *x = draw(&mut self.rng, &self.dist);
            *y = draw(&mut self.rng, &self.dist);
        }
        Ok(())
    }
}

/// Inclusive integer range every draw comes from.
pub fn draw_range() -> Uniform<u32> {
    Uniform::new_inclusive(0, RANGE_MAX)
}

/// `randint(0, RANGE_MAX) * SCALE` from any rng.
#[inline]
pub fn draw<R: Rng + ?Sized>(rng: &mut R, dist: &Uniform<u32>) -> f64 {
    f64::from(dist.sample(rng)) * SCALE
}

/// Sequential generation pass.
pub fn generate(a: &mut [f64], b: &mut [f64], seed: u64) -> Result<()> {
    Generator::from_seed(seed).fill(a, b)
}

/// Parallel generation pass.
///
/// Each `chunk_len` slice gets its own `StdRng` seeded from `seed` and the
/// chunk index, so the output depends only on `(seed, chunk_len)` and not on
/// how rayon schedules the chunks.
pub fn generate_parallel(a: &mut [f64], b: &mut [f64], seed: u64, chunk_len: usize) -> Result<()> {
    check_lengths(a.len(), b.len(), b.len())?;
    if chunk_len == 0 {
        return Err(Error::InvalidChunkLen);
    }
    let dist = draw_range();
    a.par_chunks_mut(chunk_len)
        .zip(b.par_chunks_mut(chunk_len))
        .enumerate()
        .for_each(|(idx, (ca, cb))| {
            let mut rng = StdRng::seed_from_u64(chunk_seed(seed, idx as u64));
            for (x, y) in ca.iter_mut().zip(cb.iter_mut()) {
                *x = draw(&mut rng, &dist);
                *y = draw(&mut rng, &dist);
            }
        });
    Ok(())
}

/// SplitMix64 finalizer over `seed + idx * golden`, giving well-separated
/// per-chunk seeds.
fn chunk_seed(seed: u64, idx: u64) -> u64 {
    let mut z = seed.wrapping_add(idx.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
