//! Uniform random sources for the Monte Carlo engine
//!
//! The engine only needs one operation: the next uniform double in [0, 1).
//! Seeded sources give reproducible runs; [`ThreadUniform`] draws from the
//! thread-local generator.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Source of uniform doubles in [0, 1)
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

/// Reproducible source backed by `StdRng`
#[derive(Debug, Clone)]
pub struct SeededUniform {
    inner: StdRng,
    seed: u64,
}

impl SeededUniform {
    /// The same seed always yields the same sequence
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed used for initialisation
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl UniformSource for SeededUniform {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.inner.gen()
    }
}

/// Non-reproducible source backed by the thread-local generator
#[derive(Debug, Clone)]
pub struct ThreadUniform {
    inner: ThreadRng,
}

impl ThreadUniform {
    pub fn new() -> Self {
        Self {
            inner: rand::thread_rng(),
        }
    }
}

impl Default for ThreadUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl UniformSource for ThreadUniform {
    #[inline]
    fn next_uniform(&mut self) -> f64 {
        self.inner.gen()
    }
}

/// Standard normal variate from two uniform draws (Box-Muller, cosine branch)
///
/// `u1` is clamped away from zero so `ln` stays finite.
#[inline]
pub fn box_muller(u1: f64, u2: f64) -> f64 {
    let u1 = u1.max(f64::MIN_POSITIVE);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Draw one standard normal variate
#[inline]
pub fn standard_normal<S: UniformSource + ?Sized>(source: &mut S) -> f64 {
    let u1 = source.next_uniform();
    let u2 = source.next_uniform();
    box_muller(u1, u2)
}
