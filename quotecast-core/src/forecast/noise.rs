//! Randomness providers for the stochastic term.
//!
//! The projector never touches a global RNG; callers pass a `NoiseSource`
//! so tests can pin the draw and CLI runs can be seeded.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws in `[0, 1)`.
pub trait NoiseSource {
    fn next_unit(&mut self) -> f64;
}

/// Reproducible noise from a seeded `StdRng`.
#[derive(Debug, Clone)]
pub struct SeededNoise {
    rng: StdRng,
}

impl SeededNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for SeededNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Non-reproducible noise seeded from OS entropy.
#[derive(Debug, Clone)]
pub struct EntropyNoise {
    rng: StdRng,
}

impl EntropyNoise {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for EntropyNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for EntropyNoise {
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Always returns the same draw. `ConstantNoise(0.5)` removes the stochastic term.
#[derive(Debug, Clone, Copy)]
pub struct ConstantNoise(pub f64);

impl NoiseSource for ConstantNoise {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for Box<N> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
