//! Deterministic per-symbol seeds.
//!
//! A master seed is expanded into one sub-seed per `(symbol, run)` pair via
//! BLAKE3, so a seeded session reproduces each symbol's forecast no matter
//! which order symbols are added or refreshed in.

use crate::forecast::SeededNoise;

#[derive(Debug, Clone)]
pub struct SeedDeriver {
    master_seed: u64,
}

impl SeedDeriver {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// Derive a sub-seed for a symbol and run counter.
    pub fn sub_seed(&self, symbol: &str, run: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(symbol.as_bytes());
        hasher.update(&run.to_le_bytes());
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Noise source for a symbol and run counter.
    pub fn noise_for(&self, symbol: &str, run: u64) -> SeededNoise {
        SeededNoise::new(self.sub_seed(symbol, run))
    }
}
