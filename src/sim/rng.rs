//! Deterministic unit-interval sequences
//!
//! The simulation only ever asks for "the next value in [0, 1)". Anything that
//! implements [`UnitSource`] can drive it, which keeps tests free to script the
//! exact sequence they need.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Source of uniformly distributed values in [0, 1)
pub trait UnitSource {
    /// Next value in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Restart the sequence from a new seed
    fn reseed(&mut self, seed: u64);
}

/// Uniform index into a collection of `len` items (`len` must be non-zero)
pub fn pick_index<S: UnitSource + ?Sized>(source: &mut S, len: usize) -> usize {
    debug_assert!(len > 0);
    let scaled = (source.next_unit() * len as f64).floor();
    (scaled.max(0.0) as usize).min(len - 1)
}

/// Park-Miller minimal standard generator (multiplier 16807, modulus 2^31 - 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    pub const MODULUS: u64 = 2_147_483_647;
    pub const MULTIPLIER: u64 = 16_807;

    /// Seeds are folded into [1, MODULUS - 1]
    pub fn new(seed: u64) -> Self {
        let mut state = seed % Self::MODULUS;
        if state == 0 {
            state = Self::MODULUS - 1;
        }
        Self { state }
    }

    /// Seed from the thread-local entropy source
    pub fn from_entropy() -> Self {
        let seed = u64::from(rand::random::<u32>());
        log::debug!("Entropy seed: {}", seed);
        Self::new(seed)
    }

    /// Current internal state (always in [1, MODULUS - 1])
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl UnitSource for ParkMiller {
    fn next_unit(&mut self) -> f64 {
        self.state = (self.state * Self::MULTIPLIER) % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }

    fn reseed(&mut self, seed: u64) {
        *self = Self::new(seed);
    }
}

/// Adapter over any `rand` generator
#[derive(Debug, Clone, PartialEq)]
pub struct RandSource<R> {
    rng: R,
}

impl<R: RngCore + SeedableRng> RandSource<R> {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: R::seed_from_u64(seed),
        }
    }
}

impl RandSource<Pcg32> {
    /// PCG-backed source
    pub fn pcg(seed: u64) -> Self {
        Self::new(seed)
    }
}

impl<R: RngCore + SeedableRng> UnitSource for RandSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn reseed(&mut self, seed: u64) {
        self.rng = R::seed_from_u64(seed);
    }
}

/// Replays a fixed list of values, wrapping around at the end
///
/// Values are clamped into [0, 1). An empty script yields 0.0 forever.
/// `reseed` ignores the seed and rewinds to the first value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedSequence {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSequence {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Source that always picks the first candidate
    pub fn zeros() -> Self {
        Self::new(vec![0.0])
    }

    /// Values consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UnitSource for ScriptedSequence {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }

    fn reseed(&mut self, _seed: u64) {
        self.cursor = 0;
    }
}
