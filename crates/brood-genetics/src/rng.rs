//! RNG trait abstraction for breeding draws
//!
//! The resolver and stat inheritance never own a generator; callers pass one
//! in. This allows:
//! - A seeded generator for reproducible tests and simulations
//! - `thread_rng()` or a per-thread generator in the running game

/// Random number source for breeding events
pub trait BreedRng {
    /// Uniform integer in `[0, bound)`. `bound` must be positive.
    fn roll(&mut self, bound: u64) -> u64;

    /// Stat mutation increment, uniform in `{1, 2}`
    fn mutation(&mut self) -> u8 {
        if self.roll(2) == 0 { 1 } else { 2 }
    }
}

impl<T: ?Sized + rand::Rng> BreedRng for T {
    fn roll(&mut self, bound: u64) -> u64 {
        rand::Rng::gen_range(self, 0..bound)
    }
}
