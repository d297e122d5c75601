use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

// Padding source
//------------------------------------------------------------------------------

/// Supplies bits for data cells left over once the text runs out.
pub trait PaddingSource {
    fn next_bit(&mut self) -> bool;
}

/// Uniform random padding backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngPadding<R>(R);

impl<R: Rng> RngPadding<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngPadding<ThreadRng> {
    /// Thread-local generator. Output differs between calls.
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl RngPadding<StdRng> {
    /// Reproducible padding for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PaddingSource for RngPadding<R> {
    fn next_bit(&mut self) -> bool {
        self.0.random()
    }
}

/// Pads every cell with the same bit.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct ConstPadding(pub bool);

impl PaddingSource for ConstPadding {
    fn next_bit(&mut self) -> bool {
        self.0
    }
}

impl<P: PaddingSource + ?Sized> PaddingSource for &mut P {
    fn next_bit(&mut self) -> bool {
        (**self).next_bit()
    }
}
