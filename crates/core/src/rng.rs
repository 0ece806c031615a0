//! Seeded random numbers for terrain, pits and pods.
//!
//! A simple LCG keeps every generated world reproducible from its seed, which
//! the tests rely on and which makes `--seed` replays possible.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Seeds 0 and 1 are equivalent.
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        // Low bits of an LCG are weak; hand out the high half.
        self.state >> 16
    }

    /// Random value in `[0, max)`. `max == 0` yields 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Random value in `[-span, span]`.
    pub fn next_signed(&mut self, span: i32) -> i32 {
        let width = (span.max(0) as u32) * 2 + 1;
        self.next_range(width) as i32 - span.max(0)
    }

    pub fn coin_flip(&mut self) -> bool {
        self.next_range(2) == 0
    }
}
