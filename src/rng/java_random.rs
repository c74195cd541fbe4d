//! 48-bit linear congruential generator with the `java.util.Random` contract
//!
//! Seeds produced by the scanner are only meaningful if every draw matches the
//! reference generator bit for bit, so the arithmetic here mirrors it exactly,
//! including the rejection loop in [`JavaRandom::next_int_bound`].

const MULTIPLIER: i64 = 0x5DEE_CE66D;
const ADDEND: i64 = 0xB;
const MASK: i64 = (1 << 48) - 1;

const FLOAT_UNIT: f32 = 1.0 / (1u32 << 24) as f32;
const DOUBLE_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Seeded PRNG. Cheap to clone; clones continue independently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JavaRandom {
    state: i64,
}

impl JavaRandom {
    /// Create a generator from a 64-bit seed
    pub fn new(seed: i64) -> Self {
        let mut rng = Self { state: 0 };
        rng.set_seed(seed);
        rng
    }

    /// Reset the generator as if freshly created with `seed`
    pub fn set_seed(&mut self, seed: i64) {
        self.state = (seed ^ MULTIPLIER) & MASK;
    }

    /// Advance the state and return the top `bits` bits (1..=32)
    fn next(&mut self, bits: u32) -> i32 {
        debug_assert!((1..=32).contains(&bits));
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK;
        (self.state >> (48 - bits)) as i32
    }

    /// Uniform over the full `i32` range
    pub fn next_int(&mut self) -> i32 {
        self.next(32)
    }

    /// Uniform over `[0, bound)`
    ///
    /// # Panics
    /// If `bound <= 0`. A non-positive bound is a caller bug, never data.
    pub fn next_int_bound(&mut self, bound: i32) -> i32 {
        assert!(bound > 0, "bound must be positive, got {bound}");

        if bound & bound.wrapping_neg() == bound {
            return ((bound as i64 * self.next(31) as i64) >> 31) as i32;
        }

        loop {
            let bits = self.next(31);
            let val = bits % bound;
            if bits.wrapping_sub(val).wrapping_add(bound - 1) >= 0 {
                return val;
            }
        }
    }

    /// Uniform over the full `i64` range (two 32-bit draws)
    pub fn next_long(&mut self) -> i64 {
        let hi = (self.next(32) as i64) << 32;
        hi.wrapping_add(self.next(32) as i64)
    }

    pub fn next_bool(&mut self) -> bool {
        self.next(1) != 0
    }

    /// Uniform over `[0, 1)` with 24 bits of precision
    pub fn next_float(&mut self) -> f32 {
        self.next(24) as f32 * FLOAT_UNIT
    }

    /// Uniform over `[0, 1)` with 53 bits of precision
    pub fn next_double(&mut self) -> f64 {
        let hi = (self.next(26) as i64) << 27;
        (hi + self.next(27) as i64) as f64 * DOUBLE_UNIT
    }
}
