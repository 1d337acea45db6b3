/// Derive a reproducible seed from an identifying string (typically an image URI).
///
/// Rolling `hash * 31 + c` over UTF-16 code units, wrapped to a signed 32-bit integer at every
/// step; the absolute value is returned, so `i32::MIN` maps to `2^31`.
pub fn derive_seed(input: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// A stream of uniform draws in `[0, 1)`.
pub trait RandomSource {
    /// Advance the stream and return the next draw.
    fn next_f64(&mut self) -> f64;
}

impl<F> RandomSource for F
where
    F: FnMut() -> f64,
{
    fn next_f64(&mut self) -> f64 {
        self()
    }
}

/// Small linear congruential generator (`a = 9301`, `c = 49297`, `m = 233280`).
///
/// State is pure integer arithmetic; only the returned value is a float, so the sequence is
/// identical on every platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u64,
}

impl Lcg {
    /// Multiplier.
    pub const MULTIPLIER: u64 = 9301;
    /// Increment.
    pub const INCREMENT: u64 = 49297;
    /// Modulus.
    pub const MODULUS: u64 = 233_280;

    /// Start a stream at `seed`.
    pub fn new(seed: u64) -> Self {
        // (s mod m) * a + c never overflows and is congruent to s * a + c
        Self {
            state: seed % Self::MODULUS,
        }
    }

    /// Advance and return the raw integer state in `[0, MODULUS)`.
    pub fn next_state(&mut self) -> u64 {
        self.state = (self.state * Self::MULTIPLIER + Self::INCREMENT) % Self::MODULUS;
        self.state
    }
}

impl RandomSource for Lcg {
    fn next_f64(&mut self) -> f64 {
        self.next_state() as f64 / Self::MODULUS as f64
    }
}

/// Closure form of [`Lcg`]: each call returns the next draw in `[0, 1)`.
pub fn make_generator(seed: u64) -> impl FnMut() -> f64 {
    let mut lcg = Lcg::new(seed);
    move || lcg.next_f64()
}

#[cfg(test)]
#[path = "../../tests/unit/silhouette/seed.rs"]
mod tests;
