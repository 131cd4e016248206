//! Random sources for shuffling and policy tie-breaks.
//!
//! [`Pcg32`] is the default generator: PCG-XSH-RR over a 64-bit state with
//! native `u64` arithmetic. Any `rand` generator can also drive a battle
//! through [`RngSource`].

use std::time::{SystemTime, UNIX_EPOCH};

use rand::rand_core::impls;
use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng, TryRngCore};
use rand_chacha::ChaCha20Rng;

/// Uniform randomness consumed by decks and decision policies.
pub trait RandomSource {
    /// Uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// Integer in `[min, max]`. Returns `min` when the range is empty.
    ///
    /// The provided implementation scales [`next_f64`](Self::next_f64) and
    /// carries a small bias; generators with a native integer output
    /// override it with rejection sampling.
    fn next_int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let range = u64::from(max - min) + 1;
        let offset = (self.next_f64() * range as f64).floor() as u64;
        min + offset.min(range - 1) as u32
    }
}

const PCG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const PCG_DEFAULT_INCREMENT: u64 = 0x1405_7b7e_f767_814f;

/// 2^-53, for turning 53 random bits into a float in `[0, 1)`.
const F64_UNIT: f64 = 1.0 / (1u64 << 53) as f64;

/// Permuted congruential generator with 64-bit state and 32-bit output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    increment: u64,
}

impl Pcg32 {
    pub fn new(seed: u64) -> Self {
        Self::with_stream(seed, PCG_DEFAULT_INCREMENT)
    }

    /// Seeds a specific stream. The increment is forced odd.
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        let mut rng = Self {
            state: 0,
            increment: stream | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    /// Seeds from the operating system generator, falling back to the
    /// wall clock when it is unavailable. Never fails.
    pub fn from_entropy() -> Self {
        match OsRng.try_next_u64() {
            Ok(seed) => Self::new(seed),
            Err(e) => {
                tracing::warn!(error = %e, "os entropy unavailable, seeding from clock");
                Self::new(clock_seed())
            }
        }
    }

    fn step(&mut self) {
        self.state = self
            .state
            .wrapping_mul(PCG_MULTIPLIER)
            .wrapping_add(self.increment);
    }

    pub fn next_u32_raw(&mut self) -> u32 {
        let old = self.state;
        self.step();
        let xorshifted = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for Pcg32 {
    fn next_f64(&mut self) -> f64 {
        let hi = u64::from(self.next_u32_raw() & 0x03ff_ffff);
        let lo = u64::from(self.next_u32_raw() & 0x07ff_ffff);
        ((hi << 27) | lo) as f64 * F64_UNIT
    }

    fn next_int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = max - min;
        if span == u32::MAX {
            return self.next_u32_raw();
        }
        let range = span + 1;
        if range.is_power_of_two() {
            return min + (self.next_u32_raw() & (range - 1));
        }
        // (2^32 - range) mod range: values below it would bias the modulo.
        let threshold = range.wrapping_neg() % range;
        loop {
            let r = self.next_u32_raw();
            if r >= threshold {
                return min + r % range;
            }
        }
    }
}

impl RngCore for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        self.next_u32_raw()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Pcg32 {
    /// Little-endian seed followed by little-endian stream selector.
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut state = [0u8; 8];
        let mut stream = [0u8; 8];
        state.copy_from_slice(&seed[..8]);
        stream.copy_from_slice(&seed[8..]);
        Self::with_stream(u64::from_le_bytes(state), u64::from_le_bytes(stream))
    }

    fn seed_from_u64(seed: u64) -> Self {
        Self::new(seed)
    }
}

fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let marker = 0u8;
    let addr = &marker as *const u8 as u64;
    nanos ^ addr.rotate_left(32) ^ u64::from(std::process::id())
}

/// Adapter that lets any `rand` generator act as a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    inner: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl RngSource<ChaCha20Rng> {
    pub fn chacha(seed: u64) -> Self {
        Self::new(ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.inner.random::<f64>()
    }

    fn next_int_inclusive(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        self.inner.random_range(min..=max)
    }
}

/// Seeded PCG when a seed is given, entropy-seeded otherwise.
pub fn default_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(s) => Box::new(Pcg32::new(s)),
        None => Box::new(Pcg32::from_entropy()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Only exposes floats, so integers come from the scaled fallback.
    struct FloatOnly(Pcg32);

    impl RandomSource for FloatOnly {
        fn next_f64(&mut self) -> f64 {
            self.0.next_f64()
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Pcg32::new(42);
        let mut b = Pcg32::new(42);
        for _ in 0..64 {
            assert_eq!(a.next_u32_raw(), b.next_u32_raw());
        }
    }

    #[test]
    fn streams_diverge() {
        let mut a = Pcg32::with_stream(7, 1);
        let mut b = Pcg32::with_stream(7, 3);
        let xs: Vec<u32> = (0..8).map(|_| a.next_u32_raw()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.next_u32_raw()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut rng = Pcg32::new(9);
        for _ in 0..10_000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn empty_and_degenerate_ranges_return_min() {
        let mut rng = Pcg32::new(1);
        assert_eq!(rng.next_int_inclusive(5, 5), 5);
        assert_eq!(rng.next_int_inclusive(9, 3), 9);
        let mut fallback = FloatOnly(Pcg32::new(1));
        assert_eq!(fallback.next_int_inclusive(4, 4), 4);
    }

    #[test]
    fn fallback_integers_stay_in_range() {
        let mut rng = FloatOnly(Pcg32::new(3));
        for _ in 0..5_000 {
            let v = rng.next_int_inclusive(2, 7);
            assert!((2..=7).contains(&v));
        }
    }

    #[test]
    fn seed_from_u64_matches_new() {
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::new(99);
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
