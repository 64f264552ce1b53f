use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};
use rand_distr::Distribution;

/// Deterministic pseudo-random source backed by ChaCha8.
///
/// Two sources built from the same seed produce the same stream, which is
/// what makes generated matrices and randomized tests reproducible.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Expands a small integer seed into a full ChaCha8 key.
    pub fn from_u64(seed: u64) -> Source {
        Source {
            source: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn new_seed(&mut self) -> [u8; 32] {
        let mut seed: [u8; 32] = [0u8; 32];
        self.source.fill_bytes(&mut seed);
        seed
    }

    /// Returns an independent source seeded from this one.
    pub fn branch(&mut self) -> Self {
        Source::new(self.new_seed())
    }

    /// Returns a value in [0, max) by rejection sampling on `next_u64() & mask`.
    /// `mask` must cover `max - 1`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        debug_assert!(max > 0, "invalid max: 0");
        debug_assert!(max - 1 <= mask, "invalid mask: {} does not cover {}", mask, max - 1);
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Fills `buf` with independent draws from `dist`.
    pub fn sample_into<D: Distribution<u64>>(&mut self, dist: &D, buf: &mut [u64]) {
        for x in buf.iter_mut() {
            *x = dist.sample(&mut *self);
        }
    }
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
