pub mod barrett;
pub mod prime;

pub trait WordOps<O> {
    fn log2(self) -> O;
    fn reverse_bits_msb(self, n: u32) -> O;
}

impl WordOps<u64> for u64 {
    #[inline(always)]
    fn log2(self) -> u64 {
        (u64::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> u64 {
        if n == 0 {
            return 0;
        }
        self.reverse_bits() >> (u64::BITS - n)
    }
}

impl WordOps<usize> for usize {
    #[inline(always)]
    fn log2(self) -> usize {
        (usize::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        if n == 0 {
            return 0;
        }
        self.reverse_bits() >> (usize::BITS - n)
    }
}

pub trait ReduceOnce<O> {
    /// Assigns self-q to self if self >= q.
    /// User must ensure that 2q fits in O.
    fn reduce_once_assign(&mut self, q: O);
    /// Returns self-q if self >= q else self.
    /// User must ensure that 2q fits in O.
    fn reduce_once(&self, q: O) -> O;
}

impl ReduceOnce<u64> for u64 {
    #[inline(always)]
    fn reduce_once_assign(&mut self, q: u64) {
        debug_assert!(q < 0x8000000000000000, "2q >= 2^64");
        *self = (*self).min(self.wrapping_sub(q))
    }

    #[inline(always)]
    fn reduce_once(&self, q: u64) -> u64 {
        debug_assert!(q < 0x8000000000000000, "2q >= 2^64");
        (*self).min(self.wrapping_sub(q))
    }
}

/// Returns base^exponent mod m by square-and-multiply.
/// Accepts any m > 0 and any base; products are carried in u128.
pub fn mod_pow(base: u64, exponent: u64, m: u64) -> u64 {
    assert!(m > 0, "invalid modulus: m = 0");
    let m128: u128 = m as u128;
    let mut result: u128 = 1 % m128;
    let mut base: u128 = base as u128 % m128;
    let mut e: u64 = exponent;
    while e > 0 {
        if e & 1 == 1 {
            result = result * base % m128;
        }
        base = base * base % m128;
        e >>= 1;
    }
    result as u64
}

/// Returns a^-1 mod m for a prime m, as a^(m-2) mod m.
/// Returns 0 if a is a multiple of m; callers must treat that as invalid.
pub fn mod_inv(a: u64, m: u64) -> u64 {
    assert!(m > 1, "invalid modulus: m = {} <= 1", m);
    mod_pow(a, m - 2, m)
}
