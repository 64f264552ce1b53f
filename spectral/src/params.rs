//! Fixed constants of the transform pipeline and the sizing rules derived
//! from the matrix dimension.

use crate::modulus::WordOps;

/// Proth prime 119 * 2^23 + 1.
pub const Q: u64 = 998244353;

/// Generator of (Z/QZ)*.
pub const ROOT: u64 = 3;

/// Ceiling on the transform length.
pub const MAX_TRANSFORM_LEN: usize = 16384;

/// Scale applied to n * log2(N) when deriving the mutation exponent.
pub const LAMBDA: f64 = 1.2;

/// Multiplier of the row-encoding bucket map.
pub const BUCKET_STRIDE: u64 = 31;

/// Returns the smallest power of two >= min(n^2, MAX_TRANSFORM_LEN).
pub fn transform_len(n: usize) -> usize {
    let target: usize = n.saturating_mul(n).min(MAX_TRANSFORM_LEN);
    target.max(1).next_power_of_two()
}

/// Returns ceil(n * log2(transform_len) * LAMBDA).
///
/// Evaluated in f64 in the order `(n * log2) * LAMBDA`; changing the order
/// changes the rounding for some n (e.g. n = 5 gives 30, not 31).
pub fn mutation_exponent(n: usize, transform_len: usize) -> u64 {
    debug_assert!(transform_len.is_power_of_two());
    (n as f64 * transform_len.log2() as f64 * LAMBDA).ceil() as u64
}

/// Bucket of entry (i, j) of an n x n matrix in a buffer of length `transform_len`.
#[inline(always)]
pub fn bucket(i: usize, j: usize, n: usize, transform_len: usize) -> usize {
    (((i as u64 * n as u64 + j as u64) * BUCKET_STRIDE) % transform_len as u64) as usize
}
