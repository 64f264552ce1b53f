use crate::dft::DFT;
use crate::error::{Result, SpectralError};
use crate::modulus::{ReduceOnce, mod_inv};
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use itertools::izip;

/// Walsh-Hadamard transform (XOR convolution) of length n modulo a prime.
///
/// The unnormalized butterfly network is an involution up to a factor n,
/// so forward and backward share it and differ only by the final scaling.
pub struct Hadamard<O> {
    prime: Prime<O>,
    n: usize,
    n_inv: Barrett<O>,
}

impl Hadamard<u64> {
    pub fn new(prime: Prime<u64>, n: usize) -> Result<Hadamard<u64>> {
        if !n.is_power_of_two() {
            return Err(SpectralError::NotPowerOfTwo { n });
        }
        let n_inv: Barrett<u64> = prime.barrett.prepare(mod_inv(n as u64, prime.q()));
        Ok(Self { prime, n, n_inv })
    }

    /// Applies the butterflies, then scales by 1/n if `inverse` is set.
    pub fn apply_inplace(&self, a: &mut [u64], inverse: bool) {
        let n: usize = a.len();
        assert!(n == self.n, "invalid a.len()={} != n={}", n, self.n);
        let q: u64 = self.prime.q;
        debug_assert!(a.iter().all(|&x| x < q), "input not reduced mod q");

        let mut len: usize = 1;
        while len < n {
            a.chunks_exact_mut(len << 1).for_each(|block| {
                let (lo, hi) = block.split_at_mut(len);
                izip!(lo, hi).for_each(|(u, v)| {
                    let (x, y) = (*u, *v);
                    *u = (x + y).reduce_once(q);
                    *v = (x + q - y).reduce_once(q);
                });
            });
            len <<= 1;
        }

        if inverse {
            a.iter_mut()
                .for_each(|x| self.prime.barrett.mul_external_assign(self.n_inv, x));
        }
    }
}

impl DFT<u64> for Hadamard<u64> {
    fn n(&self) -> usize {
        self.n
    }

    fn forward_inplace(&self, a: &mut [u64]) {
        self.apply_inplace(a, false)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.apply_inplace(a, true)
    }
}
