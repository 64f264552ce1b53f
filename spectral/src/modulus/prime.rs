use crate::error::{Result, SpectralError};
use crate::modulus::ReduceOnce;
use crate::modulus::barrett::BarrettPrecomp;
use primality_test::is_prime;
use prime_factorization::Factorization;

/// A validated prime modulus q < 2^32 with the precomputations needed for
/// fully reduced arithmetic in [0, q).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prime<O> {
    pub q: O,
    /// Order of the multiplicative group, q - 1.
    pub phi: O,
    /// Distinct prime factors of phi.
    pub factors: Vec<O>,
    pub barrett: BarrettPrecomp<O>,
}

impl Prime<u64> {
    /// Returns a new instance of Prime<u64>.
    /// Fails if q is not an odd prime or if (q-1)^2 would overflow u64.
    pub fn new(q: u64) -> Result<Self> {
        if q >= 1 << 32 {
            return Err(SpectralError::ModulusTooLarge { q });
        }
        if q <= 2 || !is_prime(q) {
            return Err(SpectralError::NotPrime { q });
        }

        let phi: u64 = q - 1;
        let factors: Vec<u64> = Factorization::run(phi)
            .prime_factor_repr()
            .iter()
            .map(|(p, _)| *p)
            .collect();

        Ok(Self {
            q,
            phi,
            factors,
            barrett: BarrettPrecomp::new(q),
        })
    }

    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.q && b < self.q);
        (a + b).reduce_once(self.q)
    }

    #[inline(always)]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.q && b < self.q);
        (a + self.q - b).reduce_once(self.q)
    }

    /// Returns a * b mod q. The product is formed in u64, which holds (q-1)^2.
    #[inline(always)]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        debug_assert!(a < self.q && b < self.q);
        self.barrett.reduce(a * b)
    }

    /// Returns x^exponent mod q.
    pub fn pow(&self, x: u64, exponent: u64) -> u64 {
        let mut y: u64 = self.barrett.one().0;
        let mut x: u64 = self.barrett.reduce(x);
        let mut i: u64 = exponent;
        while i > 0 {
            if i & 1 == 1 {
                y = self.mul(x, y);
            }
            x = self.mul(x, x);
            i >>= 1;
        }
        y
    }

    /// Returns x^-1 mod q.
    /// User must ensure that x is not divisible by q.
    pub fn inv(&self, x: u64) -> u64 {
        debug_assert!(x % self.q != 0, "invalid argument: {} is not invertible mod {}", x, self.q);
        self.pow(x, self.phi - 1)
    }

    /// Returns true if g generates (Z/qZ)*.
    pub fn is_primitive_root(&self, g: u64) -> bool {
        let g: u64 = g % self.q;
        g != 0
            && self
                .factors
                .iter()
                .all(|&factor| self.pow(g, self.phi / factor) != 1)
    }

    /// Returns g^((q-1)/n), a root of unity of exact order n when g is a
    /// generator. Fails if n is not a power of two dividing q - 1 or if g
    /// is not a generator.
    pub fn nth_root(&self, g: u64, n: usize) -> Result<u64> {
        if !n.is_power_of_two() {
            return Err(SpectralError::NotPowerOfTwo { n });
        }
        if self.phi % n as u64 != 0 {
            return Err(SpectralError::NoRootOfUnity { n, phi: self.phi });
        }
        if !self.is_primitive_root(g) {
            return Err(SpectralError::NotPrimitiveRoot { root: g, q: self.q });
        }
        let omega: u64 = self.pow(g, self.phi / n as u64);
        debug_assert!(self.pow(omega, n as u64) == 1);
        debug_assert!(n == 1 || self.pow(omega, (n >> 1) as u64) == self.q - 1);
        Ok(omega)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modulus::mod_pow;
    use crate::params::{Q, ROOT};

    #[test]
    fn new_rejects_composites_and_large() {
        assert_eq!(Prime::new(15), Err(SpectralError::NotPrime { q: 15 }));
        assert_eq!(Prime::new(2), Err(SpectralError::NotPrime { q: 2 }));
        assert_eq!(
            Prime::new(0x800000000004001),
            Err(SpectralError::ModulusTooLarge { q: 0x800000000004001 })
        );
    }

    #[test]
    fn factors_of_phi() {
        let prime: Prime<u64> = Prime::new(Q).unwrap();
        let mut factors: Vec<u64> = prime.factors.clone();
        factors.sort();
        assert_eq!(factors, vec![2, 7, 17]);
    }

    #[test]
    fn arithmetic_matches_u128() {
        let prime: Prime<u64> = Prime::new(Q).unwrap();
        let values: [u64; 6] = [0, 1, 2, 3, 499122177, Q - 1];
        for &a in &values {
            for &b in &values {
                assert_eq!(prime.add(a, b), (a + b) % Q);
                assert_eq!(prime.sub(a, b), (a + Q - b) % Q);
                assert_eq!(prime.mul(a, b), ((a as u128 * b as u128) % Q as u128) as u64);
            }
        }
    }

    #[test]
    fn pow_matches_free_function() {
        let prime: Prime<u64> = Prime::new(Q).unwrap();
        for a in [0u64, 1, 3, 5, Q - 1, Q + 2] {
            for e in [0u64, 1, 2, 20, 1680, Q - 2, Q - 1] {
                assert_eq!(prime.pow(a, e), mod_pow(a, e, Q), "a={} e={}", a, e);
            }
        }
    }

    #[test]
    fn inv() {
        let prime: Prime<u64> = Prime::new(Q).unwrap();
        for a in [1u64, 2, 4, 16384, 987654321] {
            assert_eq!(prime.mul(a, prime.inv(a)), 1);
        }
    }

    #[test]
    fn root_three_is_generator() {
        let prime: Prime<u64> = Prime::new(Q).unwrap();
        assert!(prime.is_primitive_root(ROOT));
        assert!(!prime.is_primitive_root(2));
        assert!(!prime.is_primitive_root(Q));
    }

    #[test]
    fn nth_root_has_exact_order() {
        let prime: Prime<u64> = Prime::new(Q).unwrap();
        assert_eq!(prime.nth_root(ROOT, 1), Ok(1));
        assert_eq!(prime.nth_root(ROOT, 4), Ok(911660635));
        for log_n in 1..=23 {
            let n: usize = 1 << log_n;
            let omega: u64 = prime.nth_root(ROOT, n).unwrap();
            assert_eq!(prime.pow(omega, n as u64), 1);
            assert_eq!(prime.pow(omega, (n >> 1) as u64), Q - 1);
        }
    }

    #[test]
    fn nth_root_rejects_invalid_lengths() {
        let prime: Prime<u64> = Prime::new(Q).unwrap();
        assert_eq!(prime.nth_root(ROOT, 12), Err(SpectralError::NotPowerOfTwo { n: 12 }));
        assert_eq!(
            prime.nth_root(ROOT, 1 << 24),
            Err(SpectralError::NoRootOfUnity { n: 1 << 24, phi: Q - 1 })
        );
        assert_eq!(
            prime.nth_root(2, 16),
            Err(SpectralError::NotPrimitiveRoot { root: 2, q: Q })
        );
    }
}
