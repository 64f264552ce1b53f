use crate::dft::DFT;
use crate::error::Result;
use crate::modulus::{ReduceOnce, WordOps, mod_inv};
use crate::modulus::barrett::Barrett;
use crate::modulus::prime::Prime;
use itertools::izip;

/// Precomputed radix-2 number-theoretic transform of length n modulo a prime.
///
/// Twiddles are stored stage by stage: the butterflies of the stage combining
/// blocks of length `len` read `psi[len/2..len]`, holding omega_len^j for
/// j in [0, len/2), where omega_len = root^((q-1)/len).
pub struct Table<O> {
    prime: Prime<O>,
    n: usize,
    psi_forward: Vec<Barrett<O>>,
    psi_backward: Vec<Barrett<O>>,
    n_inv: Barrett<O>,
}

impl Table<u64> {
    /// Fails if n is not a power of two dividing q - 1 or if `root` is not a
    /// generator of (Z/qZ)*.
    pub fn new(prime: Prime<u64>, root: u64, n: usize) -> Result<Table<u64>> {
        prime.nth_root(root, n)?;

        let one: Barrett<u64> = prime.barrett.one();
        let mut psi_forward: Vec<Barrett<u64>> = vec![one; n];
        let mut psi_backward: Vec<Barrett<u64>> = vec![one; n];

        let mut len: usize = 2;
        while len <= n {
            let half: usize = len >> 1;
            let w: u64 = prime.nth_root(root, len)?;
            let w_inv: u64 = prime.inv(w);
            let (mut wn, mut wn_inv) = (1u64, 1u64);
            for j in 0..half {
                psi_forward[half + j] = prime.barrett.prepare(wn);
                psi_backward[half + j] = prime.barrett.prepare(wn_inv);
                wn = prime.mul(wn, w);
                wn_inv = prime.mul(wn_inv, w_inv);
            }
            len <<= 1;
        }

        let n_inv: Barrett<u64> = prime.barrett.prepare(mod_inv(n as u64, prime.q()));

        Ok(Self {
            prime,
            n,
            psi_forward,
            psi_backward,
            n_inv,
        })
    }

    pub fn prime(&self) -> &Prime<u64> {
        &self.prime
    }

    fn transform_inplace<const INVERSE: bool>(&self, a: &mut [u64]) {
        let n: usize = a.len();
        assert!(
            n == self.n,
            "invalid a.len()={} != n={}",
            n,
            self.n
        );
        debug_assert!(a.iter().all(|&x| x < self.prime.q), "input not reduced mod q");

        if n == 1 {
            return;
        }

        bit_reverse_permutation(a);

        let psi: &[Barrett<u64>] = if INVERSE {
            &self.psi_backward
        } else {
            &self.psi_forward
        };

        let mut len: usize = 2;
        while len <= n {
            let half: usize = len >> 1;
            let twiddles: &[Barrett<u64>] = &psi[half..len];
            a.chunks_exact_mut(len).for_each(|block| {
                let (lo, hi) = block.split_at_mut(half);
                izip!(lo, hi, twiddles).for_each(|(u, v, w)| self.dit_inplace(u, v, *w));
            });
            len <<= 1;
        }

        if INVERSE {
            a.iter_mut()
                .for_each(|x| self.prime.barrett.mul_external_assign(self.n_inv, x));
        }
    }

    /// (u, v) <- (u + v*w, u - v*w) mod q.
    #[inline(always)]
    fn dit_inplace(&self, u: &mut u64, v: &mut u64, w: Barrett<u64>) {
        let q: u64 = self.prime.q;
        debug_assert!(*u < q, "u:{} q:{}", u, q);
        debug_assert!(*v < q, "v:{} q:{}", v, q);
        let vw: u64 = self.prime.barrett.mul_external(w, *v);
        *v = (*u + q - vw).reduce_once(q);
        *u = (*u + vw).reduce_once(q);
    }
}

impl DFT<u64> for Table<u64> {
    fn n(&self) -> usize {
        self.n
    }

    fn forward_inplace(&self, a: &mut [u64]) {
        self.transform_inplace::<false>(a)
    }

    fn backward_inplace(&self, a: &mut [u64]) {
        self.transform_inplace::<true>(a)
    }
}

/// Swaps a[i] and a[rev(i)], with rev reversing the low log2(n) bits.
/// Walks the reversed counter incrementally instead of using a table.
pub fn bit_reverse_permutation<T>(a: &mut [T]) {
    let n: usize = a.len();
    debug_assert!(n.is_power_of_two(), "invalid a.len()={} not a power of two", n);
    let log_n: u32 = n.trailing_zeros();
    let mut j: usize = 0;
    for i in 1..n {
        let mut bit: usize = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        debug_assert_eq!(j, i.reverse_bits_msb(log_n));
        if i < j {
            a.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Q, ROOT};

    fn table(n: usize) -> Table<u64> {
        Table::new(Prime::new(Q).unwrap(), ROOT, n).unwrap()
    }

    #[test]
    fn test_ntt() {
        let ntt_table: Table<u64> = table(32);
        let mut a: Vec<u64> = (0..32).collect();
        let b: Vec<u64> = a.clone();
        ntt_table.forward_inplace(&mut a);
        assert_ne!(a, b);
        ntt_table.backward_inplace(&mut a);
        assert_eq!(a, b);
    }

    #[test]
    fn forward_known_values() {
        let ntt_table: Table<u64> = table(4);
        let mut a: Vec<u64> = vec![1, 2, 3, 4];
        ntt_table.forward_inplace(&mut a);
        assert_eq!(a, vec![10, 173167434, 998244351, 825076915]);
    }

    #[test]
    fn forward_matches_naive_evaluation() {
        let n: usize = 16;
        let ntt_table: Table<u64> = table(n);
        let prime: &Prime<u64> = ntt_table.prime();
        let omega: u64 = prime.nth_root(ROOT, n).unwrap();
        let a: Vec<u64> = (0..n as u64).map(|i| (i * i + 7) % Q).collect();

        let mut expected: Vec<u64> = vec![0; n];
        for (k, e) in expected.iter_mut().enumerate() {
            let omega_k: u64 = prime.pow(omega, k as u64);
            *e = a
                .iter()
                .rev()
                .fold(0, |acc, &c| prime.add(prime.mul(acc, omega_k), c));
        }

        let mut b: Vec<u64> = a.clone();
        ntt_table.forward_inplace(&mut b);
        assert_eq!(b, expected);
    }

    #[test]
    fn length_one_is_identity() {
        let ntt_table: Table<u64> = table(1);
        let mut a: Vec<u64> = vec![5];
        ntt_table.forward_inplace(&mut a);
        assert_eq!(a, vec![5]);
        ntt_table.backward_inplace(&mut a);
        assert_eq!(a, vec![5]);
    }

    #[test]
    fn bit_reverse_matches_word_ops() {
        for log_n in 0..8u32 {
            let n: usize = 1 << log_n;
            let mut a: Vec<usize> = (0..n).collect();
            bit_reverse_permutation(&mut a);
            for (i, &x) in a.iter().enumerate() {
                assert_eq!(x, i.reverse_bits_msb(log_n), "n={} i={}", n, i);
            }
        }
    }

    #[test]
    #[should_panic]
    fn wrong_length_panics() {
        let ntt_table: Table<u64> = table(8);
        let mut a: Vec<u64> = vec![0; 4];
        ntt_table.forward_inplace(&mut a);
    }
}
