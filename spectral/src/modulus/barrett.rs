use crate::modulus::ReduceOnce;

/// A constant multiplicand together with its precomputed
/// quotient floor(value * 2^64 / q).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Barrett<O>(pub O, pub O);

impl<O> Barrett<O> {
    #[inline(always)]
    pub fn value(&self) -> &O {
        &self.0
    }

    #[inline(always)]
    pub fn quotient(&self) -> &O {
        &self.1
    }
}

/// Precomputations for Barrett reduction modulo q.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarrettPrecomp<O> {
    pub q: O,
    pub hi: O,
    pub one: Barrett<O>,
}

impl BarrettPrecomp<u64> {
    pub fn new(q: u64) -> BarrettPrecomp<u64> {
        assert!(q > 1, "invalid modulus: q = {} <= 1", q);
        let hi: u64 = ((1u128 << u64::BITS) / q as u128) as u64;
        let mut precomp: BarrettPrecomp<u64> = Self {
            q,
            hi,
            one: Barrett(0, 0),
        };
        precomp.one = precomp.prepare(1);
        precomp
    }

    #[inline(always)]
    pub fn one(&self) -> Barrett<u64> {
        self.one
    }

    /// Maps any x in [0, 2^64) to x mod q.
    #[inline(always)]
    pub fn reduce_assign(&self, x: &mut u64) {
        let mhi: u64 = ((*x as u128 * self.hi as u128) >> u64::BITS) as u64;
        *x -= mhi * self.q;
        x.reduce_once_assign(self.q);
    }

    #[inline(always)]
    pub fn reduce(&self, x: u64) -> u64 {
        let mut r: u64 = x;
        self.reduce_assign(&mut r);
        r
    }

    #[inline(always)]
    pub fn prepare(&self, v: u64) -> Barrett<u64> {
        debug_assert!(v < self.q, "invalid value: {} >= q = {}", v, self.q);
        let quotient: u64 = (((v as u128) << u64::BITS) / self.q as u128) as _;
        Barrett(v, quotient)
    }

    /// Returns lhs * rhs mod q for any rhs in [0, 2^64).
    #[inline(always)]
    pub fn mul_external(&self, lhs: Barrett<u64>, rhs: u64) -> u64 {
        let mut r: u64 = rhs;
        self.mul_external_assign(lhs, &mut r);
        r
    }

    /// Assigns lhs * rhs mod q to rhs.
    #[inline(always)]
    pub fn mul_external_assign(&self, lhs: Barrett<u64>, rhs: &mut u64) {
        let t: u64 = ((*lhs.quotient() as u128 * *rhs as u128) >> u64::BITS) as _;
        *rhs = (rhs.wrapping_mul(*lhs.value())).wrapping_sub(self.q.wrapping_mul(t));
        rhs.reduce_once_assign(self.q);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Q;

    #[test]
    fn reduce_matches_remainder() {
        let barrett: BarrettPrecomp<u64> = BarrettPrecomp::new(Q);
        for x in [0u64, 1, Q - 1, Q, Q + 1, 2 * Q - 1, (Q - 1) * (Q - 1), u64::MAX] {
            assert_eq!(barrett.reduce(x), x % Q, "x={}", x);
        }
    }

    #[test]
    fn mul_external_matches_remainder() {
        let barrett: BarrettPrecomp<u64> = BarrettPrecomp::new(Q);
        for v in [0u64, 1, 3, 911660635, Q - 1] {
            let prepared: Barrett<u64> = barrett.prepare(v);
            for x in [0u64, 1, 2, Q - 1, Q, 3 * Q + 5, u64::MAX] {
                let expected: u64 = ((v as u128 * x as u128) % Q as u128) as u64;
                assert_eq!(barrett.mul_external(prepared, x), expected, "v={} x={}", v, x);
            }
        }
    }

    #[test]
    fn one_is_identity() {
        let barrett: BarrettPrecomp<u64> = BarrettPrecomp::new(Q);
        assert_eq!(barrett.one().value(), &1);
        assert_eq!(barrett.mul_external(barrett.one(), 12345), 12345);
    }
}
