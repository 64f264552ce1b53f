//! Three-phase spectral pipeline: per-row NTT fusion into a running product,
//! pointwise exponentiation, and inverse Walsh-Hadamard extraction.

use std::time::Instant;

use itertools::izip;
use log::debug;

use crate::dft::DFT;
use crate::dft::fwht::Hadamard;
use crate::dft::ntt::Table;
use crate::error::{Result, SpectralError};
use crate::matrix::Matrix;
use crate::modulus::mod_pow;
use crate::modulus::prime::Prime;
use crate::observer::{Observer, Phase};
use crate::params::{MAX_TRANSFORM_LEN, Q, ROOT, bucket, mutation_exponent, transform_len};

/// Parameters derived from the matrix dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Params {
    pub n: usize,
    /// Length N of every buffer, a power of two <= MAX_TRANSFORM_LEN.
    pub transform_len: usize,
    /// Mutation exponent k.
    pub exponent: u64,
}

impl Params {
    pub fn new(n: usize) -> Result<Self> {
        Self::with_transform_len(n, transform_len(n))
    }

    /// Same as `new` but with an explicit transform length, which must be a
    /// power of two <= MAX_TRANSFORM_LEN.
    pub fn with_transform_len(n: usize, transform_len: usize) -> Result<Self> {
        if !transform_len.is_power_of_two() {
            return Err(SpectralError::NotPowerOfTwo { n: transform_len });
        }
        if transform_len > MAX_TRANSFORM_LEN {
            return Err(SpectralError::LengthExceedsCeiling {
                n: transform_len,
                max: MAX_TRANSFORM_LEN,
            });
        }
        if (Q - 1) % transform_len as u64 != 0 {
            return Err(SpectralError::NoRootOfUnity {
                n: transform_len,
                phi: Q - 1,
            });
        }
        Ok(Self {
            n,
            transform_len,
            exponent: mutation_exponent(n, transform_len),
        })
    }
}

/// The running spectral product psi.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spectrum(pub Vec<u64>);

impl Spectrum {
    pub fn ones(n: usize) -> Self {
        Self(vec![1; n])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Owns the validated modulus and transform tables for one matrix dimension.
/// Spectral buffers are passed by value through the phases, so independent
/// computations never share state.
pub struct Pipeline {
    params: Params,
    prime: Prime<u64>,
    ntt: Table<u64>,
    fwht: Hadamard<u64>,
}

impl Pipeline {
    pub fn new(n: usize) -> Result<Self> {
        Self::from_params(Params::new(n)?)
    }

    pub fn from_params(params: Params) -> Result<Self> {
        let prime: Prime<u64> = Prime::new(Q)?;
        let ntt: Table<u64> = Table::new(prime.clone(), ROOT, params.transform_len)?;
        let fwht: Hadamard<u64> = Hadamard::new(prime.clone(), params.transform_len)?;
        debug!(
            "pipeline: q = {}, root = {}, n = {}, N = {}, k = {}",
            prime.q(),
            ROOT,
            params.n,
            params.transform_len,
            params.exponent
        );
        Ok(Self {
            params,
            prime,
            ntt,
            fwht,
        })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Scatters row i into a zeroed buffer of length N: entry j is reduced
    /// mod q and added into bucket ((i*n + j) * 31) mod N. Colliding entries
    /// sum.
    pub fn encode_row(&self, i: usize, row: &[u64]) -> Vec<u64> {
        let (n, len) = (self.params.n, self.params.transform_len);
        debug_assert!(row.len() == n, "invalid row.len()={} != n={}", row.len(), n);
        let mut poly: Vec<u64> = vec![0; len];
        row.iter().enumerate().for_each(|(j, &x)| {
            let idx: usize = bucket(i, j, n, len);
            poly[idx] = self.prime.add(poly[idx], self.prime.barrett.reduce(x));
        });
        poly
    }

    /// Phase 1: multiplies psi pointwise by the NTT of every encoded row.
    pub fn fuse<O: Observer + ?Sized>(
        &self,
        mut spectrum: Spectrum,
        matrix: &Matrix,
        observer: &mut O,
    ) -> Result<Spectrum> {
        self.check_dimension(matrix)?;
        assert!(
            spectrum.len() == self.params.transform_len,
            "invalid spectrum.len()={} != N={}",
            spectrum.len(),
            self.params.transform_len
        );
        let n: usize = self.params.n;
        for (i, row) in matrix.rows().enumerate() {
            let mut poly: Vec<u64> = self.encode_row(i, row);
            self.ntt.forward_inplace(&mut poly);
            izip!(spectrum.0.iter_mut(), &poly).for_each(|(s, p)| *s = self.prime.mul(*s, *p));
            observer.on_row(i + 1, n);
        }
        Ok(spectrum)
    }

    /// Phase 2: raises every coefficient of psi to the mutation exponent.
    pub fn mutate(&self, mut spectrum: Spectrum) -> Spectrum {
        let (k, q) = (self.params.exponent, self.prime.q());
        spectrum.0.iter_mut().for_each(|x| *x = mod_pow(*x, k, q));
        spectrum
    }

    /// Phase 3: inverse Walsh-Hadamard transform of psi.
    pub fn extract(&self, mut spectrum: Spectrum) -> Spectrum {
        self.fwht.backward_inplace(&mut spectrum.0);
        spectrum
    }

    /// Runs fusion, mutation and extraction in order and returns psi[0].
    pub fn compute<O: Observer + ?Sized>(&self, matrix: &Matrix, observer: &mut O) -> Result<u64> {
        self.check_dimension(matrix)?;
        observer.on_start(&self.params);

        let start: Instant = Instant::now();
        let spectrum: Spectrum = Spectrum::ones(self.params.transform_len);

        let spectrum: Spectrum = self.fuse(spectrum, matrix, observer)?;
        let fused: Instant = Instant::now();
        observer.on_phase(Phase::Fusion, fused - start);

        let spectrum: Spectrum = self.mutate(spectrum);
        let mutated: Instant = Instant::now();
        observer.on_phase(Phase::Mutation, mutated - fused);

        let spectrum: Spectrum = self.extract(spectrum);
        let extracted: Instant = Instant::now();
        observer.on_phase(Phase::Extraction, extracted - mutated);
        observer.on_finish(extracted - start);

        Ok(spectrum.0[0])
    }

    fn check_dimension(&self, matrix: &Matrix) -> Result<()> {
        if matrix.n() != self.params.n {
            return Err(SpectralError::DimensionMismatch {
                matrix: matrix.n(),
                pipeline: self.params.n,
            });
        }
        Ok(())
    }
}
