use crate::error::{Result, SpectralError};
use rand_distr::Uniform;
use sampling::Source;

/// Square matrix of non-negative integers stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Matrix {
    n: usize,
    data: Vec<u64>,
}

impl Matrix {
    /// Returns the n x n zero matrix.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            data: vec![0; n * n],
        }
    }

    /// Builds a matrix from its rows; fails unless every row has one entry
    /// per row.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self> {
        let n: usize = rows.len();
        let mut data: Vec<u64> = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(SpectralError::NotSquare {
                    row: i,
                    len: row.len(),
                    n,
                });
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    /// Returns an n x n matrix with entries drawn uniformly from [min, max].
    pub fn random(n: usize, min: u64, max: u64, source: &mut Source) -> Result<Self> {
        let dist: Uniform<u64> =
            Uniform::new_inclusive(min, max).map_err(|_| SpectralError::InvalidRange { min, max })?;
        let mut matrix: Matrix = Matrix::new(n);
        source.sample_into(&dist, &mut matrix.data);
        Ok(matrix)
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn at(&self, i: usize, j: usize) -> u64 {
        self.data[i * self.n + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: u64) {
        self.data[i * self.n + j] = value
    }

    pub fn row(&self, i: usize) -> &[u64] {
        assert!(i < self.n, "invalid row: {} >= n={}", i, self.n);
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Iterates over the rows in order; empty for n = 0.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        (0..self.n).map(move |i| self.row(i))
    }
}
