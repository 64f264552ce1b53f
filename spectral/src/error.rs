use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpectralError {
    #[error("invalid modulus: q = {q} is not an odd prime")]
    NotPrime { q: u64 },

    #[error("invalid modulus: q = {q} >= 2^32, (q-1)^2 does not fit in u64")]
    ModulusTooLarge { q: u64 },

    #[error("invalid transform length: n = {n} is not a power of two")]
    NotPowerOfTwo { n: usize },

    #[error("invalid transform length: n = {n} does not divide q - 1 = {phi}")]
    NoRootOfUnity { n: usize, phi: u64 },

    #[error("invalid transform length: n = {n} > ceiling {max}")]
    LengthExceedsCeiling { n: usize, max: usize },

    #[error("invalid root: {root} is not a generator of (Z/{q}Z)*")]
    NotPrimitiveRoot { root: u64, q: u64 },

    #[error("invalid matrix: row {row} has {len} entries, expected {n}")]
    NotSquare { row: usize, len: usize, n: usize },

    #[error("dimension mismatch: matrix n = {matrix} != pipeline n = {pipeline}")]
    DimensionMismatch { matrix: usize, pipeline: usize },

    #[error("invalid range: min = {min} > max = {max}")]
    InvalidRange { min: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, SpectralError>;
