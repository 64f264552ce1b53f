pub mod dft;
pub mod error;
pub mod matrix;
pub mod modulus;
pub mod observer;
pub mod params;
pub mod pipeline;

pub use error::{Result, SpectralError};
pub use matrix::Matrix;
pub use observer::{LogObserver, Observer, Phase};
pub use pipeline::{Params, Pipeline, Spectrum};

/// Runs the full fusion/mutation/extraction pipeline on `matrix` and returns
/// the extracted residue in [0, Q).
pub fn compute(matrix: &Matrix) -> Result<u64> {
    Pipeline::new(matrix.n())?.compute(matrix, &mut ())
}
