pub mod fwht;
pub mod ntt;

/// An in-place transform over slices of a fixed power-of-two length.
pub trait DFT<O> {
    /// Transform length the instance was built for.
    fn n(&self) -> usize;
    fn forward_inplace(&self, a: &mut [O]);
    /// Inverse of `forward_inplace`, including the 1/n normalization.
    fn backward_inplace(&self, a: &mut [O]);
}
