//! Spatial-domain filtering used alongside the transform engine: named
//! kernels and direct correlation/convolution/median filters.
pub mod correlate;
pub mod kernels;

pub use correlate::{convolve, correlate, median};
pub use kernels::{Kernel, KernelKind};
