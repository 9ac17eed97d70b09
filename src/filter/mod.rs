//! Frequency-domain filtering on centred spectra.
//!
//! - [`mask`]: band and Gaussian masks, element-wise masking.
//! - [`peaks`]: iterative peak suppression for periodic noise.
//! - [`convolve`]: spectrum products and kernel spectra (convolution theorem).
//! - [`degrade`]: transfer-function degradation such as motion blur.
pub mod convolve;
pub mod degrade;
pub mod mask;
pub mod peaks;

pub use convolve::{convolve, filter_spatial, kernel_spectrum, multiply_spectra, KernelMode};
pub use degrade::{degrade, MotionBlur, TransferFunction};
pub use mask::{apply_mask, centre_distance, BandKind, FilterMask};
pub use peaks::{neighbour_mean, remove_peaks, RemovedPeak};
