//! Frequency-domain transform engine.
//!
//! - [`buffer`]: `ComplexBuffer` / `Spectrum` storage with padding and cropping.
//! - [`fft1d`]: in-place radix-2 FFT (bit reversal + butterflies).
//! - [`fft2d`]: separable 2D transform with centering and normalisation.
//! - [`ops`]: shift, magnitude, phase, log display scaling.
pub mod buffer;
pub mod fft1d;
pub mod fft2d;
pub mod ops;

pub use buffer::{ComplexBuffer, Spectrum};
pub use fft1d::{fft_in_place, next_pow2, Direction};
pub use fft2d::{Normalization, Transform2D, TransformOptions};
pub use ops::{
    energy, from_polar, log_magnitude, magnitude, magnitude_only, phase, phase_only, rescale,
    shift,
};
