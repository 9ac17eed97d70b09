#![doc = include_str!("../README.md")]

// Transform engine and frequency-domain filtering.
pub mod error;
pub mod filter;
pub mod spectrum;

// Supporting image modules.
pub mod affine;
pub mod image;
pub mod noise;
pub mod spatial;
pub mod synthetic;

// Experiments, their reports and tool configuration.
pub mod config;
pub mod diagnostics;
pub mod pipeline;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Result, SpectrumError};
pub use crate::spectrum::{
    ComplexBuffer, Direction, Normalization, Spectrum, Transform2D, TransformOptions,
};

pub use crate::diagnostics::PipelineReport;
pub use crate::pipeline::{Experiment, PipelineOutput};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use spectral_image::prelude::*;
///
/// # fn main() -> Result<(), SpectrumError> {
/// let square = centred_square(64, 16);
/// let input = ComplexBuffer::from_gray(square.as_view());
///
/// let t = Transform2D::default();
/// let spectrum = t.forward(&input)?;
/// let display = log_magnitude(&spectrum, 20.0, 255.0)?;
///
/// let restored = t.inverse(&spectrum)?;
/// assert!((restored[(32, 32)].re - 255.0).abs() < 1e-9);
/// assert_eq!((display.w, display.h), (64, 64));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::filter::{apply_mask, remove_peaks, BandKind, FilterMask};
    pub use crate::image::{ImageF64, ImageU8};
    pub use crate::spectrum::{log_magnitude, magnitude, phase};
    pub use crate::synthetic::centred_square;
    pub use crate::{ComplexBuffer, Spectrum, SpectrumError, Transform2D, TransformOptions};
}
