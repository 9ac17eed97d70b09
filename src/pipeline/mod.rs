//! End-to-end experiments built from the transform engine and filters.
//!
//! Every run takes a real image in pixel units and a configured
//! [`Transform2D`], and returns named output images together with a
//! [`PipelineReport`]. Display images (spectra, edge strength) are rescaled
//! to `[0, 255]` at the padded spectrum size; reconstructions are cropped
//! back to the input size.
//!
//! ```no_run
//! use spectral_image::pipeline::{Experiment, SpectrumParams};
//! use spectral_image::spectrum::Transform2D;
//! use spectral_image::synthetic::centred_square;
//! use spectral_image::image::ImageF64;
//!
//! let square = centred_square(256, 32);
//! let img = ImageF64::from_u8(square.as_view());
//! let out = Experiment::Spectrum(SpectrumParams::default())
//!     .run(&img, &Transform2D::default())
//!     .unwrap();
//! println!("{}", out.report.summary());
//! ```

pub mod denoise;
pub mod edges;
pub mod motion;
pub mod phase;
pub mod prepare;
pub mod spectrum;

pub use denoise::DenoiseParams;
pub use edges::EdgeParams;
pub use motion::MotionParams;
pub use phase::PhaseParams;
pub use prepare::Preprocess;
pub use spectrum::SpectrumParams;

use crate::diagnostics::{InputDescriptor, PipelineReport, SpectrumStage};
use crate::error::{Result, SpectrumError};
use crate::image::ImageF64;
use crate::spectrum::{energy, magnitude, ComplexBuffer, Spectrum, Transform2D};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// An image produced by a pipeline, keyed by a file-name stem.
#[derive(Clone, Debug)]
pub struct NamedImage {
    pub name: String,
    pub image: ImageF64,
}

#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub images: Vec<NamedImage>,
    pub report: PipelineReport,
}

impl PipelineOutput {
    pub fn image(&self, name: &str) -> Option<&ImageF64> {
        self.images
            .iter()
            .find(|n| n.name == name)
            .map(|n| &n.image)
    }

    fn push(&mut self, name: &str, image: ImageF64) {
        self.report.outputs.push(name.to_string());
        self.images.push(NamedImage {
            name: name.to_string(),
            image,
        });
    }
}

/// Experiment selection, tagged by `kind` in configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Experiment {
    Spectrum(SpectrumParams),
    Denoise(DenoiseParams),
    Edges(EdgeParams),
    Motion(MotionParams),
    Phase(PhaseParams),
}

impl Default for Experiment {
    fn default() -> Self {
        Experiment::Spectrum(SpectrumParams::default())
    }
}

impl Experiment {
    pub fn name(&self) -> &'static str {
        match self {
            Experiment::Spectrum(_) => "spectrum",
            Experiment::Denoise(_) => "denoise",
            Experiment::Edges(_) => "edges",
            Experiment::Motion(_) => "motion",
            Experiment::Phase(_) => "phase",
        }
    }

    pub fn run(&self, image: &ImageF64, transform: &Transform2D) -> Result<PipelineOutput> {
        let start = Instant::now();
        info!(
            "{}: {}x{} input, shift={}, normalization={:?}",
            self.name(),
            image.w,
            image.h,
            transform.options.shift,
            transform.options.normalization
        );
        let mut out = match self {
            Experiment::Spectrum(p) => spectrum::run(image, transform, p),
            Experiment::Denoise(p) => denoise::run(image, transform, p),
            Experiment::Edges(p) => edges::run(image, transform, p),
            Experiment::Motion(p) => motion::run(image, transform, p),
            Experiment::Phase(p) => phase::run(image, transform, p),
        }?;
        out.report.timings.finish(start);
        info!("{}", out.report.summary());
        Ok(out)
    }
}

/// Forward transform of `image` with the timing and summary every pipeline
/// starts from.
pub(crate) fn forward_stage(
    experiment: &str,
    image: &ImageF64,
    transform: &Transform2D,
) -> Result<(Spectrum, PipelineOutput)> {
    if image.w == 0 || image.h == 0 {
        return Err(SpectrumError::EmptyInput);
    }
    let mut timings = crate::diagnostics::TimingBreakdown::default();
    let spec = timings.measure("forward", || transform.forward(&ComplexBuffer::from_real(image)))?;
    let (lo, hi) = magnitude(&spec).min_max().unwrap_or((0.0, 0.0));
    let stage = SpectrumStage {
        padded_rows: spec.rows(),
        padded_cols: spec.cols(),
        shifted: transform.options.shift,
        normalization: transform.options.normalization,
        magnitude_range: [lo, hi],
        energy: energy(&spec),
    };
    let input = InputDescriptor {
        width: image.w,
        height: image.h,
    };
    let mut report = PipelineReport::new(experiment, input, stage);
    report.timings = timings;
    Ok((
        spec,
        PipelineOutput {
            images: Vec::new(),
            report,
        },
    ))
}

/// Inverse transform, cropped back to `w × h`, real part.
pub(crate) fn reconstruct(
    transform: &Transform2D,
    spectrum: &Spectrum,
    w: usize,
    h: usize,
) -> Result<ImageF64> {
    Ok(transform.inverse(spectrum)?.cropped(h, w)?.real_part())
}

fn range(image: &ImageF64) -> [f64; 2] {
    let (lo, hi) = image.min_max().unwrap_or((0.0, 0.0));
    [lo, hi]
}
