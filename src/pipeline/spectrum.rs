//! Spectrum display: log-scaled magnitude (centred and uncentred), real and
//! imaginary parts, and phase.
use super::{forward_stage, PipelineOutput};
use crate::error::Result;
use crate::image::ImageF64;
use crate::spectrum::{log_magnitude, phase, rescale, ComplexBuffer, Transform2D};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumParams {
    /// Multiplier inside the logarithm.
    pub contrast: f64,
    /// Also render the magnitude with the opposite centering setting.
    pub compare_shift: bool,
}

impl Default for SpectrumParams {
    fn default() -> Self {
        Self {
            contrast: 20.0,
            compare_shift: true,
        }
    }
}

pub fn run(image: &ImageF64, transform: &Transform2D, params: &SpectrumParams) -> Result<PipelineOutput> {
    let (spec, mut out) = forward_stage("spectrum", image, transform)?;
    let timings = &mut out.report.timings;
    let log_mag = timings.measure("log_magnitude", || log_magnitude(&spec, params.contrast, 255.0))?;
    let re = rescale(&spec.real_part(), 255.0)?;
    let im = rescale(&spec.imag_part(), 255.0)?;
    let ph = rescale(&phase(&spec), 255.0)?;

    let other = if params.compare_shift {
        let mut options = transform.options;
        options.shift = !options.shift;
        let flipped = Transform2D::new(options);
        let spec = timings.measure("forward_compare", || flipped.forward(&ComplexBuffer::from_real(image)))?;
        Some(log_magnitude(&spec, params.contrast, 255.0)?)
    } else {
        None
    };

    out.push("log_magnitude", log_mag);
    if let Some(other) = other {
        let name = if transform.options.shift {
            "log_magnitude_unshifted"
        } else {
            "log_magnitude_shifted"
        };
        out.push(name, other);
    }
    out.push("real", re);
    out.push("imag", im);
    out.push("phase", ph);
    Ok(out)
}
