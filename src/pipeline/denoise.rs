//! Periodic-noise removal.
//!
//! The search window excludes a disc around DC. Its radius is either given
//! or derived from the strongest sample in the upper-left quadrant of the
//! centred spectrum (half its distance from DC), which for a periodic
//! interference pattern is one of the noise spikes.
use super::{forward_stage, reconstruct, PipelineOutput};
use crate::diagnostics::PeakRemovalStage;
use crate::error::{Result, SpectrumError};
use crate::filter::{remove_peaks, BandKind, FilterMask};
use crate::image::ImageF64;
use crate::spectrum::{log_magnitude, Spectrum, Transform2D};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DenoiseParams {
    /// Number of peaks to suppress. Symmetric spikes count twice.
    pub iterations: usize,
    /// Radius around DC left untouched; derived when `None`.
    pub exclusion_radius: Option<f64>,
    pub contrast: f64,
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            iterations: 4,
            exclusion_radius: None,
            contrast: 20.0,
        }
    }
}

pub fn run(image: &ImageF64, transform: &Transform2D, params: &DenoiseParams) -> Result<PipelineOutput> {
    let (mut spec, mut out) = forward_stage("denoise", image, transform)?;
    if !transform.options.shift {
        warn!("denoise: spectrum is not centred, DC exclusion disc sits at the grid centre");
    }
    let before = log_magnitude(&spec, params.contrast, 255.0)?;

    let (radius, auto_radius) = match params.exclusion_radius {
        Some(r) => (r, false),
        None => (auto_exclusion_radius(&spec)?, true),
    };
    debug!("denoise: exclusion radius {radius:.2} (auto={auto_radius})");
    let window = FilterMask::band(spec.rows(), spec.cols(), 0.0, radius, BandKind::Stop)?;
    let removed = out
        .report
        .timings
        .measure("remove_peaks", || remove_peaks(&mut spec, &window, params.iterations))?;

    let after = log_magnitude(&spec, params.contrast, 255.0)?;
    let restored = out
        .report
        .timings
        .measure("inverse", || reconstruct(transform, &spec, image.w, image.h))?;

    out.report.peak_removal = Some(PeakRemovalStage {
        exclusion_radius: radius,
        auto_radius,
        removed,
    });
    out.push("spectrum_before", before);
    out.push("spectrum_after", after);
    out.push("denoised", restored);
    Ok(out)
}

/// Half the distance from DC to the strongest sample of the upper-left
/// quadrant.
pub fn auto_exclusion_radius(spec: &Spectrum) -> Result<f64> {
    let (qr, qc) = (spec.rows() / 2, spec.cols() / 2);
    if qr == 0 || qc == 0 {
        return Err(SpectrumError::invalid(
            "exclusion_radius",
            format!(
                "{}x{} spectrum has no quadrant to search",
                spec.rows(),
                spec.cols()
            ),
        ));
    }
    let mut best = (0usize, 0usize, f64::NEG_INFINITY);
    for r in 0..qr {
        for (c, z) in spec.row(r)[..qc].iter().enumerate() {
            let m = z.norm();
            if m > best.2 {
                best = (r, c, m);
            }
        }
    }
    let dr = qr as f64 - best.0 as f64;
    let dc = qc as f64 - best.1 as f64;
    Ok((dr * dr + dc * dc).sqrt() / 2.0)
}
