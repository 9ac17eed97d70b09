//! Magnitude versus phase: reconstruct from each alone.
use super::{forward_stage, range, reconstruct, PipelineOutput};
use crate::diagnostics::PhaseStage;
use crate::error::Result;
use crate::image::ImageF64;
use crate::spectrum::{magnitude_only, phase_only, rescale, Transform2D};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseParams {
    /// Also export the unmodified reconstruction.
    pub include_original: bool,
}

pub fn run(image: &ImageF64, transform: &Transform2D, params: &PhaseParams) -> Result<PipelineOutput> {
    let (spec, mut out) = forward_stage("phase", image, transform)?;
    let (w, h) = (image.w, image.h);
    let timings = &mut out.report.timings;

    let zero_phase = timings.measure("zero_phase", || {
        reconstruct(transform, &magnitude_only(&spec), w, h)
    })?;
    let unit_magnitude = timings.measure("unit_magnitude", || {
        reconstruct(transform, &phase_only(&spec), w, h)
    })?;
    let original = if params.include_original {
        Some(reconstruct(transform, &spec, w, h)?)
    } else {
        None
    };

    out.report.phase = Some(PhaseStage {
        zero_phase_range: range(&zero_phase),
        unit_magnitude_range: range(&unit_magnitude),
    });
    out.push("zero_phase", rescale(&zero_phase, 255.0)?);
    out.push("unit_magnitude", rescale(&unit_magnitude, 255.0)?);
    if let Some(original) = original {
        out.push("original", original);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconstructions_are_exported() {
        let img = ImageF64::from_fn(16, 16, |x, y| if (4..8).contains(&x) && (4..12).contains(&y) { 255.0 } else { 0.0 });
        let params = PhaseParams {
            include_original: true,
        };
        let out = run(&img, &Transform2D::default(), &params).unwrap();
        let original = out.image("original").unwrap();
        for (a, b) in original.data.iter().zip(&img.data) {
            assert!((a - b).abs() < 1e-9);
        }
        let stage = out.report.phase.as_ref().unwrap();
        assert!(stage.unit_magnitude_range[1] > stage.unit_magnitude_range[0]);
        assert_eq!(out.report.outputs, vec!["zero_phase", "unit_magnitude", "original"]);
    }
}
