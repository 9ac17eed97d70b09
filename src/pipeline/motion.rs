//! Uniform linear motion blur applied in the frequency domain.
use super::{forward_stage, range, reconstruct, PipelineOutput};
use crate::diagnostics::MotionStage;
use crate::error::Result;
use crate::filter::{degrade, MotionBlur};
use crate::image::ImageF64;
use crate::spectrum::{log_magnitude, rescale, Transform2D};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    pub blur: MotionBlur,
    pub contrast: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            blur: MotionBlur::default(),
            contrast: 20.0,
        }
    }
}

pub fn run(image: &ImageF64, transform: &Transform2D, params: &MotionParams) -> Result<PipelineOutput> {
    let (mut spec, mut out) = forward_stage("motion", image, transform)?;
    if !transform.options.shift {
        warn!("motion: transfer function assumes a centred spectrum");
    }
    out.report
        .timings
        .measure("degrade", || degrade(&mut spec, &params.blur))?;
    let blurred = out
        .report
        .timings
        .measure("inverse", || reconstruct(transform, &spec, image.w, image.h))?;

    out.report.motion = Some(MotionStage {
        blur: params.blur,
        output_range: range(&blurred),
    });
    out.push("degraded_spectrum", log_magnitude(&spec, params.contrast, 255.0)?);
    out.push("blurred", rescale(&blurred, 255.0)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_smooths_a_step() {
        let img = ImageF64::from_fn(32, 32, |x, _| if x < 16 { 0.0 } else { 255.0 });
        let params = MotionParams {
            blur: MotionBlur {
                a: 0.0,
                b: 0.1,
                t: 1.0,
            },
            ..Default::default()
        };
        let out = run(&img, &Transform2D::default(), &params).unwrap();
        let stage = out.report.motion.as_ref().unwrap();
        // Mean is preserved by the unit DC gain; the step no longer spans
        // the full range within one pixel.
        let blurred = out.image("blurred").unwrap();
        let jump = (blurred.get(16, 10) - blurred.get(15, 10)).abs();
        assert!(jump < 200.0, "jump={jump}");
        assert!(stage.output_range[1] > stage.output_range[0]);
    }
}
