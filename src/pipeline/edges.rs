//! Edge detection through the convolution theorem, checked against the
//! direct spatial filter.
use super::{forward_stage, PipelineOutput};
use crate::diagnostics::EdgeStage;
use crate::error::Result;
use crate::filter::{filter_spatial, kernel_spectrum, KernelMode};
use crate::image::{ImageF64, ImageViewMut};
use crate::spatial::{self, KernelKind};
use crate::spectrum::{log_magnitude, next_pow2, rescale, ComplexBuffer, Transform2D};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeParams {
    pub kernel: KernelKind,
    pub mode: KernelMode,
    pub contrast: f64,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            kernel: KernelKind::SobelX,
            mode: KernelMode::Correlation,
            contrast: 20.0,
        }
    }
}

pub fn run(image: &ImageF64, transform: &Transform2D, params: &EdgeParams) -> Result<PipelineOutput> {
    let (spec, mut out) = forward_stage("edges", image, transform)?;
    let kernel = params.kernel.build();
    let timings = &mut out.report.timings;

    let response = timings
        .measure("filter_frequency", || {
            filter_spatial(transform, &ComplexBuffer::from_real(image), &kernel, params.mode)
        })?
        .real_part();
    let reference = timings.measure("filter_spatial", || match params.mode {
        KernelMode::Correlation => spatial::correlate(image, &kernel),
        KernelMode::Convolution => spatial::convolve(image, &kernel),
    });
    let max_abs_difference = response
        .data
        .iter()
        .zip(&reference.data)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    debug!("edges: max |frequency - spatial| = {max_abs_difference:.3e}");

    let (rows, cols) = (
        next_pow2(image.h + kernel.rows() - 1),
        next_pow2(image.w + kernel.cols() - 1),
    );
    let kspec = kernel_spectrum(transform, &kernel, rows, cols, params.mode)?;

    let mut strength = response;
    strength.map_in_place(f64::abs);

    out.report.edges = Some(EdgeStage {
        kernel: params.kernel,
        mode: params.mode,
        padded_rows: rows,
        padded_cols: cols,
        max_abs_difference,
    });
    out.push("image_spectrum", log_magnitude(&spec, params.contrast, 255.0)?);
    out.push("kernel_spectrum", log_magnitude(&kspec, params.contrast, 255.0)?);
    out.push("edges", rescale(&strength, 255.0)?);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_and_spatial_agree() {
        let img = ImageF64::from_fn(12, 10, |x, y| if x > 5 { 200.0 } else { 10.0 + y as f64 });
        let out = run(&img, &Transform2D::default(), &EdgeParams::default()).unwrap();
        let stage = out.report.edges.as_ref().unwrap();
        assert!(stage.max_abs_difference < 1e-8);
        assert_eq!((stage.padded_rows, stage.padded_cols), (16, 16));
        let edges = out.image("edges").unwrap();
        assert_eq!((edges.w, edges.h), (12, 10));
        // The vertical step between columns 5 and 6 dominates the response.
        assert!(edges.get(5, 4) > 200.0 && edges.get(2, 4) < 50.0);
    }
}
