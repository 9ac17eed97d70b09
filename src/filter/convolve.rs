//! Convolution theorem: spatial kernels applied as spectrum products.
//!
//! The kernel is zero-padded to the spectrum's size with its anchor wrapped
//! to the origin, transformed with the same `Transform2D` as the image, and
//! multiplied in. Because both operands share the shift and normalisation
//! settings the inverse transform yields the circular convolution (or
//! correlation) of the padded image with the kernel.
use crate::error::{Result, SpectrumError};
use crate::spatial::Kernel;
use crate::spectrum::{next_pow2, ComplexBuffer, Normalization, Spectrum, Transform2D};
use log::debug;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// How kernel weights index the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelMode {
    /// `Σ k(m) · x(n + m)`, matches [`crate::spatial::correlate`].
    #[default]
    Correlation,
    /// `Σ k(m) · x(n − m)`, matches [`crate::spatial::convolve`].
    Convolution,
}

/// Element-wise complex product `(ac − bd) + (ad + bc)i`.
pub fn multiply_spectra(a: &Spectrum, b: &Spectrum) -> Result<Spectrum> {
    a.ensure_same_dims(b.dims())?;
    let data: Vec<Complex64> = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| {
            Complex64::new(x.re * y.re - x.im * y.im, x.re * y.im + x.im * y.re)
        })
        .collect();
    ComplexBuffer::from_vec(a.rows(), a.cols(), data)
}

/// Spectrum of `kernel` laid out on a `rows × cols` grid.
///
/// The kernel anchor lands on `(0, 0)` and negative offsets wrap to the far
/// edges. `rows` and `cols` must be powers of two no smaller than the
/// kernel.
pub fn kernel_spectrum(
    transform: &Transform2D,
    kernel: &Kernel,
    rows: usize,
    cols: usize,
    mode: KernelMode,
) -> Result<Spectrum> {
    if rows != next_pow2(rows) || cols != next_pow2(cols) {
        return Err(SpectrumError::invalid(
            "spectrum size",
            format!("{rows}x{cols} is not a power-of-two grid"),
        ));
    }
    if kernel.rows() > rows || kernel.cols() > cols {
        return Err(SpectrumError::invalid(
            "kernel",
            format!(
                "{}x{} kernel does not fit a {rows}x{cols} spectrum",
                kernel.rows(),
                kernel.cols()
            ),
        ));
    }
    let kernel = match mode {
        KernelMode::Correlation => kernel.clone(),
        KernelMode::Convolution => kernel.flipped(),
    };
    let (ar, ac) = kernel.anchor();
    let mut grid = ComplexBuffer::new(rows, cols);
    for kr in 0..kernel.rows() {
        // Correlation weight at offset m sits at -m in the convolution kernel.
        let r = (ar + rows - kr) % rows;
        for kc in 0..kernel.cols() {
            let c = (ac + cols - kc) % cols;
            grid[(r, c)] = Complex64::new(kernel.get(kr, kc), 0.0);
        }
    }
    transform.forward(&grid)
}

/// Multiply `spectrum` by the spectrum of `kernel`.
///
/// `spectrum` must come from `transform.forward`. Under
/// [`Normalization::Forward`] the product is rescaled by `rows · cols` so the
/// inverse still yields the unscaled convolution.
pub fn convolve(
    transform: &Transform2D,
    spectrum: &Spectrum,
    kernel: &Kernel,
    mode: KernelMode,
) -> Result<Spectrum> {
    let (rows, cols) = spectrum.dims();
    let kspec = kernel_spectrum(transform, kernel, rows, cols, mode)?;
    let mut product = multiply_spectra(spectrum, &kspec)?;
    if transform.options.normalization == Normalization::Forward {
        product.scale((rows * cols) as f64);
    }
    Ok(product)
}

/// Filter a spatial buffer through the frequency domain.
///
/// Pads to at least `rows + kernel.rows() - 1` by `cols + kernel.cols() - 1`
/// so circular wrap-around only touches zeros, then crops back. The result
/// equals zero-bordered spatial filtering.
pub fn filter_spatial(
    transform: &Transform2D,
    image: &ComplexBuffer,
    kernel: &Kernel,
    mode: KernelMode,
) -> Result<ComplexBuffer> {
    if image.is_empty() {
        return Err(SpectrumError::EmptyInput);
    }
    let rows = next_pow2(image.rows() + kernel.rows() - 1);
    let cols = next_pow2(image.cols() + kernel.cols() - 1);
    debug!(
        "filter_spatial: {}x{} image, {}x{} kernel, grid {rows}x{cols}",
        image.rows(),
        image.cols(),
        kernel.rows(),
        kernel.cols()
    );
    let padded = image.padded_to(rows, cols)?;
    let spectrum = transform.forward(&padded)?;
    let product = convolve(transform, &spectrum, kernel, mode)?;
    transform.inverse(&product)?.cropped(image.rows(), image.cols())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageF64;
    use crate::spatial::{self, KernelKind};
    use crate::spectrum::TransformOptions;

    fn test_image() -> ImageF64 {
        ImageF64::from_fn(6, 5, |x, y| ((x * 31 + y * 17) % 13) as f64 - 3.0)
    }

    fn assert_matches(freq: &ComplexBuffer, spatial: &ImageF64) {
        assert_eq!(freq.dims(), (spatial.h, spatial.w));
        for (r, c, z) in freq.indexed() {
            let want = spatial.get(c, r);
            assert!((z.re - want).abs() < 1e-9, "({r}, {c}): {} vs {want}", z.re);
            assert!(z.im.abs() < 1e-9);
        }
    }

    #[test]
    fn frequency_correlation_equals_spatial_correlation() {
        let img = test_image();
        let kernel = KernelKind::SobelX.build();
        for options in [
            TransformOptions::default(),
            TransformOptions::default().with_shift(false),
            TransformOptions::default().with_normalization(Normalization::Forward),
        ] {
            let t = Transform2D::new(options);
            let freq = filter_spatial(&t, &ComplexBuffer::from_real(&img), &kernel, KernelMode::Correlation)
                .unwrap();
            assert_matches(&freq, &spatial::correlate(&img, &kernel));
        }
    }

    #[test]
    fn frequency_convolution_equals_spatial_convolution() {
        let img = test_image();
        let kernel = Kernel::new(2, 3, vec![1.0, -2.0, 0.5, 3.0, 0.0, -1.0]).unwrap();
        let t = Transform2D::default();
        let freq = filter_spatial(&t, &ComplexBuffer::from_real(&img), &kernel, KernelMode::Convolution)
            .unwrap();
        assert_matches(&freq, &spatial::convolve(&img, &kernel));
    }

    #[test]
    fn product_is_complex_multiplication() {
        let a = ComplexBuffer::from_vec(1, 2, vec![Complex64::new(1.0, 2.0), Complex64::new(0.0, 1.0)]).unwrap();
        let b = ComplexBuffer::from_vec(1, 2, vec![Complex64::new(3.0, -1.0), Complex64::new(0.0, 1.0)]).unwrap();
        let p = multiply_spectra(&a, &b).unwrap();
        assert_eq!(p.as_slice(), &[Complex64::new(5.0, 5.0), Complex64::new(-1.0, 0.0)]);
        assert!(multiply_spectra(&a, &ComplexBuffer::new(2, 1)).is_err());
    }

    #[test]
    fn kernel_must_fit_power_of_two_grid() {
        let t = Transform2D::default();
        let k = KernelKind::Gaussian7.build();
        assert!(kernel_spectrum(&t, &k, 4, 8, KernelMode::Correlation).is_err());
        assert!(kernel_spectrum(&t, &k, 12, 16, KernelMode::Correlation).is_err());
        assert!(kernel_spectrum(&t, &k, 8, 8, KernelMode::Correlation).is_ok());
    }
}
