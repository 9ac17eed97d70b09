//! Spectrum inspection: centering, magnitude/phase, display scaling and
//! polar recombination.
use super::buffer::{ComplexBuffer, Spectrum};
use crate::error::{Result, SpectrumError};
use crate::image::ImageF64;
use log::warn;
use num_complex::Complex64;

/// Checkerboard sign flip: sample `(i, j)` times `(-1)^(i+j)`.
///
/// On a power-of-two spectrum this toggles between DC-at-origin and
/// DC-at-centre. Applying it twice restores the input exactly.
pub fn shift(buffer: &mut ComplexBuffer) {
    for r in 0..buffer.rows() {
        let row = buffer.row_mut(r);
        for z in row.iter_mut().skip((r + 1) % 2).step_by(2) {
            *z = -*z;
        }
    }
}

/// `|z|` per sample.
pub fn magnitude(spectrum: &Spectrum) -> ImageF64 {
    spectrum.map_real(|z| z.norm())
}

/// `atan2(im, re)` per sample, in `(-π, π]`.
pub fn phase(spectrum: &Spectrum) -> ImageF64 {
    spectrum.map_real(|z| z.arg())
}

/// Total `Σ |z|²`.
pub fn energy(buffer: &ComplexBuffer) -> f64 {
    buffer.as_slice().iter().map(|z| z.norm_sqr()).sum()
}

/// Log-scaled magnitude for display.
///
/// Computes `ln(c · |m + 1|)` per sample, then rescales linearly to
/// `[0, target_max]` using the observed maximum and `min(observed_min, 0)`.
/// Flat input yields a constant image: zeros when the shared log value is
/// `<= 0`, otherwise `target_max` everywhere since the floor sits at 0.
pub fn log_magnitude(spectrum: &Spectrum, contrast: f64, target_max: f64) -> Result<ImageF64> {
    if !(contrast.is_finite() && contrast > 0.0) {
        return Err(SpectrumError::invalid("contrast", format!("{contrast} must be positive")));
    }
    check_target(target_max)?;
    spectrum.ensure_finite()?;
    let logs = spectrum.map_real(|z| (contrast * (z.norm() + 1.0).abs()).ln());
    Ok(rescale_with_floor(&logs, target_max, true))
}

/// Linear min/max rescale to `[0, target_max]`. A flat image maps to zeros.
pub fn rescale(image: &ImageF64, target_max: f64) -> Result<ImageF64> {
    check_target(target_max)?;
    if let Some(i) = image.data.iter().position(|v| !v.is_finite()) {
        return Err(SpectrumError::NonFinite {
            row: i / image.stride.max(1),
            col: i % image.stride.max(1),
        });
    }
    Ok(rescale_with_floor(image, target_max, false))
}

fn check_target(target_max: f64) -> Result<()> {
    if target_max.is_finite() && target_max > 0.0 {
        Ok(())
    } else {
        Err(SpectrumError::invalid(
            "target_max",
            format!("{target_max} must be positive"),
        ))
    }
}

fn rescale_with_floor(image: &ImageF64, target_max: f64, clamp_min_to_zero: bool) -> ImageF64 {
    let Some((lo, hi)) = image.min_max() else {
        return image.clone();
    };
    let lo = if clamp_min_to_zero { lo.min(0.0) } else { lo };
    let span = hi - lo;
    let mut out = image.clone();
    if span <= 0.0 {
        warn!("rescale: flat input ({lo}), returning constant image");
        out.data.iter_mut().for_each(|v| *v = 0.0);
        return out;
    }
    let k = target_max / span;
    out.data.iter_mut().for_each(|v| *v = (*v - lo) * k);
    out
}

/// Recombine magnitude and phase images into a spectrum.
pub fn from_polar(magnitude: &ImageF64, phase: &ImageF64) -> Result<Spectrum> {
    if (magnitude.w, magnitude.h) != (phase.w, phase.h) {
        return Err(SpectrumError::DimensionMismatch {
            expected: (magnitude.h, magnitude.w),
            found: (phase.h, phase.w),
        });
    }
    Ok(ComplexBuffer::from_fn(magnitude.h, magnitude.w, |r, c| {
        Complex64::from_polar(magnitude.get(c, r), phase.get(c, r))
    }))
}

/// Keep each sample's magnitude and drop its phase.
pub fn magnitude_only(spectrum: &Spectrum) -> Spectrum {
    ComplexBuffer::from_fn(spectrum.rows(), spectrum.cols(), |r, c| {
        Complex64::new(spectrum[(r, c)].norm(), 0.0)
    })
}

/// Keep each sample's phase at unit magnitude. Zero samples stay at phase 0.
pub fn phase_only(spectrum: &Spectrum) -> Spectrum {
    ComplexBuffer::from_fn(spectrum.rows(), spectrum.cols(), |r, c| {
        Complex64::from_polar(1.0, spectrum[(r, c)].arg())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rows: usize, cols: usize) -> ComplexBuffer {
        ComplexBuffer::from_fn(rows, cols, |r, c| {
            Complex64::new(r as f64 * 1.5 - c as f64, (r * c) as f64 * 0.25)
        })
    }

    #[test]
    fn shift_twice_is_identity_exactly() {
        let original = sample(4, 8);
        let mut buf = original.clone();
        shift(&mut buf);
        assert_ne!(buf, original);
        shift(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn shift_flips_odd_parity_samples() {
        let mut buf = ComplexBuffer::from_fn(2, 3, |_, _| Complex64::new(1.0, 1.0));
        shift(&mut buf);
        let signs: Vec<f64> = buf.as_slice().iter().map(|z| z.re).collect();
        assert_eq!(signs, vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0]);
    }

    #[test]
    fn magnitude_and_phase_of_known_samples() {
        let buf = ComplexBuffer::from_vec(
            1,
            2,
            vec![Complex64::new(3.0, 4.0), Complex64::new(0.0, -2.0)],
        )
        .unwrap();
        let mag = magnitude(&buf);
        let ph = phase(&buf);
        assert_eq!(mag.data, vec![5.0, 2.0]);
        assert!((ph.get(0, 0) - (4.0f64).atan2(3.0)).abs() < 1e-15);
        assert!((ph.get(1, 0) + std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn log_magnitude_spans_target_range() {
        let buf = sample(4, 4);
        let img = log_magnitude(&buf, 5.0, 255.0).unwrap();
        let (lo, hi) = img.min_max().unwrap();
        assert!((hi - 255.0).abs() < 1e-9);
        assert!(lo >= 0.0);
    }

    #[test]
    fn log_magnitude_of_flat_spectrum_is_constant() {
        let buf = ComplexBuffer::from_fn(4, 4, |_, _| Complex64::new(0.0, 0.0));
        // ln(1 * 1) = 0 everywhere; min clamps to 0 so the span is zero.
        let img = log_magnitude(&buf, 1.0, 255.0).unwrap();
        assert!(img.data.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn log_magnitude_of_flat_nonzero_spectrum_is_full_scale() {
        let buf = ComplexBuffer::from_fn(4, 4, |_, _| Complex64::new(10.0, 0.0));
        // ln(5 * 11) > 0 and the floor is 0, so every sample lands on the top.
        let img = log_magnitude(&buf, 5.0, 255.0).unwrap();
        assert!(img.data.iter().all(|&v| (v - 255.0).abs() < 1e-9));
    }

    #[test]
    fn log_magnitude_rejects_bad_contrast_and_nan() {
        let buf = sample(2, 2);
        assert!(matches!(
            log_magnitude(&buf, 0.0, 255.0),
            Err(SpectrumError::InvalidParameter { name: "contrast", .. })
        ));
        let mut bad = buf.clone();
        bad[(1, 0)] = Complex64::new(f64::NAN, 0.0);
        assert_eq!(
            log_magnitude(&bad, 5.0, 255.0).unwrap_err(),
            SpectrumError::NonFinite { row: 1, col: 0 }
        );
    }

    #[test]
    fn rescale_maps_min_to_zero() {
        let img = ImageF64::from_fn(3, 1, |x, _| [2.0, 4.0, 6.0][x]);
        let out = rescale(&img, 1.0).unwrap();
        assert_eq!(out.data, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn polar_round_trip() {
        let buf = sample(4, 4);
        let rebuilt = from_polar(&magnitude(&buf), &phase(&buf)).unwrap();
        for (a, b) in rebuilt.as_slice().iter().zip(buf.as_slice()) {
            assert!((*a - *b).norm() < 1e-12);
        }
        assert!(from_polar(&ImageF64::new(2, 2), &ImageF64::new(3, 2)).is_err());
    }

    #[test]
    fn magnitude_only_and_phase_only_split_the_sample() {
        let buf = sample(3, 3);
        let m = magnitude_only(&buf);
        let p = phase_only(&buf);
        for ((a, b), orig) in m.as_slice().iter().zip(p.as_slice()).zip(buf.as_slice()) {
            assert!((*a * *b - *orig).norm() < 1e-12);
        }
    }
}
