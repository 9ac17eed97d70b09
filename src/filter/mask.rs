use crate::error::{Result, SpectrumError};
use crate::spectrum::Spectrum;
use serde::{Deserialize, Serialize};

/// Whether a mask keeps or rejects the selected frequencies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    #[default]
    Pass,
    Stop,
}

/// Real-valued weights multiplied into a spectrum of the same shape.
///
/// Radii are measured in the centred frame: DC sits at `(rows/2, cols/2)`,
/// which is where a shifted forward transform puts it.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterMask {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl FilterMask {
    /// Build a mask by evaluating `f(row, col)`.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Ideal circular band: 1 for `inner <= d <= outer` (pass), inverted for
    /// stop.
    pub fn band(rows: usize, cols: usize, inner: f64, outer: f64, kind: BandKind) -> Result<Self> {
        check_radius("inner", inner)?;
        check_radius("outer", outer)?;
        if inner > outer {
            return Err(SpectrumError::invalid(
                "inner",
                format!("{inner} exceeds outer radius {outer}"),
            ));
        }
        Ok(Self::from_fn(rows, cols, |r, c| {
            let d = centre_distance(rows, cols, r, c);
            let inside = d >= inner && d <= outer;
            match (kind, inside) {
                (BandKind::Pass, true) | (BandKind::Stop, false) => 1.0,
                _ => 0.0,
            }
        }))
    }

    /// Gaussian taper `exp(-d² / 2σ²)` (pass = low-pass, stop = high-pass).
    pub fn gaussian(rows: usize, cols: usize, sigma: f64, kind: BandKind) -> Result<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(SpectrumError::invalid("sigma", format!("{sigma} must be positive")));
        }
        let denom = 2.0 * sigma * sigma;
        Ok(Self::from_fn(rows, cols, |r, c| {
            let d = centre_distance(rows, cols, r, c);
            let g = (-d * d / denom).exp();
            match kind {
                BandKind::Pass => g,
                BandKind::Stop => 1.0 - g,
            }
        }))
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    pub fn weights(&self) -> &[f64] {
        &self.data
    }
}

fn check_radius(name: &'static str, radius: f64) -> Result<()> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(())
    } else {
        Err(SpectrumError::invalid(name, format!("{radius} must be >= 0")))
    }
}

/// Euclidean distance of `(row, col)` from the centred DC position.
#[inline]
pub fn centre_distance(rows: usize, cols: usize, row: usize, col: usize) -> f64 {
    let dr = row as f64 - (rows / 2) as f64;
    let dc = col as f64 - (cols / 2) as f64;
    (dr * dr + dc * dc).sqrt()
}

/// Multiply `spectrum` element-wise by `mask`. Shapes must match exactly.
pub fn apply_mask(spectrum: &mut Spectrum, mask: &FilterMask) -> Result<()> {
    spectrum.ensure_same_dims(mask.dims())?;
    for (z, &m) in spectrum.as_mut_slice().iter_mut().zip(&mask.data) {
        *z *= m;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn band_pass_keeps_inside_radius_only() {
        let radius = 3.0;
        let mask = FilterMask::band(16, 16, 0.0, radius, BandKind::Pass).unwrap();
        let original = Spectrum::from_fn(16, 16, |r, c| Complex64::new(r as f64 + 1.0, c as f64 - 7.5));
        let mut filtered = original.clone();
        apply_mask(&mut filtered, &mask).unwrap();
        for (r, c, z) in filtered.indexed() {
            if centre_distance(16, 16, r, c) > radius {
                assert_eq!(z, Complex64::new(0.0, 0.0), "({r}, {c}) should be rejected");
            } else {
                assert_eq!(z, original[(r, c)], "({r}, {c}) should pass unchanged");
            }
        }
    }

    #[test]
    fn band_stop_is_complement() {
        let pass = FilterMask::band(8, 8, 1.0, 2.5, BandKind::Pass).unwrap();
        let stop = FilterMask::band(8, 8, 1.0, 2.5, BandKind::Stop).unwrap();
        for (p, s) in pass.weights().iter().zip(stop.weights()) {
            assert_eq!(p + s, 1.0);
        }
        assert_eq!(pass.get(4, 4), Some(0.0));
        assert_eq!(pass.get(4, 6), Some(1.0));
    }

    #[test]
    fn mismatched_mask_is_rejected() {
        let mask = FilterMask::band(8, 8, 0.0, 2.0, BandKind::Pass).unwrap();
        let mut spectrum = Spectrum::new(8, 16);
        let err = apply_mask(&mut spectrum, &mask).unwrap_err();
        assert_eq!(
            err,
            SpectrumError::DimensionMismatch {
                expected: (8, 16),
                found: (8, 8)
            }
        );
    }

    #[test]
    fn invalid_radii_are_rejected() {
        assert!(FilterMask::band(4, 4, 3.0, 1.0, BandKind::Pass).is_err());
        assert!(FilterMask::band(4, 4, -1.0, 1.0, BandKind::Pass).is_err());
        assert!(FilterMask::band(4, 4, 0.0, f64::NAN, BandKind::Pass).is_err());
        assert!(FilterMask::gaussian(4, 4, 0.0, BandKind::Pass).is_err());
    }

    #[test]
    fn gaussian_tapers_from_centre() {
        let mask = FilterMask::gaussian(16, 16, 2.0, BandKind::Pass).unwrap();
        assert_eq!(mask.get(8, 8), Some(1.0));
        let near = mask.get(8, 9).unwrap();
        let far = mask.get(8, 14).unwrap();
        assert!(near < 1.0 && far < near && far > 0.0);
        let high = FilterMask::gaussian(16, 16, 2.0, BandKind::Stop).unwrap();
        assert_eq!(high.get(8, 8), Some(0.0));
    }
}
