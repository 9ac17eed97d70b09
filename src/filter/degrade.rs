//! Degradation modelling: multiply a transfer function `H(u, v)` straight
//! into a centred spectrum.
use crate::error::Result;
use crate::spectrum::Spectrum;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Frequency response evaluated at centred offsets `(u, v)` from DC, where
/// `u` runs along rows and `v` along columns.
pub trait TransferFunction {
    fn response(&self, u: f64, v: f64) -> Complex64;
}

impl<F> TransferFunction for F
where
    F: Fn(f64, f64) -> Complex64,
{
    fn response(&self, u: f64, v: f64) -> Complex64 {
        self(u, v)
    }
}

/// Uniform linear motion during exposure.
///
/// `H(u, v) = t / (π s) · sin(π s) · e^{-iπ s}` with `s = u·a + v·b`; `a` and
/// `b` are the displacement per unit of `t` along rows and columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionBlur {
    pub a: f64,
    pub b: f64,
    /// Exposure duration, also the DC gain.
    pub t: f64,
}

impl Default for MotionBlur {
    fn default() -> Self {
        Self {
            a: 0.1,
            b: 0.1,
            t: 1.0,
        }
    }
}

impl TransferFunction for MotionBlur {
    fn response(&self, u: f64, v: f64) -> Complex64 {
        let s = u * self.a + v * self.b;
        if s.abs() < 1e-12 {
            return Complex64::new(self.t, 0.0);
        }
        let ps = PI * s;
        let gain = self.t / ps * ps.sin();
        Complex64::from_polar(gain, -ps)
    }
}

/// Multiply `H(u, v)` into every sample of a centred spectrum.
pub fn degrade<H>(spectrum: &mut Spectrum, h: &H) -> Result<()>
where
    H: TransferFunction + ?Sized,
{
    let (rows, cols) = spectrum.dims();
    let (cr, cc) = ((rows / 2) as f64, (cols / 2) as f64);
    for r in 0..rows {
        let u = r as f64 - cr;
        for (c, z) in spectrum.row_mut(r).iter_mut().enumerate() {
            *z *= h.response(u, c as f64 - cc);
        }
    }
    spectrum.ensure_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::{ComplexBuffer, Transform2D};

    #[test]
    fn motion_blur_dc_gain_is_exposure() {
        let blur = MotionBlur {
            a: 0.05,
            b: 0.02,
            t: 2.5,
        };
        assert_eq!(blur.response(0.0, 0.0), Complex64::new(2.5, 0.0));
        // Zero of the sinc at s = 1.
        assert!(blur.response(20.0, 0.0).norm() < 1e-12);
        // Unit-magnitude phase ramp times the sinc envelope.
        let h = blur.response(3.0, 4.0);
        let s: f64 = 3.0 * 0.05 + 4.0 * 0.02;
        assert!((h.norm() - (2.5 * (PI * s).sin() / (PI * s)).abs()).abs() < 1e-12);
    }

    #[test]
    fn constant_image_is_scaled_by_dc_gain() {
        let t = Transform2D::default();
        let src = ComplexBuffer::from_fn(8, 8, |_, _| Complex64::new(4.0, 0.0));
        let mut spec = t.forward(&src).unwrap();
        degrade(&mut spec, &MotionBlur { a: 0.1, b: 0.1, t: 0.5 }).unwrap();
        let out = t.inverse(&spec).unwrap();
        for z in out.as_slice() {
            assert!((*z - Complex64::new(2.0, 0.0)).norm() < 1e-9);
        }
    }

    #[test]
    fn closures_are_transfer_functions() {
        let mut spec = ComplexBuffer::from_fn(4, 4, |_, _| Complex64::new(1.0, 0.0));
        let h = |u: f64, v: f64| Complex64::new(u, v);
        degrade(&mut spec, &h).unwrap();
        assert_eq!(spec[(0, 0)], Complex64::new(-2.0, -2.0));
        assert_eq!(spec[(3, 2)], Complex64::new(1.0, 0.0));
    }

    #[test]
    fn non_finite_response_is_reported() {
        let mut spec = ComplexBuffer::from_fn(2, 2, |_, _| Complex64::new(1.0, 0.0));
        let h = |_: f64, _: f64| Complex64::new(f64::NAN, 0.0);
        assert!(degrade(&mut spec, &h).is_err());
    }
}
