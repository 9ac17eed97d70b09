//! Affine resampling of real images.
//!
//! Transforms are 3×3 homogeneous matrices acting on `(x, y, 1)`. Warping is
//! inverse-mapped: every destination pixel is pulled back through the
//! inverse matrix and sampled from the source with the chosen interpolation.
//! Samples outside the source read as zero (bilinear/average) or clamp to
//! the border (nearest).
use crate::error::{Result, SpectrumError};
use crate::image::ImageF64;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

const EPS: f64 = 1e-12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
    /// Mean of the four surrounding pixels.
    Average,
}

pub fn scale(sx: f64, sy: f64) -> Matrix3<f64> {
    Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0)
}

/// Counter-clockwise rotation by `rad` about the origin.
pub fn rotate(rad: f64) -> Matrix3<f64> {
    let (s, c) = rad.sin_cos();
    Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0)
}

pub fn translate(tx: f64, ty: f64) -> Matrix3<f64> {
    Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0)
}

pub fn shear_x(hx: f64) -> Matrix3<f64> {
    Matrix3::new(1.0, 0.0, 0.0, hx, 1.0, 0.0, 0.0, 0.0, 1.0)
}

pub fn shear_y(hy: f64) -> Matrix3<f64> {
    Matrix3::new(1.0, hy, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0)
}

/// Rotation by `rad` about the image centre.
pub fn rotate_about_centre(rad: f64, w: usize, h: usize) -> Matrix3<f64> {
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
    translate(cx, cy) * rotate(rad) * translate(-cx, -cy)
}

/// Affine pre-transform as read from configuration.
///
/// Composed about the image centre in the order shear, scale, rotate,
/// then translate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffineParams {
    pub scale: [f64; 2],
    pub rotate_deg: f64,
    pub shear: [f64; 2],
    pub translate: [f64; 2],
    pub interpolation: Interpolation,
    /// Output size; defaults to the input size.
    pub output_size: Option<[usize; 2]>,
}

impl Default for AffineParams {
    fn default() -> Self {
        Self {
            scale: [1.0, 1.0],
            rotate_deg: 0.0,
            shear: [0.0, 0.0],
            translate: [0.0, 0.0],
            interpolation: Interpolation::default(),
            output_size: None,
        }
    }
}

impl AffineParams {
    pub fn matrix(&self, w: usize, h: usize) -> Matrix3<f64> {
        let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);
        translate(self.translate[0], self.translate[1])
            * translate(cx, cy)
            * rotate(self.rotate_deg.to_radians())
            * scale(self.scale[0], self.scale[1])
            * shear_y(self.shear[0])
            * shear_x(self.shear[1])
            * translate(-cx, -cy)
    }

    pub fn apply(&self, source: &ImageF64) -> Result<ImageF64> {
        let [out_w, out_h] = self.output_size.unwrap_or([source.w, source.h]);
        warp(
            source,
            &self.matrix(source.w, source.h),
            out_w,
            out_h,
            self.interpolation,
        )
    }
}

/// Resample `source` through `transform` into a `out_w × out_h` image.
pub fn warp(
    source: &ImageF64,
    transform: &Matrix3<f64>,
    out_w: usize,
    out_h: usize,
    interpolation: Interpolation,
) -> Result<ImageF64> {
    let inv = transform
        .try_inverse()
        .ok_or(SpectrumError::SingularTransform)?;
    let mut out = ImageF64::new(out_w, out_h);
    if source.w == 0 || source.h == 0 {
        return Ok(out);
    }
    for y in 0..out_h {
        for x in 0..out_w {
            let v = inv * Vector3::new(x as f64, y as f64, 1.0);
            if v[2].abs() <= EPS {
                continue;
            }
            let (sx, sy) = (v[0] / v[2], v[1] / v[2]);
            let value = match interpolation {
                Interpolation::Nearest => nearest(source, sx, sy),
                Interpolation::Bilinear => bilinear(source, sx, sy),
                Interpolation::Average => average(source, sx, sy),
            };
            out.set(x, y, value);
        }
    }
    Ok(out)
}

fn read_or_zero(img: &ImageF64, x: isize, y: isize) -> f64 {
    if x < 0 || y < 0 || x >= img.w as isize || y >= img.h as isize {
        0.0
    } else {
        img.get(x as usize, y as usize)
    }
}

fn nearest(img: &ImageF64, x: f64, y: f64) -> f64 {
    let nx = (x.round() as isize).clamp(0, img.w as isize - 1);
    let ny = (y.round() as isize).clamp(0, img.h as isize - 1);
    img.get(nx as usize, ny as usize)
}

fn bilinear(img: &ImageF64, x: f64, y: f64) -> f64 {
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let (ix, iy) = (x0 as isize, y0 as isize);
    let v00 = read_or_zero(img, ix, iy);
    let v10 = read_or_zero(img, ix + 1, iy);
    let v01 = read_or_zero(img, ix, iy + 1);
    let v11 = read_or_zero(img, ix + 1, iy + 1);
    v00 * (1.0 - fx) * (1.0 - fy) + v10 * fx * (1.0 - fy) + v01 * (1.0 - fx) * fy + v11 * fx * fy
}

fn average(img: &ImageF64, x: f64, y: f64) -> f64 {
    let (x0, y0) = (x.floor() as isize, y.floor() as isize);
    let (x1, y1) = (x.ceil() as isize, y.ceil() as isize);
    if x0 == x1 && y0 == y1 {
        return read_or_zero(img, x0, y0);
    }
    (read_or_zero(img, x0, y0)
        + read_or_zero(img, x1, y0)
        + read_or_zero(img, x0, y1)
        + read_or_zero(img, x1, y1))
        / 4.0
}
