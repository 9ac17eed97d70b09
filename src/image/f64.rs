//! Owned single-channel f64 image in row-major layout (stride == width).
//!
//! Holds real-valued results of the transform engine (magnitudes, phases,
//! reconstructions) and the inputs of the spatial filters. Values are in
//! pixel units, so an 8-bit image converts to `[0, 255]` without rescaling.
use super::{GrayImageU8, ImageU8, ImageView};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF64 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f64 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

impl ImageF64 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Build an image by evaluating `f(x, y)` at every pixel.
    pub fn from_fn<F>(w: usize, h: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// Promote an 8-bit view to f64 pixel values.
    pub fn from_u8(gray: ImageU8<'_>) -> Self {
        let mut out = Self::new(gray.w, gray.h);
        for y in 0..gray.h {
            let src = gray.row(y);
            let start = out.idx(0, y);
            for (dst, &px) in out.data[start..start + gray.w].iter_mut().zip(src) {
                *dst = px as f64;
            }
        }
        out
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f64) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Smallest and largest pixel values, `None` for an empty image.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Top-left `w × h` window. Panics if the window exceeds the image.
    pub fn cropped(&self, w: usize, h: usize) -> ImageF64 {
        assert!(
            w <= self.w && h <= self.h,
            "crop {w}x{h} exceeds image {}x{}",
            self.w,
            self.h
        );
        ImageF64::from_fn(w, h, |x, y| self.get(x, y))
    }

    /// Round and clamp to `[0, 255]`.
    pub fn to_gray_u8(&self) -> GrayImageU8 {
        let mut data = Vec::with_capacity(self.w * self.h);
        for y in 0..self.h {
            data.extend(
                self.row(y)
                    .iter()
                    .map(|&v| if v.is_nan() { 0 } else { v.round().clamp(0.0, 255.0) as u8 }),
            );
        }
        GrayImageU8::new(self.w, self.h, data)
    }
}

impl crate::image::traits::ImageView for ImageF64 {
    type Pixel = f64;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[f64] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[f64]> {
        (self.stride == self.w).then_some(&self.data[..self.w * self.h])
    }
}

impl crate::image::traits::ImageViewMut for ImageF64 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_gray_clamps_and_rounds() {
        let img = ImageF64::from_fn(4, 1, |x, _| [-3.0, 12.6, 300.0, f64::NAN][x]);
        assert_eq!(img.to_gray_u8().data(), &[0, 13, 255, 0]);
    }

    #[test]
    fn from_u8_respects_stride() {
        let raw = [1u8, 2, 99, 3, 4, 99];
        let view = ImageU8 {
            w: 2,
            h: 2,
            stride: 3,
            data: &raw,
        };
        let img = ImageF64::from_u8(view);
        assert_eq!(img.data, vec![1.0, 2.0, 3.0, 4.0]);
    }
}
