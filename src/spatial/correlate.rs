//! Direct spatial filtering: correlation, convolution and median.
//!
//! Correlation and convolution treat pixels outside the image as zero, which
//! is what the frequency-domain path reproduces on a zero-padded image.
//! The median filter clamps to the border instead.
//!
//! Complexity: O(W·H·K) for a kernel with K taps.
use super::kernels::Kernel;
use crate::error::{Result, SpectrumError};
use crate::image::{ImageF64, ImageView};

/// `out(x, y) = Σ k(r, c) · in(x + c − ac, y + r − ar)`, zero outside.
pub fn correlate(image: &ImageF64, kernel: &Kernel) -> ImageF64 {
    let (ar, ac) = kernel.anchor();
    let (w, h) = (image.w as isize, image.h as isize);
    ImageF64::from_fn(image.w, image.h, |x, y| {
        let mut acc = 0.0;
        for r in 0..kernel.rows() {
            let sy = y as isize + r as isize - ar as isize;
            if sy < 0 || sy >= h {
                continue;
            }
            let row = image.row(sy as usize);
            for c in 0..kernel.cols() {
                let sx = x as isize + c as isize - ac as isize;
                if sx < 0 || sx >= w {
                    continue;
                }
                acc += kernel.get(r, c) * row[sx as usize];
            }
        }
        acc
    })
}

/// Convolution: correlation with the kernel rotated by 180°.
pub fn convolve(image: &ImageF64, kernel: &Kernel) -> ImageF64 {
    correlate(image, &kernel.flipped())
}

/// Median of the `size × size` neighbourhood, border clamped. `size` must be
/// odd.
pub fn median(image: &ImageF64, size: usize) -> Result<ImageF64> {
    if size == 0 || size % 2 == 0 {
        return Err(SpectrumError::invalid("size", format!("{size} must be odd")));
    }
    if image.is_empty() {
        return Ok(image.clone());
    }
    let half = (size / 2) as isize;
    let (max_x, max_y) = (image.w as isize - 1, image.h as isize - 1);
    let mut window = Vec::with_capacity(size * size);
    Ok(ImageF64::from_fn(image.w, image.h, |x, y| {
        window.clear();
        for dy in -half..=half {
            let sy = (y as isize + dy).clamp(0, max_y) as usize;
            for dx in -half..=half {
                let sx = (x as isize + dx).clamp(0, max_x) as usize;
                window.push(image.get(sx, sy));
            }
        }
        let mid = window.len() / 2;
        let (_, m, _) = window.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        *m
    }))
}
