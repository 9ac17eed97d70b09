//! Row-major grid of complex samples shared by every transform stage.
//!
//! A buffer has fixed `rows × cols` for its whole lifetime. Padding and
//! cropping always allocate a new buffer; content is anchored at the origin
//! (top-left) in both cases.
use crate::error::{Result, SpectrumError};
use crate::image::{ImageF64, ImageU8, ImageView};
use num_complex::Complex64;
use std::ops::{Index, IndexMut};

/// 2D array of `Complex64` samples.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexBuffer {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

/// A `ComplexBuffer` holding frequency-domain data. Same representation,
/// different role.
pub type Spectrum = ComplexBuffer;

impl ComplexBuffer {
    /// Zero-filled buffer.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![Complex64::new(0.0, 0.0); rows * cols],
        }
    }

    /// Take ownership of row-major samples.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<Complex64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(SpectrumError::LengthMismatch {
                expected: rows * cols,
                found: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a buffer by evaluating `f(row, col)` everywhere.
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> Complex64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    /// Promote a real image; imaginary parts are zero.
    pub fn from_real(image: &ImageF64) -> Self {
        Self::from_fn(image.h, image.w, |r, c| Complex64::new(image.get(c, r), 0.0))
    }

    /// The one conversion from 8-bit pixels to complex samples.
    pub fn from_gray(gray: ImageU8<'_>) -> Self {
        let mut data = Vec::with_capacity(gray.w * gray.h);
        for row in gray.rows() {
            data.extend(row.iter().map(|&px| Complex64::new(px as f64, 0.0)));
        }
        Self {
            rows: gray.h,
            cols: gray.w,
            data,
        }
    }

    /// A 1×n buffer from a sequence of samples.
    pub fn from_sequence(samples: &[Complex64]) -> Self {
        Self {
            rows: 1,
            cols: samples.len(),
            data: samples.to_vec(),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Bounds-checked read.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        (row < self.rows && col < self.cols).then(|| self.data[row * self.cols + col])
    }

    /// Bounds-checked mutable access.
    #[inline]
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Complex64> {
        if row < self.rows && col < self.cols {
            Some(&mut self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[Complex64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Complex64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn as_slice(&self) -> &[Complex64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [Complex64] {
        &mut self.data
    }

    /// Iterate `(row, col, sample)` in row-major order.
    pub fn indexed(&self) -> impl Iterator<Item = (usize, usize, Complex64)> + '_ {
        let cols = self.cols.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &z)| (i / cols, i % cols, z))
    }

    /// Copy of column `col` into `out` (cleared first).
    pub(crate) fn read_column(&self, col: usize, out: &mut Vec<Complex64>) {
        out.clear();
        out.extend((0..self.rows).map(|r| self.data[r * self.cols + col]));
    }

    pub(crate) fn write_column(&mut self, col: usize, values: &[Complex64]) {
        debug_assert_eq!(values.len(), self.rows);
        for (r, &v) in values.iter().enumerate() {
            self.data[r * self.cols + col] = v;
        }
    }

    /// New `rows × cols` buffer with `self` at the origin and zeros elsewhere.
    pub fn padded_to(&self, rows: usize, cols: usize) -> Result<ComplexBuffer> {
        if rows < self.rows || cols < self.cols {
            return Err(SpectrumError::invalid(
                "padded size",
                format!(
                    "{rows}x{cols} is smaller than the source {}x{}",
                    self.rows, self.cols
                ),
            ));
        }
        let mut out = ComplexBuffer::new(rows, cols);
        for r in 0..self.rows {
            out.row_mut(r)[..self.cols].copy_from_slice(self.row(r));
        }
        Ok(out)
    }

    /// Zero-pad both dimensions up to the next power of two. Always returns
    /// a new buffer, even when no padding is needed.
    pub fn padded_to_pow2(&self) -> ComplexBuffer {
        let rows = super::fft1d::next_pow2(self.rows);
        let cols = super::fft1d::next_pow2(self.cols);
        if (rows, cols) == self.dims() {
            return self.clone();
        }
        let mut out = ComplexBuffer::new(rows, cols);
        for r in 0..self.rows {
            out.row_mut(r)[..self.cols].copy_from_slice(self.row(r));
        }
        out
    }

    /// Top-left `rows × cols` window, e.g. to undo padding after an inverse
    /// transform.
    pub fn cropped(&self, rows: usize, cols: usize) -> Result<ComplexBuffer> {
        if rows > self.rows || cols > self.cols {
            return Err(SpectrumError::invalid(
                "crop size",
                format!(
                    "{rows}x{cols} exceeds the buffer {}x{}",
                    self.rows, self.cols
                ),
            ));
        }
        Ok(ComplexBuffer::from_fn(rows, cols, |r, c| self[(r, c)]))
    }

    /// Real parts as an image (`w = cols`, `h = rows`).
    pub fn real_part(&self) -> ImageF64 {
        self.map_real(|z| z.re)
    }

    /// Imaginary parts as an image.
    pub fn imag_part(&self) -> ImageF64 {
        self.map_real(|z| z.im)
    }

    /// Per-sample real projection into an image.
    pub fn map_real<F>(&self, f: F) -> ImageF64
    where
        F: Fn(Complex64) -> f64,
    {
        ImageF64::from_fn(self.cols, self.rows, |x, y| f(self[(y, x)]))
    }

    /// Multiply every sample by a real factor.
    pub fn scale(&mut self, factor: f64) {
        for z in &mut self.data {
            *z *= factor;
        }
    }

    /// First non-finite sample, as an error.
    pub fn ensure_finite(&self) -> Result<()> {
        match self
            .data
            .iter()
            .position(|z| !z.re.is_finite() || !z.im.is_finite())
        {
            Some(i) => Err(SpectrumError::NonFinite {
                row: i / self.cols,
                col: i % self.cols,
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn ensure_same_dims(&self, found: (usize, usize)) -> Result<()> {
        if self.dims() != found {
            return Err(SpectrumError::DimensionMismatch {
                expected: self.dims(),
                found,
            });
        }
        Ok(())
    }
}

impl Index<(usize, usize)> for ComplexBuffer {
    type Output = Complex64;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Complex64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} buffer",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for ComplexBuffer {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Complex64 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} buffer",
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}
