//! Separable 2D FFT: pad to powers of two, optionally centre, transform rows
//! then columns, normalise.
//!
//! Centering uses the checkerboard trick: multiplying sample `(i, j)` by
//! `(-1)^(i+j)` before a forward pass moves DC to `(rows/2, cols/2)`; the
//! same flip after the inverse pass undoes it.
//!
//! Both normalisation conventions are symmetric, so `inverse(forward(x))`
//! reproduces the padded `x` up to rounding. Output is never cropped back to
//! the unpadded size; use [`ComplexBuffer::cropped`].
use super::buffer::{ComplexBuffer, Spectrum};
use super::fft1d::{fft_in_place, next_pow2, Direction};
use super::ops::shift;
use crate::error::{Result, SpectrumError};
use log::debug;
use serde::{Deserialize, Serialize};

/// Where the `1 / (rows · cols)` factor is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Forward pass unscaled, inverse divided by `rows · cols`.
    #[default]
    Inverse,
    /// Forward pass divided by `rows · cols`, inverse unscaled.
    Forward,
}

/// Options shared by forward and inverse calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Centre DC on the forward pass and un-centre on the inverse pass.
    pub shift: bool,
    pub normalization: Normalization,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            shift: true,
            normalization: Normalization::Inverse,
        }
    }
}

impl TransformOptions {
    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }
}

/// 2D transform engine configured once and reused for forward and inverse
/// calls, so both directions always agree on shift and normalisation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Transform2D {
    pub options: TransformOptions,
}

impl Transform2D {
    pub fn new(options: TransformOptions) -> Self {
        Self { options }
    }

    /// Image (spatial) → spectrum.
    pub fn forward(&self, source: &ComplexBuffer) -> Result<Spectrum> {
        self.transform(source, Direction::Forward)
    }

    /// Spectrum → image (padded size).
    pub fn inverse(&self, spectrum: &Spectrum) -> Result<ComplexBuffer> {
        self.transform(spectrum, Direction::Inverse)
    }

    /// Transform a copy of `source`, padded to power-of-two dimensions.
    pub fn transform(&self, source: &ComplexBuffer, direction: Direction) -> Result<ComplexBuffer> {
        if source.is_empty() {
            return Err(SpectrumError::EmptyInput);
        }
        let mut dest = source.padded_to_pow2();
        debug!(
            "Transform2D::{:?} {}x{} -> {}x{} shift={} norm={:?}",
            direction,
            source.rows(),
            source.cols(),
            dest.rows(),
            dest.cols(),
            self.options.shift,
            self.options.normalization
        );
        self.transform_in_place(&mut dest, direction);
        dest.ensure_finite()?;
        Ok(dest)
    }

    /// Transform a buffer whose dimensions are already powers of two.
    ///
    /// Panics if either dimension is not a power of two.
    pub fn transform_in_place(&self, buffer: &mut ComplexBuffer, direction: Direction) {
        let (rows, cols) = buffer.dims();
        assert!(
            rows == next_pow2(rows) && cols == next_pow2(cols),
            "Transform2D requires power-of-two dimensions, got {rows}x{cols}"
        );
        if direction == Direction::Forward && self.options.shift {
            shift(buffer);
        }

        transform_rows(buffer, direction);
        transform_columns(buffer, direction);

        let scaled_direction = match self.options.normalization {
            Normalization::Inverse => Direction::Inverse,
            Normalization::Forward => Direction::Forward,
        };
        if direction == scaled_direction {
            buffer.scale(1.0 / (rows * cols) as f64);
        }

        if direction == Direction::Inverse && self.options.shift {
            shift(buffer);
        }
    }
}

fn transform_rows(buffer: &mut ComplexBuffer, direction: Direction) {
    for r in 0..buffer.rows() {
        fft_in_place(buffer.row_mut(r), direction);
    }
}

fn transform_columns(buffer: &mut ComplexBuffer, direction: Direction) {
    let mut column = Vec::with_capacity(buffer.rows());
    for c in 0..buffer.cols() {
        buffer.read_column(c, &mut column);
        fft_in_place(&mut column, direction);
        buffer.write_column(c, &column);
    }
}
