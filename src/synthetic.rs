//! Deterministic test patterns with well-known spectra.
use crate::image::{GrayImageU8, ImageF64};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Black `size × size` image with a centred white square of side `side`.
///
/// The spectrum is a separable 2D sinc whose lobe spacing shrinks as the
/// square grows.
pub fn centred_square(size: usize, side: usize) -> GrayImageU8 {
    let side = side.min(size);
    let lo = (size - side) / 2;
    let hi = lo + side;
    let data = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
                255
            } else {
                0
            }
        })
        .collect();
    GrayImageU8::new(size, size, data)
}

/// Checkerboard of `cell`-pixel squares alternating between 32 and 220.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> GrayImageU8 {
    let cell = cell.max(1);
    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let parity = (x / cell + y / cell) & 1;
            data[y * width + x] = if parity == 0 { 32 } else { 220 };
        }
    }
    GrayImageU8::new(width, height, data)
}

/// Horizontal sinusoidal grating `base + amplitude · sin(2π x / period)`.
///
/// Added to a natural image it produces the symmetric off-centre peaks that
/// periodic-noise removal targets.
pub fn grating(width: usize, height: usize, period: f64, amplitude: f64, base: f64) -> ImageF64 {
    ImageF64::from_fn(width, height, |x, _| {
        base + amplitude * (2.0 * PI * x as f64 / period).sin()
    })
}

/// 1D test signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// `[1, 0, 2, 0, 4, 0, 4, 0]` read as complex pairs: `1, 2, 4, 4`.
    #[default]
    Reference,
    Cosine,
    Sine,
    /// `cos + sin`.
    Sum,
}

impl Signal {
    /// Samples of the signal; `samples` and `periods` apply to the
    /// sampled functions only.
    pub fn samples(self, samples: usize, periods: f64) -> Vec<Complex64> {
        match self {
            Signal::Reference => reference_sequence(),
            Signal::Cosine => sampled(f64::cos, samples, periods),
            Signal::Sine => sampled(f64::sin, samples, periods),
            Signal::Sum => sampled(|x| x.cos() + x.sin(), samples, periods),
        }
    }
}

/// The classic hand-checkable sequence `1, 2, 4, 4`.
pub fn reference_sequence() -> Vec<Complex64> {
    [1.0, 2.0, 4.0, 4.0]
        .iter()
        .map(|&re| Complex64::new(re, 0.0))
        .collect()
}

/// `f(2π · periods · i / n)` for `i in 0..n`, imaginary part zero.
pub fn sampled<F>(f: F, n: usize, periods: f64) -> Vec<Complex64>
where
    F: Fn(f64) -> f64,
{
    (0..n)
        .map(|i| Complex64::new(f(2.0 * PI * periods * i as f64 / n as f64), 0.0))
        .collect()
}

/// Parse whitespace-separated real samples, e.g. a `rect.dat` pulse.
pub fn parse_sequence(text: &str) -> Result<Vec<Complex64>, String> {
    let values = text
        .split_whitespace()
        .enumerate()
        .map(|(i, tok)| {
            tok.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|re| Complex64::new(re, 0.0))
                .ok_or_else(|| format!("Invalid sample #{i}: '{tok}'"))
        })
        .collect::<Result<Vec<_>, String>>()?;
    if values.is_empty() {
        return Err("Sequence contains no samples".to_string());
    }
    Ok(values)
}

/// Read a sample file in the [`parse_sequence`] format.
pub fn load_sequence(path: &Path) -> Result<Vec<Complex64>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    parse_sequence(&text).map_err(|e| format!("{}: {e}", path.display()))
}
