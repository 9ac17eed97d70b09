//! Periodic-noise suppression by removing isolated spectral peaks.
//!
//! Periodic interference shows up as bright off-DC spikes. Each iteration
//! finds the strongest sample inside the search window, replaces it with the
//! mean of its in-bounds 8-neighbours and excludes it from later searches.
//! Conjugate-symmetric pairs therefore take two iterations.
use super::mask::FilterMask;
use crate::error::Result;
use crate::spectrum::Spectrum;
use log::debug;
use num_complex::Complex64;
use serde::Serialize;

/// One suppressed peak.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedPeak {
    pub row: usize,
    pub col: usize,
    /// Magnitude before suppression.
    pub magnitude: f64,
}

/// Suppress up to `iterations` peaks of `spectrum` inside `search`.
///
/// Stops early once no positive magnitude remains in the window.
pub fn remove_peaks(
    spectrum: &mut Spectrum,
    search: &FilterMask,
    iterations: usize,
) -> Result<Vec<RemovedPeak>> {
    spectrum.ensure_same_dims(search.dims())?;
    let mut weighted: Vec<f64> = spectrum
        .as_slice()
        .iter()
        .zip(search.weights())
        .map(|(z, &w)| z.norm() * w)
        .collect();

    let cols = spectrum.cols();
    let mut removed = Vec::with_capacity(iterations);
    for iteration in 0..iterations {
        let Some((index, peak)) = argmax(&weighted) else {
            break;
        };
        if peak <= 0.0 {
            debug!("remove_peaks: window exhausted after {iteration} iterations");
            break;
        }
        let (row, col) = (index / cols, index % cols);
        weighted[index] = 0.0;
        let magnitude = spectrum[(row, col)].norm();
        spectrum[(row, col)] = neighbour_mean(spectrum, row, col);
        debug!("remove_peaks: #{iteration} at ({row}, {col}) |z|={magnitude:.3}");
        removed.push(RemovedPeak {
            row,
            col,
            magnitude,
        });
    }
    Ok(removed)
}

fn argmax(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
}

/// Mean of the in-bounds 8-neighbourhood of `(row, col)`, centre excluded.
pub fn neighbour_mean(spectrum: &Spectrum, row: usize, col: usize) -> Complex64 {
    let mut sum = Complex64::new(0.0, 0.0);
    let mut count = 0usize;
    for dr in -1isize..=1 {
        for dc in -1isize..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let (r, c) = (row as isize + dr, col as isize + dc);
            if r < 0 || c < 0 {
                continue;
            }
            if let Some(z) = spectrum.get(r as usize, c as usize) {
                sum += z;
                count += 1;
            }
        }
    }
    if count == 0 {
        sum
    } else {
        sum / count as f64
    }
}
