//! In-place radix-2 Cooley–Tukey FFT over a 1D complex sequence.
//!
//! Two named passes:
//! - `bit_reverse_permute`: swap scan that moves sample `i` to the index with
//!   the bits of `i` reversed (log2 n bits).
//! - `butterfly_passes`: stages of length 2, 4, …, n. Twiddles advance by the
//!   trigonometric recurrence so each stage costs one `sin` pair instead of
//!   one per butterfly.
//!
//! Neither direction scales the output; `Transform2D` owns normalisation.
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Transform direction. The sign is the exponent sign of the kernel
/// `exp(sign · 2πi·kn/N)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => -1.0,
            Direction::Inverse => 1.0,
        }
    }
}

/// Smallest power of two `>= n` (1 for `n <= 1`).
#[inline]
pub fn next_pow2(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

/// Transform `data` in place. Panics if the length is not a power of two;
/// callers pad first (see `ComplexBuffer::padded_to_pow2`).
pub fn fft_in_place(data: &mut [Complex64], direction: Direction) {
    let n = data.len();
    if n <= 1 {
        return;
    }
    assert!(
        n.is_power_of_two(),
        "radix-2 FFT requires a power-of-two length, got {n}"
    );
    bit_reverse_permute(data);
    butterfly_passes(data, direction.sign());
}

/// Reorder samples into bit-reversed index order.
pub fn bit_reverse_permute(data: &mut [Complex64]) {
    let n = data.len();
    let mut j = 0usize;
    for i in 1..n {
        // Increment `j` as a bit-reversed counter.
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            data.swap(i, j);
        }
    }
}

/// Combine bit-reversed samples stage by stage.
pub fn butterfly_passes(data: &mut [Complex64], sign: f64) {
    let n = data.len();
    let mut stage = 2usize;
    while stage <= n {
        let half = stage / 2;
        let theta = sign * 2.0 * PI / stage as f64;
        let s = (0.5 * theta).sin();
        // w ← w + w·(wpr + i·wpi) == w·exp(iθ), with wpr = cos θ - 1 written as -2sin²(θ/2).
        let step = Complex64::new(-2.0 * s * s, theta.sin());
        let mut w = Complex64::new(1.0, 0.0);
        for k in 0..half {
            let mut upper = k;
            while upper < n {
                let lower = upper + half;
                let t = w * data[lower];
                data[lower] = data[upper] - t;
                data[upper] += t;
                upper += stage;
            }
            w += w * step;
        }
        stage <<= 1;
    }
}
