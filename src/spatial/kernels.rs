use crate::error::{Result, SpectrumError};
use serde::{Deserialize, Serialize};

/// Dense 2D filter kernel, row-major, anchored at `(rows/2, cols/2)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

type Kernel3 = [[f64; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const PREWITT_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0], [-1.0, 0.0, 1.0]];
const PREWITT_KERNEL_Y: Kernel3 = [[-1.0, -1.0, -1.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0]];

const LAPLACIAN_KERNEL: Kernel3 = [[0.0, 1.0, 0.0], [1.0, -4.0, 1.0], [0.0, 1.0, 0.0]];

/// Integer 7×7 Gaussian approximation; weights sum to 140.
const GAUSSIAN_7: [[f64; 7]; 7] = [
    [1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 1.0],
    [1.0, 2.0, 2.0, 4.0, 2.0, 2.0, 1.0],
    [2.0, 2.0, 4.0, 8.0, 4.0, 2.0, 2.0],
    [2.0, 4.0, 8.0, 16.0, 8.0, 4.0, 2.0],
    [2.0, 2.0, 4.0, 8.0, 4.0, 2.0, 2.0],
    [1.0, 2.0, 2.0, 4.0, 2.0, 2.0, 1.0],
    [1.0, 1.0, 2.0, 2.0, 2.0, 1.0, 1.0],
];

/// Named kernels selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelKind {
    SobelX,
    SobelY,
    PrewittX,
    PrewittY,
    Laplacian,
    /// Normalised 7×7 Gaussian.
    Gaussian7,
}

impl KernelKind {
    pub fn build(self) -> Kernel {
        match self {
            KernelKind::SobelX => Kernel::from_3x3(&SOBEL_KERNEL_X),
            KernelKind::SobelY => Kernel::from_3x3(&SOBEL_KERNEL_Y),
            KernelKind::PrewittX => Kernel::from_3x3(&PREWITT_KERNEL_X),
            KernelKind::PrewittY => Kernel::from_3x3(&PREWITT_KERNEL_Y),
            KernelKind::Laplacian => Kernel::from_3x3(&LAPLACIAN_KERNEL),
            KernelKind::Gaussian7 => {
                let data: Vec<f64> = GAUSSIAN_7.iter().flatten().copied().collect();
                let sum: f64 = data.iter().sum();
                Kernel {
                    rows: 7,
                    cols: 7,
                    data: data.into_iter().map(|v| v / sum).collect(),
                }
            }
        }
    }
}

impl Kernel {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(SpectrumError::EmptyInput);
        }
        if data.len() != rows * cols {
            return Err(SpectrumError::LengthMismatch {
                expected: rows * cols,
                found: data.len(),
            });
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(SpectrumError::invalid("kernel", "weights must be finite"));
        }
        Ok(Self { rows, cols, data })
    }

    fn from_3x3(k: &Kernel3) -> Self {
        Self {
            rows: 3,
            cols: 3,
            data: k.iter().flatten().copied().collect(),
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

    /// Position of the kernel origin, `(row, col)`.
    #[inline]
    pub fn anchor(&self) -> (usize, usize) {
        (self.rows / 2, self.cols / 2)
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn weights(&self) -> &[f64] {
        &self.data
    }

    pub fn transposed(&self) -> Kernel {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.get(r, c));
            }
        }
        Kernel {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Rotate by 180°, turning correlation weights into convolution weights.
    pub fn flipped(&self) -> Kernel {
        Kernel {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().rev().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sobel_pair_is_transposed() {
        assert_eq!(KernelKind::SobelY.build().transposed(), KernelKind::SobelX.build());
    }

    #[test]
    fn flipped_negates_antisymmetric_kernels() {
        let k = KernelKind::PrewittX.build();
        let f = k.flipped();
        for (a, b) in k.weights().iter().zip(f.weights()) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn gaussian_is_normalised() {
        let k = KernelKind::Gaussian7.build();
        let sum: f64 = k.weights().iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(k.anchor(), (3, 3));
    }

    #[test]
    fn new_validates_shape() {
        assert!(Kernel::new(2, 2, vec![1.0; 3]).is_err());
        assert!(Kernel::new(0, 2, vec![]).is_err());
        assert!(Kernel::new(1, 2, vec![1.0, f64::NAN]).is_err());
        assert_eq!(Kernel::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap().anchor(), (0, 1));
    }
}
