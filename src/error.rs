//! Error type shared by the transform engine and the frequency filters.

/// Reasons a spectral operation can refuse its input or fail mid-way.
#[derive(Clone, Debug, PartialEq)]
pub enum SpectrumError {
    /// Zero rows or zero columns.
    EmptyInput,
    /// Two buffers that must share a shape do not.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Raw sample count does not match `rows * cols`.
    LengthMismatch { expected: usize, found: usize },
    /// A NaN or infinity appeared at `(row, col)`.
    NonFinite { row: usize, col: usize },
    /// A caller-supplied parameter is out of range.
    InvalidParameter {
        name: &'static str,
        reason: String,
    },
    /// Affine matrix has no inverse.
    SingularTransform,
}

impl SpectrumError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SpectrumError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for SpectrumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectrumError::EmptyInput => write!(f, "input has zero rows or columns"),
            SpectrumError::DimensionMismatch { expected, found } => write!(
                f,
                "dimension mismatch (expected {}x{}, found {}x{})",
                expected.0, expected.1, found.0, found.1
            ),
            SpectrumError::LengthMismatch { expected, found } => {
                write!(f, "sample count mismatch ({found} != {expected})")
            }
            SpectrumError::NonFinite { row, col } => {
                write!(f, "non-finite sample at row {row}, col {col}")
            }
            SpectrumError::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter `{name}`: {reason}")
            }
            SpectrumError::SingularTransform => write!(f, "transform matrix is singular"),
        }
    }
}

impl std::error::Error for SpectrumError {}

pub type Result<T> = std::result::Result<T, SpectrumError>;
