use crate::filter::{KernelMode, MotionBlur, RemovedPeak};
use crate::spatial::KernelKind;
use crate::spectrum::Normalization;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
}

/// Forward transform of the pipeline input.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumStage {
    pub padded_rows: usize,
    pub padded_cols: usize,
    pub shifted: bool,
    pub normalization: Normalization,
    /// Raw magnitude range before log scaling, `[min, max]`.
    pub magnitude_range: [f64; 2],
    pub energy: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakRemovalStage {
    /// Radius around DC excluded from the search.
    pub exclusion_radius: f64,
    /// Whether the radius was derived from the strongest quadrant peak.
    pub auto_radius: bool,
    pub removed: Vec<RemovedPeak>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStage {
    pub kernel: KernelKind,
    pub mode: KernelMode,
    pub padded_rows: usize,
    pub padded_cols: usize,
    /// Largest deviation from the spatial-domain result.
    pub max_abs_difference: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionStage {
    pub blur: MotionBlur,
    /// Raw reconstruction range before display rescaling.
    pub output_range: [f64; 2],
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseStage {
    pub zero_phase_range: [f64; 2],
    pub unit_magnitude_range: [f64; 2],
}
