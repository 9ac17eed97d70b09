use crate::diagnostics::{
    EdgeStage, InputDescriptor, MotionStage, PeakRemovalStage, PhaseStage, SpectrumStage,
    TimingBreakdown,
};
use serde::Serialize;

/// Trace of one experiment run, written next to the output images.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub experiment: String,
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub spectrum: SpectrumStage,
    /// File names of the images produced, in output order.
    pub outputs: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak_removal: Option<PeakRemovalStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<EdgeStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<PhaseStage>,
}

impl PipelineReport {
    pub fn new(experiment: impl Into<String>, input: InputDescriptor, spectrum: SpectrumStage) -> Self {
        Self {
            experiment: experiment.into(),
            input,
            timings: TimingBreakdown::default(),
            spectrum,
            outputs: Vec::new(),
            peak_removal: None,
            edges: None,
            motion: None,
            phase: None,
        }
    }

    /// One-line summary for logs and the tool's stdout.
    pub fn summary(&self) -> String {
        format!(
            "{} {}x{} -> {}x{} spectrum, {} outputs, {:.3} ms",
            self.experiment,
            self.input.width,
            self.input.height,
            self.spectrum.padded_cols,
            self.spectrum.padded_rows,
            self.outputs.len(),
            self.timings.total_ms
        )
    }
}
