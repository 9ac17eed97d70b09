//! Serializable reports produced by the experiment pipelines.
//!
//! `PipelineReport` is the entry point; it carries the forward-transform
//! summary, per-stage timings and the stage specific to the experiment that
//! ran.

pub mod pipeline;
pub mod stages;
pub mod timing;

pub use pipeline::PipelineReport;
pub use stages::{
    EdgeStage, InputDescriptor, MotionStage, PeakRemovalStage, PhaseStage, SpectrumStage,
};
pub use timing::{StageTiming, TimingBreakdown};
