use crate::image::io::load_grayscale_f64;
use crate::image::ImageF64;
use crate::pipeline::{Experiment, Preprocess};
use crate::spectrum::TransformOptions;
use crate::synthetic;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `spectrum_tool` binary.
#[derive(Debug, Deserialize)]
pub struct SpectrumToolConfig {
    pub input: InputConfig,
    #[serde(default)]
    pub transform: TransformOptions,
    #[serde(default)]
    pub experiment: Experiment,
    #[serde(default)]
    pub preprocess: Preprocess,
    pub output: OutputConfig,
}

/// Image source: a file on disk or a generated pattern.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputConfig {
    Path(PathBuf),
    Square { size: usize, side: usize },
    Checkerboard { width: usize, height: usize, cell: usize },
}

impl InputConfig {
    pub fn load(&self) -> Result<ImageF64, String> {
        let gray = match self {
            InputConfig::Path(path) => return load_grayscale_f64(path),
            InputConfig::Square { size, side } => synthetic::centred_square(*size, *side),
            InputConfig::Checkerboard {
                width,
                height,
                cell,
            } => synthetic::checkerboard(*width, *height, *cell),
        };
        Ok(ImageF64::from_u8(gray.as_view()))
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one PNG per output image.
    pub dir: PathBuf,
    /// Report file name inside `dir`.
    #[serde(default = "default_report_name")]
    pub report: String,
    /// Also write the prepared input when preprocessing changed it.
    #[serde(default)]
    pub save_input: bool,
}

fn default_report_name() -> String {
    "report.json".to_string()
}

pub fn load_config(path: &Path) -> Result<SpectrumToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<SpectrumToolConfig, serde_json::Error> {
    serde_json::from_str(json)
}
