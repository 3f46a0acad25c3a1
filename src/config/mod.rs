//! JSON configuration for the `hough_lines` tool.
use crate::edges::CannyParams;
use crate::hough::HoughParams;
use crate::pipeline::{BlurParams, LineDetectorParams};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct LineToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub blur: BlurParams,
    #[serde(default)]
    pub canny: CannyParams,
    #[serde(default)]
    pub hough: HoughParams,
    pub output: LineOutputConfig,
}

impl LineToolConfig {
    pub fn detector_params(&self) -> LineDetectorParams {
        LineDetectorParams {
            blur: self.blur,
            canny: self.canny,
            hough: self.hough,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LineOutputConfig {
    #[serde(default)]
    pub gradient_image: Option<PathBuf>,
    #[serde(default)]
    pub edges_image: Option<PathBuf>,
    #[serde(default)]
    pub accumulator_image: Option<PathBuf>,
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
    pub result_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<LineToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<LineToolConfig, serde_json::Error> {
    serde_json::from_str(json)
}
