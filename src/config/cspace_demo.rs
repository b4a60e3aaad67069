use crate::params::CSpaceParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CSpaceToolConfig {
    pub input: PathBuf,
    /// Raw pixel value per disparity unit (e.g. 256 for 16-bit KITTI maps).
    #[serde(default = "default_disparity_scale")]
    pub disparity_scale: f32,
    /// Processing parameters. Width and height are taken from the image.
    #[serde(default)]
    pub params: CSpaceParams,
    pub output: CSpaceOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CSpaceOutputConfig {
    pub cspace_image: PathBuf,
    pub report_json: Option<PathBuf>,
}

fn default_disparity_scale() -> f32 {
    1.0
}

pub fn load_config(path: &Path) -> Result<CSpaceToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(data: &str) -> Result<CSpaceToolConfig, serde_json::Error> {
    serde_json::from_str(data)
}
