use super::timing::TimingBreakdown;
use crate::image::Frame;
use serde::Serialize;

/// Result of [`CSpaceProcessor::process_with_diagnostics`](crate::CSpaceProcessor).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CSpaceReport {
    #[serde(skip)]
    pub cspace: Frame,
    pub input: InputDescriptor,
    pub stats: FrameStats,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub ndisp: usize,
    pub ymax: usize,
    pub safety_radius: f64,
    pub y_factor: f64,
    pub filter: Option<&'static str>,
    pub threads: usize,
}

/// Cell counts gathered while processing one frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameStats {
    /// Input cells carrying a usable disparity, before band masking.
    pub valid_input: usize,
    /// Cells usable after band masking but invalidated by the filter.
    pub removed_by_filter: usize,
    /// Output cells holding any value (not NaN).
    pub valid_output: usize,
    /// Output cells at or above the blocked threshold.
    pub blocked_cells: usize,
}
