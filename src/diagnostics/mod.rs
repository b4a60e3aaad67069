//! Per-frame diagnostics returned alongside the C-space frame.

pub mod report;
pub mod timing;

pub use report::{CSpaceReport, FrameStats, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
