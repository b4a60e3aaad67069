#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod params;
pub mod processor;

// Building blocks, public for tools and tests.
pub mod config;
pub mod expand;
pub mod filter;
pub mod lut;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Axis, CSpaceError};
pub use crate::expand::CSpaceExpander;
pub use crate::image::{CSpaceFrame, DisparityFrame, Frame};
pub use crate::lut::GeometryLut;
pub use crate::params::{CSpaceParams, FilterKind, FilterParams, ImageParams, MorphShape};
pub use crate::processor::CSpaceProcessor;

pub use crate::diagnostics::{CSpaceReport, FrameStats};

/// Expanded disparity reported when the camera is inside an obstacle's
/// safety envelope, and for the blocked bottom band. Larger than any
/// realistic disparity threshold.
pub const TOO_CLOSE: f32 = 999.0;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use cspace_expander::prelude::*;
///
/// # fn main() -> Result<(), CSpaceError> {
/// let params = CSpaceParams::default();
/// let processor = CSpaceProcessor::new(params)?;
/// let disp = Frame::nan(640, 480);
/// let cspace = processor.process(&disp)?;
/// println!("blocked cells: {}", cspace.count_where(|v| v >= TOO_CLOSE));
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::{CSpaceError, CSpaceParams, CSpaceProcessor, Frame, GeometryLut, TOO_CLOSE};
}
