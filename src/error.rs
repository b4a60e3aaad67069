//! Error type shared by the LUT, the expander and the processor.
//!
//! Every variant is a precondition violation for the current call. Degenerate
//! geometry and missing measurements are handled in-band and never surface
//! here.

/// Image axis a coordinate refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Pixel column (`x`).
    Column,
    /// Pixel row (`y`).
    Row,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Column => f.write_str("column"),
            Axis::Row => f.write_str("row"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum CSpaceError {
    /// Configuration rejected before any table or buffer was built.
    InvalidParams { reason: String },
    /// Frame size differs from the size the LUT was built for.
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    /// Disparity index outside `[1, ndisp)`.
    DisparityOutOfRange { disparity: i64, ndisp: usize },
    /// Pixel coordinate outside the configured image.
    CoordinateOutOfRange { axis: Axis, index: usize, len: usize },
    /// The worker pool could not be created.
    ThreadPool { reason: String },
}

impl CSpaceError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        CSpaceError::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for CSpaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CSpaceError::InvalidParams { reason } => write!(f, "invalid parameters: {reason}"),
            CSpaceError::DimensionMismatch { expected, found } => write!(
                f,
                "frame is {}x{} but the lookup table was built for {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            CSpaceError::DisparityOutOfRange { disparity, ndisp } => write!(
                f,
                "disparity {disparity} outside the valid range [1, {ndisp})"
            ),
            CSpaceError::CoordinateOutOfRange { axis, index, len } => {
                write!(f, "{axis} {index} outside [0, {len})")
            }
            CSpaceError::ThreadPool { reason } => {
                write!(f, "failed to build worker pool: {reason}")
            }
        }
    }
}

impl std::error::Error for CSpaceError {}
