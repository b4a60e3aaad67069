//! Speckle pre-filters applied to disparity frames before expansion.
//!
//! Filters operate on frames that contain no NaN: the processor swaps NaN for
//! [`sentinel::INVALID_SENTINEL`] first and swaps it back afterwards. A filter
//! must preserve frame dimensions and must not produce values below the
//! sentinel.

pub mod median;
pub mod morphology;
pub mod sentinel;

use crate::image::Frame;
use crate::params::{FilterKind, FilterParams};
use log::warn;

pub use median::MedianBlur;
pub use morphology::{MorphOpening, StructuringElement};

/// Denoising stage run between masking and expansion.
pub trait DisparityFilter: Send + Sync {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Filter `src` into a new frame of the same size.
    fn denoise(&self, src: &Frame) -> Frame;
}

/// Build the filter selected by `params`.
///
/// Returns `None` when filtering is disabled. An unrecognized selection is
/// treated as disabled and logged.
pub fn from_params(params: &FilterParams) -> Option<Box<dyn DisparityFilter>> {
    match &params.kind {
        FilterKind::None => None,
        FilterKind::Median => Some(Box::new(MedianBlur::new(params.median_kernel))),
        FilterKind::Opening => Some(Box::new(MorphOpening::new(
            params.morph_shape,
            params.morph_size,
        ))),
        FilterKind::Unrecognized(name) => {
            warn!("unrecognized filter selection {name:?}; no filter applied");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MorphShape;

    #[test]
    fn builds_selected_filter() {
        let median = from_params(&FilterParams {
            kind: FilterKind::Median,
            ..Default::default()
        });
        assert_eq!(median.map(|f| f.name()), Some("median"));

        let opening = from_params(&FilterParams {
            kind: FilterKind::Opening,
            morph_shape: MorphShape::Cross,
            ..Default::default()
        });
        assert_eq!(opening.map(|f| f.name()), Some("opening"));
    }

    #[test]
    fn disabled_and_unknown_selections_skip_filtering() {
        assert!(from_params(&FilterParams::disabled()).is_none());
        let unknown = FilterParams {
            kind: FilterKind::Unrecognized("gaussian".into()),
            ..Default::default()
        };
        assert!(from_params(&unknown).is_none());
    }
}
