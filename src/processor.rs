//! Frame-level orchestration around the expander.
//!
//! [`CSpaceProcessor`] owns the LUT (built once), the expander with its worker
//! pool, and the configured speckle filter. For each frame it:
//!
//! 1. copies the input and marks rows below `ymax` as unmeasured (NaN);
//! 2. swaps NaN for the filter sentinel, runs the filter, and swaps NaN back
//!    (also for anything the filter drove negative);
//! 3. runs the row and column expansion passes;
//! 4. overwrites rows from `ymax` down with [`TOO_CLOSE`](crate::TOO_CLOSE).
//!
//! The bottom band is ignored on input but reported as blocked on output.
//!
//! ```no_run
//! use cspace_expander::{CSpaceParams, CSpaceProcessor, Frame};
//!
//! # fn main() -> Result<(), cspace_expander::CSpaceError> {
//! let params = CSpaceParams::default();
//! let processor = CSpaceProcessor::new(params)?;
//! let disp = Frame::nan(640, 480);
//! let cspace = processor.process(&disp)?;
//! assert_eq!(cspace.dims(), (640, 480));
//! # Ok(())
//! # }
//! ```
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{CSpaceReport, FrameStats, InputDescriptor, TimingBreakdown};
use crate::error::CSpaceError;
use crate::expand::CSpaceExpander;
use crate::filter::{self, sentinel, DisparityFilter};
use crate::image::Frame;
use crate::lut::GeometryLut;
use crate::params::CSpaceParams;
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

pub struct CSpaceProcessor {
    params: CSpaceParams,
    expander: CSpaceExpander,
    filter: Option<Box<dyn DisparityFilter>>,
}

impl CSpaceProcessor {
    /// Validate `params` and build the LUT, worker pool and filter.
    pub fn new(params: CSpaceParams) -> Result<Self, CSpaceError> {
        params.validate()?;
        let lut = GeometryLut::new(&params.image, params.safety_radius, params.y_factor)?;
        Self::with_lut(params, Arc::new(lut))
    }

    /// Build a processor around an existing LUT. The LUT must have been
    /// built from the same image parameters, radius and vertical factor.
    pub fn with_lut(params: CSpaceParams, lut: Arc<GeometryLut>) -> Result<Self, CSpaceError> {
        params.validate()?;
        if lut.params() != &params.image
            || lut.safety_radius() != params.safety_radius
            || lut.y_factor() != params.y_factor
        {
            return Err(CSpaceError::invalid(
                "lookup table was built for a different camera configuration",
            ));
        }
        let expander = CSpaceExpander::new(lut, params.num_threads)?;
        let filter = filter::from_params(&params.filter);
        Ok(Self {
            params,
            expander,
            filter,
        })
    }

    pub fn params(&self) -> &CSpaceParams {
        &self.params
    }

    pub fn lut(&self) -> &GeometryLut {
        self.expander.lut()
    }

    pub fn expander(&self) -> &CSpaceExpander {
        &self.expander
    }

    /// Process one disparity frame into a C-space frame.
    pub fn process(&self, disp: &Frame) -> Result<Frame, CSpaceError> {
        self.process_with_diagnostics(disp).map(|report| report.cspace)
    }

    /// Like [`process`](Self::process), but never fails: on error the
    /// problem is logged and a frame with no information (all NaN) of the
    /// configured size is returned.
    pub fn process_or_unknown(&self, disp: &Frame) -> Frame {
        match self.process(disp) {
            Ok(cspace) => cspace,
            Err(err) => {
                warn!("CSpaceProcessor: frame dropped: {err}");
                Frame::nan(self.params.image.width, self.params.image.height)
            }
        }
    }

    /// Band masking and filtering only (steps 1 and 2).
    pub fn prepare_input(&self, disp: &Frame) -> Result<Frame, CSpaceError> {
        self.check_dims(disp)?;
        let mut work = disp.clone();
        self.mask_bottom_band(&mut work);
        Ok(self.apply_filter(work))
    }

    /// Process one frame and report per-stage timings and cell counts.
    pub fn process_with_diagnostics(&self, disp: &Frame) -> Result<CSpaceReport, CSpaceError> {
        self.check_dims(disp)?;
        let lut = self.expander.lut();
        let usable = |frame: &Frame| {
            frame
                .data
                .iter()
                .filter(|&&v| lut.disparity_index(v).is_some())
                .count()
        };
        debug!(
            "CSpaceProcessor::process start w={} h={} ndisp={} threads={}",
            disp.w,
            disp.h,
            lut.ndisp(),
            self.expander.num_threads()
        );
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let valid_input = usable(disp);

        let mut work = disp.clone();
        timings.time("mask", || self.mask_bottom_band(&mut work));
        let before_filter = usable(&work);
        let work = timings.time("filter", || self.apply_filter(work));
        let removed_by_filter = before_filter.saturating_sub(usable(&work));

        let rows = timings.time("expand_rows", || self.expander.expand_rows(&work))?;
        let mut cspace = timings.time("expand_cols", || self.expander.expand_columns(&rows))?;
        timings.time("blocked_band", || {
            cspace.fill_rows_from(self.params.image.ymax, crate::TOO_CLOSE)
        });
        timings.total_ms = elapsed_ms(total_start);

        let threshold = self.params.blocked_threshold;
        let stats = FrameStats {
            valid_input,
            removed_by_filter,
            valid_output: cspace.count_where(|v| !v.is_nan()),
            blocked_cells: cspace.count_where(|v| v >= threshold),
        };
        debug!(
            "CSpaceProcessor::process done valid_in={} filtered={} blocked={} total_ms={:.3}",
            stats.valid_input, stats.removed_by_filter, stats.blocked_cells, timings.total_ms
        );

        Ok(CSpaceReport {
            cspace,
            input: InputDescriptor {
                width: disp.w,
                height: disp.h,
                ndisp: lut.ndisp(),
                ymax: self.params.image.ymax,
                safety_radius: self.params.safety_radius,
                y_factor: self.params.y_factor,
                filter: self.filter.as_ref().map(|f| f.name()),
                threads: self.expander.num_threads(),
            },
            stats,
            timings,
        })
    }

    fn check_dims(&self, disp: &Frame) -> Result<(), CSpaceError> {
        let expected = (self.params.image.width, self.params.image.height);
        if disp.dims() != expected {
            return Err(CSpaceError::DimensionMismatch {
                expected,
                found: disp.dims(),
            });
        }
        Ok(())
    }

    /// Rows strictly below `ymax` carry no usable measurement.
    fn mask_bottom_band(&self, frame: &mut Frame) {
        frame.fill_rows_from(self.params.image.ymax.saturating_add(1), f32::NAN);
    }

    fn apply_filter(&self, mut frame: Frame) -> Frame {
        let mask = sentinel::mask_invalid(&mut frame);
        let mut filtered = match &self.filter {
            Some(f) => f.denoise(&frame),
            None => frame,
        };
        sentinel::restore_invalid(&mut filtered, &mask);
        filtered
    }
}

impl std::fmt::Debug for CSpaceProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CSpaceProcessor")
            .field("params", &self.params)
            .field("expander", &self.expander)
            .field("filter", &self.filter.as_ref().map(|f| f.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FilterParams, ImageParams};

    fn params(filter: FilterParams) -> CSpaceParams {
        CSpaceParams {
            image: ImageParams {
                width: 16,
                height: 12,
                ndisp: 24,
                f: 16.0,
                f_disp: 32.0,
                baseline: 0.3,
                ymax: 9,
            },
            safety_radius: 0.25,
            y_factor: 1.0,
            filter,
            num_threads: 2,
            blocked_threshold: crate::TOO_CLOSE,
        }
    }

    #[test]
    fn prepare_without_filter_keeps_valid_cells_bit_exact() {
        let processor = CSpaceProcessor::new(params(FilterParams::disabled())).unwrap();
        let mut disp = Frame::nan(16, 12);
        for (i, v) in disp.data.iter_mut().enumerate().filter(|(i, _)| i % 3 == 0) {
            *v = (i % 23) as f32 + 0.125;
        }
        let prepared = processor.prepare_input(&disp).unwrap();
        for y in 0..=9 {
            for x in 0..16 {
                let (a, b) = (disp.get(x, y), prepared.get(x, y));
                if a.is_nan() {
                    assert!(b.is_nan());
                } else {
                    assert_eq!(a.to_bits(), b.to_bits());
                }
            }
        }
        for y in 10..12 {
            assert!(prepared.row(y).iter().all(|v| v.is_nan()));
        }
    }

    #[test]
    fn negative_input_becomes_missing() {
        let processor = CSpaceProcessor::new(params(FilterParams::disabled())).unwrap();
        let mut disp = Frame::nan(16, 12);
        disp.set(1, 1, -4.0);
        let prepared = processor.prepare_input(&disp).unwrap();
        assert!(prepared.get(1, 1).is_nan());
    }

    #[test]
    fn opening_drops_isolated_pixel_before_expansion() {
        let processor = CSpaceProcessor::new(params(FilterParams::default())).unwrap();
        let mut disp = Frame::nan(16, 12);
        disp.set(8, 4, 10.0);
        let report = processor.process_with_diagnostics(&disp).unwrap();
        assert_eq!(report.stats.valid_input, 1);
        assert_eq!(report.stats.removed_by_filter, 1);
        for y in 0..9 {
            assert!(report.cspace.row(y).iter().all(|v| v.is_nan()), "row {y}");
        }
        assert_eq!(report.stats.blocked_cells, 16 * 3);
        assert_eq!(report.input.filter, Some("opening"));
    }

    #[test]
    fn mismatched_frame_is_rejected_or_blank() {
        let processor = CSpaceProcessor::new(params(FilterParams::disabled())).unwrap();
        let disp = Frame::nan(8, 8);
        assert!(matches!(
            processor.process(&disp),
            Err(CSpaceError::DimensionMismatch { .. })
        ));
        let blank = processor.process_or_unknown(&disp);
        assert_eq!(blank.dims(), (16, 12));
        assert!(blank.data.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn foreign_lut_is_rejected() {
        let p = params(FilterParams::disabled());
        let other = GeometryLut::new(&p.image, 0.5, 1.0).unwrap();
        assert!(CSpaceProcessor::with_lut(p.clone(), Arc::new(other)).is_err());
        let same = GeometryLut::new(&p.image, p.safety_radius, p.y_factor).unwrap();
        assert!(CSpaceProcessor::with_lut(p, Arc::new(same)).is_ok());
    }

    #[test]
    fn timings_cover_every_stage() {
        let processor = CSpaceProcessor::new(params(FilterParams::disabled())).unwrap();
        let report = processor
            .process_with_diagnostics(&Frame::nan(16, 12))
            .unwrap();
        for label in ["mask", "filter", "expand_rows", "expand_cols", "blocked_band"] {
            assert!(report.timings.stage_ms(label).is_some(), "{label}");
        }
    }
}
