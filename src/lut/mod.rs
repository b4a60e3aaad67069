//! Per-pixel, per-disparity geometric lookup tables.
//!
//! [`GeometryLut`] answers, for an obstacle observed at a pixel with a given
//! disparity, which other pixels an obstacle at that depth could occupy if it
//! sat anywhere within the safety radius of the viewing ray, and which
//! disparity its near edge would have after the radius is subtracted.
//!
//! Construction costs `O(width·ndisp + height·ndisp)` trigonometric
//! evaluations. The tables are immutable afterwards, so one instance can be
//! shared (e.g. through `Arc`) by any number of expanders and threads.
//!
//! Queries take a disparity index in `[1, ndisp)`. Index 0 carries no depth
//! and is rejected, as are coordinates outside the configured frame.

pub mod geometry;
pub mod table;

use crate::error::{Axis, CSpaceError};
use crate::params::ImageParams;
use log::debug;
use nalgebra::DVector;

pub use geometry::NEAR_CLIP;
pub use table::SpanTable;

#[derive(Clone, Debug)]
pub struct GeometryLut {
    params: ImageParams,
    safety_radius: f64,
    y_factor: f64,
    columns: SpanTable,
    rows: SpanTable,
    dnew: DVector<f32>,
}

impl GeometryLut {
    /// Build all tables for one camera configuration.
    pub fn new(
        params: &ImageParams,
        safety_radius: f64,
        y_factor: f64,
    ) -> Result<Self, CSpaceError> {
        params.validate()?;
        if !(safety_radius.is_finite() && safety_radius > 0.0) {
            return Err(CSpaceError::invalid(format!(
                "safety radius must be finite and positive, got {safety_radius}"
            )));
        }
        if !y_factor.is_finite() {
            return Err(CSpaceError::invalid("y_factor must be finite"));
        }

        let rv = safety_radius;
        let f = params.f;
        let columns = SpanTable::build(Axis::Column, params.width, params.ndisp, |x, d| {
            geometry::occlusion_span(x, params.width, f, params.depth(d), rv, 1.0)
        });
        let rows = SpanTable::build(Axis::Row, params.height, params.ndisp, |y, d| {
            geometry::occlusion_span(y, params.height, f, params.depth(d), rv, y_factor)
        });
        let fb = params.f_disp * params.baseline;
        let dnew = DVector::from_fn(params.ndisp, |d, _| {
            if d == 0 {
                0.0
            } else {
                geometry::expanded_disparity(params.depth(d), rv, fb, crate::TOO_CLOSE)
            }
        });

        debug!(
            "GeometryLut::new {}x{} ndisp={} rv={:.3} y_factor={:.3} full_columns={} full_rows={}",
            params.width,
            params.height,
            params.ndisp,
            rv,
            y_factor,
            columns.full_spans(),
            rows.full_spans()
        );

        Ok(Self {
            params: params.clone(),
            safety_radius,
            y_factor,
            columns,
            rows,
            dnew,
        })
    }

    pub fn params(&self) -> &ImageParams {
        &self.params
    }

    pub fn width(&self) -> usize {
        self.params.width
    }

    pub fn height(&self) -> usize {
        self.params.height
    }

    pub fn ndisp(&self) -> usize {
        self.params.ndisp
    }

    pub fn safety_radius(&self) -> f64 {
        self.safety_radius
    }

    pub fn y_factor(&self) -> f64 {
        self.y_factor
    }

    /// Horizontal bound pair `(x1, x2)` for column `x` at disparity `d`.
    /// The pair is unordered.
    pub fn x_bounds(&self, x: usize, d: usize) -> Result<(usize, usize), CSpaceError> {
        self.bounds(&self.columns, x, d)
    }

    /// Vertical bound pair `(y1, y2)` for row `y` at disparity `d`.
    /// The pair is unordered.
    pub fn y_bounds(&self, y: usize, d: usize) -> Result<(usize, usize), CSpaceError> {
        self.bounds(&self.rows, y, d)
    }

    /// Expanded disparity for `d`, or [`TOO_CLOSE`](crate::TOO_CLOSE) when the
    /// camera sits inside the safety envelope.
    pub fn dnew(&self, d: usize) -> Result<f32, CSpaceError> {
        self.check_disparity(d)?;
        Ok(self.dnew[d])
    }

    /// Disparity index carried by a frame cell, if it can contribute.
    ///
    /// The value is truncated toward zero. NaN, negative values and anything
    /// outside `(0, ndisp)` yield `None`.
    #[inline]
    pub fn disparity_index(&self, value: f32) -> Option<usize> {
        let d = value as i64;
        (d > 0 && (d as u64) < self.params.ndisp as u64).then_some(d as usize)
    }

    /// Inclusive column range for a validated disparity.
    #[inline]
    pub(crate) fn column_span(&self, x: usize, d: usize) -> (usize, usize) {
        self.columns.ordered(x, d)
    }

    /// Inclusive row range for a validated disparity.
    #[inline]
    pub(crate) fn row_span(&self, y: usize, d: usize) -> (usize, usize) {
        self.rows.ordered(y, d)
    }

    #[inline]
    pub(crate) fn dnew_unchecked(&self, d: usize) -> f32 {
        self.dnew[d]
    }

    fn check_disparity(&self, d: usize) -> Result<(), CSpaceError> {
        if d == 0 || d >= self.params.ndisp {
            return Err(CSpaceError::DisparityOutOfRange {
                disparity: d as i64,
                ndisp: self.params.ndisp,
            });
        }
        Ok(())
    }

    fn bounds(
        &self,
        table: &SpanTable,
        coord: usize,
        d: usize,
    ) -> Result<(usize, usize), CSpaceError> {
        self.check_disparity(d)?;
        let (a, b) = table.pair(coord, d).ok_or(CSpaceError::CoordinateOutOfRange {
            axis: table.axis(),
            index: coord,
            len: table.len(),
        })?;
        Ok((a as usize, b as usize))
    }
}
