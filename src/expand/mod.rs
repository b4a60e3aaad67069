//! Two-pass C-space expansion.
//!
//! [`CSpaceExpander::expand`] runs a three-buffer pipeline:
//!
//! 1. **Rows.** The input is copied into a row buffer; every valid disparity
//!    `d` is written over its horizontal span `[x1, x2]` on its own row.
//! 2. **Columns.** The row buffer is transposed into a column-major buffer and
//!    copied into the output; every valid disparity `d` of the row buffer
//!    writes `dnew(d)` over its vertical span `[y1, y2]` on its own column.
//!    The output is transposed back to row-major.
//!
//! Both writes keep the per-cell maximum, so nearer obstacles win and the
//! result does not depend on the order lanes are processed in. Pass 2 reads
//! the completed pass-1 buffer: the horizontal spread must land before the
//! vertical substitution by `dnew`. The two 1D spreads approximate a full 2D
//! expansion.
//!
//! With the `parallel` feature, lanes are distributed over a dedicated rayon
//! pool (rows in pass 1, columns in pass 2). The pool join between the passes
//! is the barrier.

pub mod passes;

use crate::error::CSpaceError;
use crate::image::Frame;
use crate::lut::GeometryLut;
use log::debug;
use std::sync::Arc;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub struct CSpaceExpander {
    lut: Arc<GeometryLut>,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl CSpaceExpander {
    /// Create an expander over a shared LUT. `num_threads` sizes the worker
    /// pool (0 picks the rayon default) and is ignored without the `parallel`
    /// feature.
    pub fn new(lut: Arc<GeometryLut>, num_threads: usize) -> Result<Self, CSpaceError> {
        #[cfg(feature = "parallel")]
        {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .thread_name(|i| format!("cspace-{i}"))
                .build()
                .map_err(|e| CSpaceError::ThreadPool {
                    reason: e.to_string(),
                })?;
            debug!(
                "CSpaceExpander::new threads={} ({} requested)",
                pool.current_num_threads(),
                num_threads
            );
            Ok(Self { lut, pool })
        }
        #[cfg(not(feature = "parallel"))]
        {
            debug!("CSpaceExpander::new sequential (threads={num_threads} ignored)");
            Ok(Self { lut })
        }
    }

    pub fn lut(&self) -> &GeometryLut {
        &self.lut
    }

    /// Shared handle to the LUT, for building further expanders.
    pub fn shared_lut(&self) -> Arc<GeometryLut> {
        Arc::clone(&self.lut)
    }

    /// Worker count used by the passes.
    pub fn num_threads(&self) -> usize {
        #[cfg(feature = "parallel")]
        {
            self.pool.current_num_threads()
        }
        #[cfg(not(feature = "parallel"))]
        {
            1
        }
    }

    /// Run both passes on `disp`, returning a new C-space frame.
    pub fn expand(&self, disp: &Frame) -> Result<Frame, CSpaceError> {
        let rows = self.expand_rows(disp)?;
        self.expand_columns(&rows)
    }

    /// Pass 1 only: horizontal spread of raw disparities.
    pub fn expand_rows(&self, disp: &Frame) -> Result<Frame, CSpaceError> {
        self.check_dims(disp)?;
        let mut out = disp.clone();
        let lut = self.lut.as_ref();
        let w = disp.w;
        #[cfg(feature = "parallel")]
        self.pool.install(|| {
            out.data
                .par_chunks_mut(w)
                .zip(disp.data.par_chunks(w))
                .for_each(|(dst, src)| passes::splat_row(lut, src, dst));
        });
        #[cfg(not(feature = "parallel"))]
        for (dst, src) in out.data.chunks_mut(w).zip(disp.data.chunks(w)) {
            passes::splat_row(lut, src, dst);
        }
        Ok(out)
    }

    /// Pass 2 only: vertical spread of expanded disparities over a
    /// row-expanded frame.
    pub fn expand_columns(&self, rows: &Frame) -> Result<Frame, CSpaceError> {
        self.check_dims(rows)?;
        let src = rows.transposed();
        let mut out = src.clone();
        let lut = self.lut.as_ref();
        let h = rows.h;
        #[cfg(feature = "parallel")]
        self.pool.install(|| {
            out.data
                .par_chunks_mut(h)
                .zip(src.data.par_chunks(h))
                .for_each(|(dst, src)| passes::splat_column(lut, src, dst));
        });
        #[cfg(not(feature = "parallel"))]
        for (dst, src) in out.data.chunks_mut(h).zip(src.data.chunks(h)) {
            passes::splat_column(lut, src, dst);
        }
        Ok(out.transposed())
    }

    fn check_dims(&self, frame: &Frame) -> Result<(), CSpaceError> {
        let expected = (self.lut.width(), self.lut.height());
        if frame.dims() != expected {
            return Err(CSpaceError::DimensionMismatch {
                expected,
                found: frame.dims(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for CSpaceExpander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CSpaceExpander")
            .field("width", &self.lut.width())
            .field("height", &self.lut.height())
            .field("ndisp", &self.lut.ndisp())
            .field("threads", &self.num_threads())
            .finish()
    }
}
