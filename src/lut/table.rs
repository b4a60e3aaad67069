use crate::error::Axis;
use nalgebra::DMatrix;

/// Pair of bound tables for one image axis, indexed `(coordinate, disparity)`.
///
/// Storage is column-major: all coordinates for one disparity are contiguous.
/// Column 0 (disparity 0) is allocated but never filled.
#[derive(Clone, Debug)]
pub struct SpanTable {
    axis: Axis,
    first: DMatrix<u32>,
    second: DMatrix<u32>,
    full_spans: usize,
}

impl SpanTable {
    /// Fill the table by evaluating `span(coord, d)` for every coordinate in
    /// `[0, len)` and disparity in `[1, ndisp)`.
    pub fn build<F>(axis: Axis, len: usize, ndisp: usize, span: F) -> Self
    where
        F: Fn(usize, usize) -> (u32, u32),
    {
        let max = len.saturating_sub(1) as u32;
        let mut pairs = Vec::with_capacity(len * ndisp);
        let mut full_spans = 0usize;
        for d in 0..ndisp {
            for coord in 0..len {
                let pair = if d == 0 { (0, 0) } else { span(coord, d) };
                if d > 0 && pair == (0, max) {
                    full_spans += 1;
                }
                pairs.push(pair);
            }
        }
        let first = DMatrix::from_iterator(len, ndisp, pairs.iter().map(|p| p.0));
        let second = DMatrix::from_iterator(len, ndisp, pairs.iter().map(|p| p.1));
        Self {
            axis,
            first,
            second,
            full_spans,
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.first.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.first.nrows() == 0
    }

    /// Number of entries equal to the whole axis.
    pub fn full_spans(&self) -> usize {
        self.full_spans
    }

    /// Stored pair in construction order, or `None` outside the table.
    #[inline]
    pub fn pair(&self, coord: usize, d: usize) -> Option<(u32, u32)> {
        Some((*self.first.get((coord, d))?, *self.second.get((coord, d))?))
    }

    /// Inclusive `(min, max)` range for a pair known to be in the table.
    #[inline]
    pub(crate) fn ordered(&self, coord: usize, d: usize) -> (usize, usize) {
        let a = self.first[(coord, d)] as usize;
        let b = self.second[(coord, d)] as usize;
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}
