//! Single-lane splat kernels shared by the sequential and parallel drivers.
//!
//! Each kernel reads one source lane and scatters into one destination lane of
//! the same length. Lanes never alias, which is what lets the drivers hand
//! disjoint lanes to different workers.
use crate::lut::GeometryLut;

/// Raise `cell` to `value` unless it already holds something at least as
/// large. Written as a negated `<=` so NaN cells are always overwritten.
#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn raise(cell: &mut f32, value: f32) {
    if !(value <= *cell) {
        *cell = value;
    }
}

/// Pass 1 on one row: spread each valid disparity over its horizontal span.
pub fn splat_row(lut: &GeometryLut, src: &[f32], dst: &mut [f32]) {
    debug_assert_eq!(src.len(), dst.len());
    for (x, &v) in src.iter().enumerate() {
        let Some(d) = lut.disparity_index(v) else {
            continue;
        };
        let (lo, hi) = lut.column_span(x, d);
        let value = d as f32;
        for cell in &mut dst[lo..=hi] {
            raise(cell, value);
        }
    }
}

/// Pass 2 on one column (stored contiguously): spread the expanded disparity
/// of each valid cell over its vertical span.
pub fn splat_column(lut: &GeometryLut, src: &[f32], dst: &mut [f32]) {
    debug_assert_eq!(src.len(), dst.len());
    for (y, &v) in src.iter().enumerate() {
        let Some(d) = lut.disparity_index(v) else {
            continue;
        };
        let (lo, hi) = lut.row_span(y, d);
        let value = lut.dnew_unchecked(d);
        for cell in &mut dst[lo..=hi] {
            raise(cell, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raise_keeps_the_maximum_and_replaces_nan() {
        let mut cell = f32::NAN;
        raise(&mut cell, 3.0);
        assert_eq!(cell, 3.0);
        raise(&mut cell, 2.0);
        assert_eq!(cell, 3.0);
        raise(&mut cell, 7.0);
        assert_eq!(cell, 7.0);
        raise(&mut cell, 7.0);
        assert_eq!(cell, 7.0);
    }

    #[test]
    fn raise_replaces_negative_sentinel() {
        let mut cell = -1.0;
        raise(&mut cell, 1.0);
        assert_eq!(cell, 1.0);
    }
}
