//! Owned single-channel f32 frame in row-major layout.
//!
//! Used for both disparity input and C-space output. Cells hold a disparity,
//! an expanded disparity, or NaN for "no measurement". The NaN comparison
//! contract matters: every ordered comparison against NaN is false, which the
//! expansion passes rely on to always overwrite missing cells.
use crate::error::CSpaceError;

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Frame width in pixels
    pub w: usize,
    /// Frame height in pixels
    pub h: usize,
    /// Backing storage in row-major order, `w * h` cells
    pub data: Vec<f32>,
}

/// Disparity input frame.
pub type DisparityFrame = Frame;
/// Expanded configuration-space frame.
pub type CSpaceFrame = Frame;

impl Frame {
    /// Construct a zero-initialized frame of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self::filled(w, h, 0.0)
    }

    pub fn filled(w: usize, h: usize, value: f32) -> Self {
        Self {
            w,
            h,
            data: vec![value; w * h],
        }
    }

    /// Frame with every cell marked as unmeasured.
    pub fn nan(w: usize, h: usize) -> Self {
        Self::filled(w, h, f32::NAN)
    }

    /// Wrap an existing row-major buffer.
    pub fn from_vec(w: usize, h: usize, data: Vec<f32>) -> Result<Self, CSpaceError> {
        if data.len() != w * h {
            return Err(CSpaceError::invalid(format!(
                "buffer holds {} cells, expected {}x{} = {}",
                data.len(),
                w,
                h,
                w * h
            )));
        }
        Ok(Self { w, h, data })
    }

    /// Convert raw integer pixels to disparities, dividing by `scale`.
    pub fn from_pixels<T: Copy + Into<f32>>(
        w: usize,
        h: usize,
        pixels: &[T],
        scale: f32,
    ) -> Result<Self, CSpaceError> {
        let data = pixels.iter().map(|&p| p.into() / scale).collect();
        Self::from_vec(w, h, data)
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        let start = y * self.w;
        &mut self.data[start..start + self.w]
    }

    /// Set every cell of rows `[first_row, h)` to `value`. No-op when
    /// `first_row >= h`.
    pub fn fill_rows_from(&mut self, first_row: usize, value: f32) {
        if first_row >= self.h {
            return;
        }
        let start = first_row * self.w;
        self.data[start..].fill(value);
    }

    /// Column-major copy: row `x` of the result is column `x` of `self`.
    pub fn transposed(&self) -> Frame {
        let mut out = Frame::new(self.h, self.w);
        for y in 0..self.h {
            for (x, &v) in self.row(y).iter().enumerate() {
                out.data[x * self.h + y] = v;
            }
        }
        out
    }

    pub fn count_where(&self, pred: impl Fn(f32) -> bool) -> usize {
        self.data.iter().filter(|&&v| pred(v)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transpose_swaps_axes() {
        let frame = Frame::from_vec(3, 2, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let t = frame.transposed();
        assert_eq!(t.dims(), (2, 3));
        assert_eq!(t.row(0), &[0.0, 3.0]);
        assert_eq!(t.row(2), &[2.0, 5.0]);
        assert_eq!(t.transposed(), frame);
    }

    #[test]
    fn fill_rows_from_clamps_to_height() {
        let mut frame = Frame::new(2, 3);
        frame.fill_rows_from(2, 7.0);
        assert_eq!(frame.row(1), &[0.0, 0.0]);
        assert_eq!(frame.row(2), &[7.0, 7.0]);
        frame.fill_rows_from(3, 9.0);
        frame.fill_rows_from(100, 9.0);
        assert_eq!(frame.count_where(|v| v == 9.0), 0);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        assert!(Frame::from_vec(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn from_pixels_applies_scale() {
        let frame = Frame::from_pixels(2, 1, &[512u16, 256u16], 256.0).unwrap();
        assert_eq!(frame.row(0), &[2.0, 1.0]);
    }
}
