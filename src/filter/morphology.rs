//! Grey-scale morphological opening (erosion followed by dilation).
//!
//! Samples outside the frame are ignored, so borders neither erode nor dilate
//! the content. Opening removes bright structures smaller than the element,
//! which for disparity maps means isolated near-looking speckles.
use super::DisparityFilter;
use crate::image::Frame;
use crate::params::MorphShape;

/// Binary structuring element anchored at its centre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    size: usize,
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Element of `(2·half_size + 1)²` cells in the requested shape.
    pub fn new(shape: MorphShape, half_size: usize) -> Self {
        let size = 2 * half_size + 1;
        let r = half_size as isize;
        let mut offsets = Vec::new();
        for i in 0..size {
            let (lo, hi) = row_extent(shape, half_size, i);
            for j in lo..hi {
                offsets.push((j as isize - r, i as isize - r));
            }
        }
        Self { size, offsets }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// `(dx, dy)` offsets of the active cells relative to the anchor.
    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    pub fn contains(&self, dx: isize, dy: isize) -> bool {
        self.offsets.contains(&(dx, dy))
    }
}

/// Active column range `[lo, hi)` on element row `i`.
fn row_extent(shape: MorphShape, half_size: usize, i: usize) -> (usize, usize) {
    let size = 2 * half_size + 1;
    match shape {
        MorphShape::Rect => (0, size),
        MorphShape::Cross => {
            if i == half_size {
                (0, size)
            } else {
                (half_size, half_size + 1)
            }
        }
        MorphShape::Ellipse => {
            let r = half_size as f64;
            let dy = i as f64 - r;
            if r == 0.0 {
                return (0, 1);
            }
            let dx = (r * ((r * r - dy * dy) / (r * r)).max(0.0).sqrt()).round() as usize;
            (half_size - dx.min(half_size), (half_size + dx + 1).min(size))
        }
    }
}

/// Erosion then dilation with one structuring element.
#[derive(Clone, Debug)]
pub struct MorphOpening {
    element: StructuringElement,
}

impl MorphOpening {
    pub fn new(shape: MorphShape, half_size: usize) -> Self {
        Self {
            element: StructuringElement::new(shape, half_size),
        }
    }

    pub fn element(&self) -> &StructuringElement {
        &self.element
    }
}

impl DisparityFilter for MorphOpening {
    fn name(&self) -> &'static str {
        "opening"
    }

    fn denoise(&self, src: &Frame) -> Frame {
        if self.element.size() <= 1 {
            return src.clone();
        }
        let eroded = extremum(src, &self.element, f32::min, f32::INFINITY);
        extremum(&eroded, &self.element, f32::max, f32::NEG_INFINITY)
    }
}

/// Erosion (`min`) or dilation (`max`) over the element, skipping samples
/// that fall outside the frame.
fn extremum(
    src: &Frame,
    element: &StructuringElement,
    pick: fn(f32, f32) -> f32,
    identity: f32,
) -> Frame {
    let (w, h) = src.dims();
    let mut out = Frame::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut acc = identity;
            for &(dx, dy) in element.offsets() {
                let sx = x as isize + dx;
                let sy = y as isize + dy;
                if sx < 0 || sy < 0 || sx >= w as isize || sy >= h as isize {
                    continue;
                }
                acc = pick(acc, src.get(sx as usize, sy as usize));
            }
            out.set(x, y, acc);
        }
    }
    out
}
