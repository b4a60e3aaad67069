use super::DisparityFilter;
use crate::image::Frame;

/// Square median filter with replicated borders.
#[derive(Clone, Copy, Debug)]
pub struct MedianBlur {
    kernel: usize,
}

impl MedianBlur {
    /// `kernel` must be odd; even sizes are rounded up.
    pub fn new(kernel: usize) -> Self {
        Self {
            kernel: kernel.max(1) | 1,
        }
    }

    pub fn kernel(&self) -> usize {
        self.kernel
    }
}

impl DisparityFilter for MedianBlur {
    fn name(&self) -> &'static str {
        "median"
    }

    fn denoise(&self, src: &Frame) -> Frame {
        let (w, h) = src.dims();
        let mut out = Frame::new(w, h);
        if w == 0 || h == 0 {
            return out;
        }
        let radius = (self.kernel / 2) as isize;
        let mut window = Vec::with_capacity(self.kernel * self.kernel);
        for y in 0..h {
            for x in 0..w {
                window.clear();
                for dy in -radius..=radius {
                    let sy = clamp_index(y as isize + dy, h);
                    let row = src.row(sy);
                    for dx in -radius..=radius {
                        window.push(row[clamp_index(x as isize + dx, w)]);
                    }
                }
                let mid = window.len() / 2;
                let (_, median, _) = window.select_nth_unstable_by(mid, f32::total_cmp);
                out.set(x, y, *median);
            }
        }
        out
    }
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    idx.clamp(0, upper as isize - 1) as usize
}
