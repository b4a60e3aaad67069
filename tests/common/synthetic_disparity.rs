use cspace_expander::{Frame, GeometryLut};

/// Frame with no measurements except the listed `(x, y, disparity)` cells.
pub fn sparse_disparity(width: usize, height: usize, cells: &[(usize, usize, f32)]) -> Frame {
    let mut frame = Frame::nan(width, height);
    for &(x, y, d) in cells {
        frame.set(x, y, d);
    }
    frame
}

/// Deterministic pseudo-random disparity field with roughly `fill` of the
/// cells measured, the rest NaN.
pub fn scattered_disparity(width: usize, height: usize, ndisp: usize, fill: f32) -> Frame {
    let mut state = 0x2545_f491_u32;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    let mut frame = Frame::nan(width, height);
    for v in frame.data.iter_mut() {
        let roll = (next() % 1000) as f32 / 1000.0;
        if roll < fill {
            *v = (next() % ndisp as u32) as f32;
        }
    }
    frame
}

/// Straightforward two-pass expansion through the public LUT queries.
pub fn reference_expand(lut: &GeometryLut, disp: &Frame) -> Frame {
    let keep_max = |frame: &mut Frame, x: usize, y: usize, v: f32| {
        let cur = frame.get(x, y);
        if cur.is_nan() || v > cur {
            frame.set(x, y, v);
        }
    };

    let mut rows = disp.clone();
    for y in 0..disp.h {
        for x in 0..disp.w {
            let Some(d) = lut.disparity_index(disp.get(x, y)) else {
                continue;
            };
            let (a, b) = lut.x_bounds(x, d).expect("valid column query");
            for xx in a.min(b)..=a.max(b) {
                keep_max(&mut rows, xx, y, d as f32);
            }
        }
    }

    let mut out = rows.clone();
    for x in 0..rows.w {
        for y in 0..rows.h {
            let Some(d) = lut.disparity_index(rows.get(x, y)) else {
                continue;
            };
            let dnew = lut.dnew(d).expect("valid disparity");
            let (a, b) = lut.y_bounds(y, d).expect("valid row query");
            for yy in a.min(b)..=a.max(b) {
                keep_max(&mut out, x, yy, dnew);
            }
        }
    }
    out
}

/// Cell-wise equality treating NaN as equal to NaN.
pub fn same_cells(a: &Frame, b: &Frame) -> bool {
    a.dims() == b.dims()
        && a
            .data
            .iter()
            .zip(&b.data)
            .all(|(x, y)| (x.is_nan() && y.is_nan()) || x == y)
}
