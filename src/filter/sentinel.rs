//! NaN ⇄ sentinel remapping around the speckle filter.
//!
//! Order-statistic filters need a total order, which NaN breaks. Before
//! filtering, NaN cells are replaced by [`INVALID_SENTINEL`]; afterwards every
//! originally-NaN cell and every cell the filter drove below zero becomes NaN
//! again. Valid cells are never touched by either step.
use crate::image::Frame;

/// Stand-in for NaN while filtering. Below every valid disparity.
pub const INVALID_SENTINEL: f32 = -1.0;

/// Positions that held NaN before [`mask_invalid`].
#[derive(Clone, Debug)]
pub struct InvalidMask {
    nan: Vec<bool>,
}

impl InvalidMask {
    pub fn count(&self) -> usize {
        self.nan.iter().filter(|&&m| m).count()
    }
}

/// Replace NaN with the sentinel in place and remember where it was.
pub fn mask_invalid(frame: &mut Frame) -> InvalidMask {
    let nan = frame
        .data
        .iter_mut()
        .map(|v| {
            let is_nan = v.is_nan();
            if is_nan {
                *v = INVALID_SENTINEL;
            }
            is_nan
        })
        .collect();
    InvalidMask { nan }
}

/// Put NaN back on masked cells and on anything the filter made negative.
pub fn restore_invalid(frame: &mut Frame, mask: &InvalidMask) {
    debug_assert_eq!(frame.data.len(), mask.nan.len());
    for (v, &was_nan) in frame.data.iter_mut().zip(&mask.nan) {
        if was_nan || *v < 0.0 {
            *v = f32::NAN;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_bit_exact_for_valid_cells() {
        let values = vec![f32::NAN, 0.0, 3.25, 79.0, f32::NAN, 1e-7, 12.0, 0.5];
        let mut frame = Frame::from_vec(4, 2, values.clone()).unwrap();
        let mask = mask_invalid(&mut frame);
        assert_eq!(mask.count(), 2);
        assert!(frame.data.iter().all(|v| !v.is_nan()));
        assert_eq!(frame.get(0, 0), INVALID_SENTINEL);

        restore_invalid(&mut frame, &mask);
        for (got, want) in frame.data.iter().zip(&values) {
            if want.is_nan() {
                assert!(got.is_nan());
            } else {
                assert_eq!(got.to_bits(), want.to_bits());
            }
        }
    }

    #[test]
    fn negatives_from_filtering_become_nan() {
        let mut frame = Frame::from_vec(3, 1, vec![2.0, 4.0, 6.0]).unwrap();
        let mask = mask_invalid(&mut frame);
        frame.set(1, 0, INVALID_SENTINEL);
        restore_invalid(&mut frame, &mask);
        assert_eq!(frame.get(0, 0), 2.0);
        assert!(frame.get(1, 0).is_nan());
        assert_eq!(frame.get(2, 0), 6.0);
    }
}
