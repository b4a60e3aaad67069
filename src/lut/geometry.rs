//! Projective inversion behind the lookup tables.
//!
//! For an obstacle seen at image coordinate `c` with depth `zw`, the lateral
//! offset is `xw = (c − len/2)·zw/f`. A safety circle of radius `rv` around
//! that point subtends a half-angle `asin(rv / |(xw, zw)|)` at the camera;
//! the two tangent rays are projected back to the image to bound the span the
//! obstacle can occlude. See Matthies et al., 2014, "Stereo vision-based
//! obstacle avoidance for micro air vehicles using disparity space".

/// Near clipping depth in metres. A shrunk depth at or below this value means
/// the camera sits inside the obstacle's safety envelope.
pub const NEAR_CLIP: f64 = 0.1;

/// Span in pixels occluded along one image axis, as an unordered pair.
///
/// `coord` is the pixel coordinate along an axis of `len` pixels, `f` the
/// processing focal length and `zw` the obstacle depth. `scale` multiplies the
/// intrusion argument (1 for columns, `y_factor` for rows).
///
/// Returns `(0, len − 1)` when the argument leaves `(−1, 1)`, i.e. the camera
/// is inside the safety radius at this depth.
pub fn occlusion_span(
    coord: usize,
    len: usize,
    f: f64,
    zw: f64,
    rv: f64,
    scale: f64,
) -> (u32, u32) {
    let centre = len as f64 / 2.0;
    let max = len.saturating_sub(1) as f64;
    let lateral = (coord as f64 - centre) * zw / f;
    // atan rather than atan2: only tan(alpha ± alpha1) is consumed below and
    // tan has period π, so the lost quadrant never reaches the result.
    let alpha = (zw / lateral).atan();
    let arg = rv / (zw * zw + lateral * lateral).sqrt() * scale;
    if arg > -1.0 && arg < 1.0 {
        let alpha1 = arg.asin();
        let r1 = zw / (alpha + alpha1).tan();
        let r2 = zw / (alpha - alpha1).tan();
        (
            to_pixel(centre + f * r1 / zw, max),
            to_pixel(centre + f * r2 / zw, max),
        )
    } else {
        (0, max as u32)
    }
}

/// Disparity of the obstacle's near edge once its depth is reduced by `rv`.
///
/// `fb` is the product `f_disp · B`. Returns `too_close` when the shrunk depth
/// does not clear [`NEAR_CLIP`].
pub fn expanded_disparity(zw: f64, rv: f64, fb: f64, too_close: f32) -> f32 {
    let znew = zw - rv;
    if znew > NEAR_CLIP {
        (fb / znew).ceil() as f32
    } else {
        too_close
    }
}

/// Clamp into `[0, max]` and truncate to a pixel index.
#[inline]
fn to_pixel(v: f64, max: f64) -> u32 {
    let bounded = if v < 0.0 {
        0.0
    } else if v > max {
        max
    } else {
        v
    };
    bounded as u32
}
