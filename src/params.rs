//! Parameter types configuring the LUT, the pre-filter and the processor.
//!
//! All structures are plain immutable values. A processor is built from one
//! [`CSpaceParams`] and never consults process-wide state afterwards.
//!
//! Defaults match a 640×480 processing frame from a 0.6 m baseline rig with
//! 80 disparity levels, a 0.3 m safety radius and a 3×3 rectangular opening.

use crate::error::CSpaceError;
use serde::{Deserialize, Serialize};

/// Camera and frame geometry shared by every frame processed with one LUT.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageParams {
    /// Frame width in pixels.
    pub width: usize,
    /// Frame height in pixels.
    pub height: usize,
    /// Exclusive upper bound on disparity indices. Index 0 is reserved.
    pub ndisp: usize,
    /// Focal length of the processed (possibly downscaled) frame, in pixels.
    pub f: f64,
    /// Focal length used to convert disparity to depth, in pixels.
    pub f_disp: f64,
    /// Stereo baseline in metres.
    pub baseline: f64,
    /// Last row of interest. Rows below it are ignored on input and reported
    /// as blocked on output.
    pub ymax: usize,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            ndisp: 80,
            f: 70.0,
            f_disp: 425.0,
            baseline: 0.6,
            ymax: 350,
        }
    }
}

impl ImageParams {
    /// Same geometry with a different frame size.
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Depth in metres for a disparity index (`f_disp · B / d`).
    #[inline]
    pub fn depth(&self, d: usize) -> f64 {
        self.f_disp * self.baseline / d as f64
    }

    pub fn validate(&self) -> Result<(), CSpaceError> {
        if self.width == 0 || self.height == 0 {
            return Err(CSpaceError::invalid(format!(
                "frame size {}x{} must be non-empty",
                self.width, self.height
            )));
        }
        if self.ndisp < 2 {
            return Err(CSpaceError::invalid(format!(
                "ndisp must be at least 2, got {}",
                self.ndisp
            )));
        }
        for (name, value) in [
            ("f", self.f),
            ("f_disp", self.f_disp),
            ("baseline", self.baseline),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CSpaceError::invalid(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Speckle filter selection.
///
/// Deserializes from a lowercase name. Names other than `none`, `median` and
/// `opening` are kept as [`FilterKind::Unrecognized`] so that a typo in a
/// configuration file disables filtering instead of aborting the run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterKind {
    None,
    Median,
    Opening,
    Unrecognized(String),
}

impl From<String> for FilterKind {
    fn from(name: String) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" | "off" | "disabled" => FilterKind::None,
            "median" => FilterKind::Median,
            "opening" | "open" => FilterKind::Opening,
            _ => FilterKind::Unrecognized(name),
        }
    }
}

impl From<FilterKind> for String {
    fn from(kind: FilterKind) -> Self {
        match kind {
            FilterKind::None => "none".to_string(),
            FilterKind::Median => "median".to_string(),
            FilterKind::Opening => "opening".to_string(),
            FilterKind::Unrecognized(name) => name,
        }
    }
}

/// Structuring element shape for the morphological opening.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphShape {
    Rect,
    Cross,
    Ellipse,
}

/// Pre-filter configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterParams {
    pub kind: FilterKind,
    /// Odd median window size.
    pub median_kernel: usize,
    pub morph_shape: MorphShape,
    /// Element half-size; the element is `2·morph_size + 1` pixels wide.
    /// Zero makes the opening an identity.
    pub morph_size: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            kind: FilterKind::Opening,
            median_kernel: 5,
            morph_shape: MorphShape::Rect,
            morph_size: 1,
        }
    }
}

impl FilterParams {
    pub fn disabled() -> Self {
        Self {
            kind: FilterKind::None,
            ..Self::default()
        }
    }
}

/// Processor-wide parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CSpaceParams {
    pub image: ImageParams,
    /// Clearance radius around the travel axis, in metres.
    pub safety_radius: f64,
    /// Scale applied to the vertical intrusion argument only.
    pub y_factor: f64,
    pub filter: FilterParams,
    /// Worker threads for the expansion passes. Zero lets the pool pick.
    pub num_threads: usize,
    /// Output value at or above which a cell counts as blocked in reports.
    pub blocked_threshold: f32,
}

impl Default for CSpaceParams {
    fn default() -> Self {
        Self {
            image: ImageParams::default(),
            safety_radius: 0.3,
            y_factor: 1.0,
            filter: FilterParams::default(),
            num_threads: 4,
            blocked_threshold: crate::TOO_CLOSE,
        }
    }
}

impl CSpaceParams {
    pub fn validate(&self) -> Result<(), CSpaceError> {
        self.image.validate()?;
        if !(self.safety_radius.is_finite() && self.safety_radius > 0.0) {
            return Err(CSpaceError::invalid(format!(
                "safety radius must be finite and positive, got {}",
                self.safety_radius
            )));
        }
        if !self.y_factor.is_finite() {
            return Err(CSpaceError::invalid("y_factor must be finite"));
        }
        if self.filter.kind == FilterKind::Median && self.filter.median_kernel % 2 == 0 {
            return Err(CSpaceError::invalid(format!(
                "median kernel must be odd, got {}",
                self.filter.median_kernel
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(CSpaceParams::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_safety_radius() {
        let params = CSpaceParams {
            safety_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(CSpaceError::InvalidParams { .. })
        ));
    }

    #[test]
    fn rejects_degenerate_image() {
        let image = ImageParams {
            ndisp: 1,
            ..Default::default()
        };
        assert!(image.validate().is_err());
        assert!(ImageParams::default().with_size(0, 10).validate().is_err());
    }

    #[test]
    fn unknown_filter_name_is_preserved() {
        let params: FilterParams =
            serde_json::from_str(r#"{ "kind": "bilateral" }"#).expect("parse filter params");
        assert_eq!(params.kind, FilterKind::Unrecognized("bilateral".to_string()));
        assert_eq!(params.median_kernel, 5);
    }

    #[test]
    fn filter_names_round_trip_through_json() {
        let params = FilterParams {
            kind: FilterKind::Median,
            morph_shape: MorphShape::Ellipse,
            ..Default::default()
        };
        let json = serde_json::to_string(&params).expect("serialize");
        assert!(json.contains("\"median\""));
        assert!(json.contains("\"ellipse\""));
        let back: FilterParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, params);
    }
}
