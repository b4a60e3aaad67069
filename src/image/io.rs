//! I/O helpers for disparity and C-space images and JSON.
//!
//! - `load_disparity_image`: read an 8- or 16-bit grayscale image into a `Frame`.
//! - `save_cspace_png`: write a `Frame` as an 8-bit PNG using absolute,
//!   saturated values.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::Frame;
use image::{DynamicImage, GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load a grayscale disparity image. Raw pixel values are divided by `scale`
/// (use 1 for images storing the disparity index directly).
pub fn load_disparity_image(path: &Path, scale: f32) -> Result<Frame, String> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(format!("Invalid disparity scale {scale}"));
    }
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let (width, height) = (img.width() as usize, img.height() as usize);
    let frame = match img {
        DynamicImage::ImageLuma16(buf) => {
            Frame::from_pixels(width, height, buf.as_raw().as_slice(), scale)
        }
        other => {
            let gray = other.into_luma8();
            Frame::from_pixels(width, height, gray.as_raw().as_slice(), scale)
        }
    };
    frame.map_err(|e| format!("Failed to convert {}: {e}", path.display()))
}

/// 8-bit rendering of a frame: `|v|` rounded and saturated to 255, NaN → 0.
pub fn to_gray_u8(frame: &Frame) -> GrayImage {
    let mut out = GrayImage::new(frame.w as u32, frame.h as u32);
    for y in 0..frame.h {
        for (x, &v) in frame.row(y).iter().enumerate() {
            let px = if v.is_nan() {
                0
            } else {
                v.abs().round().min(255.0) as u8
            };
            out.put_pixel(x as u32, y as u32, Luma([px]));
        }
    }
    out
}

/// Save a C-space frame as an 8-bit grayscale PNG.
pub fn save_cspace_png(frame: &Frame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    to_gray_u8(frame)
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
