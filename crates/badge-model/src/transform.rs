//! User-controlled photo offset and scale.

use serde::{Deserialize, Serialize};

/// Smallest scale a photo can be shrunk to.
pub const MIN_SCALE: f64 = 0.1;

/// Offset and scale applied to the cover-fitted photo.
///
/// The scale never drops below [`MIN_SCALE`]; every constructor and
/// mutator clamps it, so a transform can never invert or collapse the photo.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTransform", into = "RawTransform")]
pub struct PhotoTransform {
    offset_x: f64,
    offset_y: f64,
    scale: f64,
}

#[derive(Serialize, Deserialize)]
struct RawTransform {
    dx: f64,
    dy: f64,
    scale: f64,
}

impl From<RawTransform> for PhotoTransform {
    fn from(raw: RawTransform) -> Self {
        PhotoTransform::new(raw.dx, raw.dy, raw.scale)
    }
}

impl From<PhotoTransform> for RawTransform {
    fn from(t: PhotoTransform) -> Self {
        RawTransform {
            dx: t.offset_x,
            dy: t.offset_y,
            scale: t.scale,
        }
    }
}

impl PhotoTransform {
    /// No offset, scale 1.
    pub const IDENTITY: PhotoTransform = PhotoTransform {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        Self {
            offset_x,
            offset_y,
            scale: clamp_scale(scale),
        }
    }

    /// Offset `(dx, dy)` in logical units.
    pub fn offset(&self) -> (f64, f64) {
        (self.offset_x, self.offset_y)
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Shift the photo by a drag delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Add `delta` to the scale, flooring at [`MIN_SCALE`].
    pub fn adjust_scale(&mut self, delta: f64) {
        self.scale = clamp_scale(self.scale + delta);
    }
}

impl Default for PhotoTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn clamp_scale(scale: f64) -> f64 {
    // NaN compares false against everything; treat it as the floor.
    if scale.is_nan() {
        return MIN_SCALE;
    }
    scale.max(MIN_SCALE)
}
