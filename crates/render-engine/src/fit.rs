//! Photo placement: cover fit into the photo box, then offset and scale.

use badgesmith_badge_model::geometry::Rect;
use badgesmith_badge_model::transform::PhotoTransform;
use serde::Serialize;

/// Photo size after cover fitting, before the user transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FittedSize {
    pub width: f64,
    pub height: f64,
}

/// Where the photo lands in logical frame units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhotoPlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PhotoPlacement {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Scale a `image_w` x `image_h` photo so it covers `target` completely.
///
/// A photo relatively wider than the box is fitted to the box height and
/// overflows horizontally; otherwise it is fitted to the width and
/// overflows vertically. Returns `None` for an empty image.
pub fn cover_fit(image_w: u32, image_h: u32, target: &Rect) -> Option<FittedSize> {
    if image_w == 0 || image_h == 0 {
        return None;
    }
    let image_aspect = image_w as f64 / image_h as f64;
    if image_aspect > target.aspect() {
        Some(FittedSize {
            width: target.h * image_aspect,
            height: target.h,
        })
    } else {
        Some(FittedSize {
            width: target.w,
            height: target.w / image_aspect,
        })
    }
}

/// Cover fit, apply the transform scale, centre in the box, then shift by the offset.
pub fn place_photo(
    image_w: u32,
    image_h: u32,
    photo_box: &Rect,
    transform: &PhotoTransform,
) -> Option<PhotoPlacement> {
    let fitted = cover_fit(image_w, image_h, photo_box)?;
    let width = fitted.width * transform.scale();
    let height = fitted.height * transform.scale();
    let (dx, dy) = transform.offset();
    Some(PhotoPlacement {
        x: photo_box.x + dx + (photo_box.w - width) / 2.0,
        y: photo_box.y + dy + (photo_box.h - height) / 2.0,
        width,
        height,
    })
}
