//! In-memory drawing surface.
//!
//! Callers draw in logical frame units; the surface maps them onto device
//! pixels with the scale factors of its display size. The factors are
//! fixed at construction, so nothing compounds across renders.

use badgesmith_badge_model::geometry::{DisplaySize, Rect};
use image::imageops::sample_bilinear;
use image::{Pixel, Rgba, RgbaImage};
use imageproc::rect::Rect as PixelRect;
use rusttype::{point, Font, Scale};

/// An RGBA raster at display size.
#[derive(Debug, Clone)]
pub struct Surface {
    pixels: RgbaImage,
    display: DisplaySize,
    scale_x: f64,
    scale_y: f64,
}

impl Surface {
    /// A transparent surface, or `None` when the display has no area.
    pub fn new(display: DisplaySize) -> Option<Self> {
        if !display.is_drawable() {
            return None;
        }
        let (scale_x, scale_y) = display.scale_factors();
        Some(Self {
            pixels: RgbaImage::new(display.width, display.height),
            display,
            scale_x,
            scale_y,
        })
    }

    pub fn display(&self) -> DisplaySize {
        self.display
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        for pixel in self.pixels.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Draw `image` stretched onto `dest`, touching only pixels inside `clip`.
    ///
    /// A device pixel is painted when its centre falls inside both `dest`
    /// and `clip`; the source is sampled bilinearly.
    pub fn draw_image(&mut self, image: &RgbaImage, dest: &Rect, clip: Option<&Rect>) {
        if dest.w <= 0.0 || dest.h <= 0.0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let area = match clip {
            Some(clip) => match dest.intersect(clip) {
                Some(area) => area,
                None => return,
            },
            None => *dest,
        };
        let Some(region) = self.device_region(&area) else {
            return;
        };

        for py in region.top()..=region.bottom() {
            for px in region.left()..=region.right() {
                let lx = (px as f64 + 0.5) / self.scale_x;
                let ly = (py as f64 + 0.5) / self.scale_y;
                if !area.contains(lx, ly) {
                    continue;
                }
                let u = ((lx - dest.x) / dest.w) as f32;
                let v = ((ly - dest.y) / dest.h) as f32;
                if let Some(src) = sample_bilinear(image, u, v) {
                    self.pixels.get_pixel_mut(px as u32, py as u32).blend(&src);
                }
            }
        }
    }

    /// Rasterize one line of text with its left end at `x` and baseline at `baseline_y`.
    pub fn fill_text(
        &mut self,
        font: &Font<'static>,
        px: f32,
        text: &str,
        x: f64,
        baseline_y: f64,
        color: Rgba<u8>,
    ) {
        let scale = Scale {
            x: px * self.scale_x as f32,
            y: px * self.scale_y as f32,
        };
        let origin = point((x * self.scale_x) as f32, (baseline_y * self.scale_y) as f32);
        let (width, height) = self.pixels.dimensions();

        for glyph in font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let tx = gx as i32 + bb.min.x;
                let ty = gy as i32 + bb.min.y;
                if tx < 0 || ty < 0 || tx as u32 >= width || ty as u32 >= height {
                    return;
                }
                let alpha = (coverage * color.0[3] as f32).round() as u8;
                if alpha == 0 {
                    return;
                }
                let src = Rgba([color.0[0], color.0[1], color.0[2], alpha]);
                self.pixels.get_pixel_mut(tx as u32, ty as u32).blend(&src);
            });
        }
    }

    /// Device pixels covered by a logical rectangle, clamped to the surface.
    fn device_region(&self, rect: &Rect) -> Option<PixelRect> {
        let x0 = (rect.x * self.scale_x).floor() as i64;
        let y0 = (rect.y * self.scale_y).floor() as i64;
        let x1 = (rect.right() * self.scale_x).ceil() as i64;
        let y1 = (rect.bottom() * self.scale_y).ceil() as i64;
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        let bounds = PixelRect::at(0, 0).of_size(self.display.width, self.display.height);
        let wanted = PixelRect::at(
            x0.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
            y0.clamp(i32::MIN as i64, i32::MAX as i64) as i32,
        )
        .of_size(
            (x1 - x0).min(u32::MAX as i64) as u32,
            (y1 - y0).min(u32::MAX as i64) as u32,
        );
        bounds.intersect(wanted)
    }
}
