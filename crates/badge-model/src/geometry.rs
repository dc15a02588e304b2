//! Frame, photo box, and display sizing.
//!
//! All rectangles are in logical frame units: `(0.0, 0.0)` is the top-left
//! of the 1200x627 badge regardless of how large it is displayed.

use serde::{Deserialize, Serialize};

/// Logical frame width.
pub const FRAME_WIDTH: f64 = 1200.0;

/// Logical frame height.
pub const FRAME_HEIGHT: f64 = 627.0;

/// Horizontal padding kept around the surface on narrow screens.
pub const SCREEN_PADDING: u32 = 20;

/// An axis-aligned rectangle in logical frame units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl Rect {
    /// The whole badge frame.
    pub const FRAME: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: FRAME_WIDTH,
        h: FRAME_HEIGHT,
    };

    /// Region reserved for the user's photo.
    pub const PHOTO_BOX: Rect = Rect {
        x: 810.0,
        y: 155.0,
        w: 318.0,
        h: 365.0,
    };

    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Width over height.
    pub fn aspect(&self) -> f64 {
        self.w / self.h
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Whether the point lies inside the rectangle (right/bottom exclusive).
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Overlap of two rectangles, or `None` when they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}

/// Size of the drawing surface in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: u32,
    pub height: u32,
}

impl DisplaySize {
    /// The frame shown at 1:1.
    pub const LOGICAL: DisplaySize = DisplaySize {
        width: 1200,
        height: 627,
    };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size the surface for a screen of the given width.
    ///
    /// Narrow screens get the frame shrunk to `screen_width - 20` with the
    /// 1200:627 aspect kept; anything at least 1200 wide shows the frame 1:1.
    pub fn fit_to_screen(screen_width: u32) -> Self {
        let max_width = FRAME_WIDTH as u32;
        if screen_width >= max_width {
            return Self::LOGICAL;
        }
        let width = screen_width.saturating_sub(SCREEN_PADDING);
        let aspect = FRAME_WIDTH / FRAME_HEIGHT;
        let height = (width as f64 / aspect) as u32;
        Self { width, height }
    }

    /// A surface with a zero dimension cannot be drawn on.
    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Factors mapping logical units onto device pixels `(sx, sy)`.
    pub fn scale_factors(&self) -> (f64, f64) {
        (
            self.width as f64 / FRAME_WIDTH,
            self.height as f64 / FRAME_HEIGHT,
        )
    }
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self::LOGICAL
    }
}
