//! Caption measurement, greedy word wrap, and line layout.

use std::path::{Path, PathBuf};

use badgesmith_badge_model::geometry::Rect;
use badgesmith_common::error::{BadgeError, BadgeResult};
use image::Rgba;
use rusttype::{point, Font, Scale};
use serde::Serialize;

/// Caption font size in logical units.
pub const CAPTION_FONT_PX: f32 = 20.0;

/// Distance between successive caption baselines.
pub const CAPTION_LINE_HEIGHT: f64 = 24.0;

/// First caption baseline sits this far below the photo box.
pub const CAPTION_BASELINE_GAP: f64 = 30.0;

pub const CAPTION_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Sans-serif fonts probed when no font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Measures the advance width of a run of text.
pub trait TextMeasure {
    /// Width of `text` at `px` size, in the same units as `px`.
    fn measure(&self, text: &str, px: f32) -> f32;
}

/// A TrueType caption font.
pub struct CaptionFont {
    font: Font<'static>,
    path: PathBuf,
}

impl CaptionFont {
    /// Load a TrueType/OpenType font file.
    pub fn load(path: &Path) -> BadgeResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| BadgeError::from_io_at(e, path))?;
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| BadgeError::font(format!("{} is not a usable font", path.display())))?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// Load the configured font, or the first system font that loads.
    pub fn discover(configured: Option<&Path>) -> Option<Self> {
        if let Some(path) = configured {
            match Self::load(path) {
                Ok(font) => return Some(font),
                Err(e) => tracing::warn!(error = %e, "Configured caption font unusable"),
            }
        }
        FONT_CANDIDATES
            .iter()
            .map(Path::new)
            .filter(|p| p.exists())
            .find_map(|p| Self::load(p).ok())
    }

    pub fn font(&self) -> &Font<'static> {
        &self.font
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("path", &self.path)
            .finish()
    }
}

impl TextMeasure for CaptionFont {
    fn measure(&self, text: &str, px: f32) -> f32 {
        let scale = Scale::uniform(px);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }
}

/// Fixed-advance measurement used when no font file is available.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasure {
    /// Advance of every character as a fraction of the font size.
    pub advance_em: f32,
}

impl Default for ApproxMeasure {
    fn default() -> Self {
        Self { advance_em: 0.5 }
    }
}

impl TextMeasure for ApproxMeasure {
    fn measure(&self, text: &str, px: f32) -> f32 {
        text.chars().count() as f32 * px * self.advance_em
    }
}

/// One positioned caption line, trimmed and ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionLine {
    pub text: String,
    pub x: f64,
    pub baseline_y: f64,
    /// Measured width of the trimmed text.
    pub width: f64,
}

/// Greedy word wrap.
///
/// Words are split on single spaces and appended with a trailing space.
/// When a candidate line measures wider than `max_width` and the current
/// line is not empty, the current line is committed and the word starts a
/// new one. The last line is always committed, so empty input yields one
/// empty line. Returned lines keep their trailing whitespace.
pub fn wrap_caption(text: &str, max_width: f32, px: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = format!("{current}{word} ");
        if measure.measure(&candidate, px) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current = format!("{word} ");
        } else {
            current = candidate;
        }
    }
    lines.push(current);
    lines
}

/// Wrap `text` to the photo box width and position each line under the box.
pub fn layout_caption(text: &str, photo_box: &Rect, measure: &dyn TextMeasure) -> Vec<CaptionLine> {
    let first_baseline = photo_box.bottom() + CAPTION_BASELINE_GAP;
    wrap_caption(text, photo_box.w as f32, CAPTION_FONT_PX, measure)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let text = line.trim().to_string();
            let width = measure.measure(&text, CAPTION_FONT_PX) as f64;
            CaptionLine {
                text,
                x: photo_box.x,
                baseline_y: first_baseline + i as f64 * CAPTION_LINE_HEIGHT,
                width,
            }
        })
        .collect()
}
