//! Badge compositor: draws a [`RenderState`] onto a surface.
//!
//! A render is a chain of two gated stages. The background is drawn only
//! once it has decoded, and the photo only once it has decoded too.
//! Every render starts from a cleared surface, so the output depends on
//! the snapshot alone.

use badgesmith_badge_model::geometry::Rect;
use badgesmith_badge_model::session::{ImageSource, RenderState};
use badgesmith_common::error::BadgeResult;
use serde::Serialize;

use crate::assets::{decode_source, DecodedImage};
use crate::export::encode_png;
use crate::fit::{place_photo, PhotoPlacement};
use crate::surface::Surface;
use crate::text::{
    layout_caption, ApproxMeasure, CaptionFont, CaptionLine, TextMeasure, CAPTION_COLOR,
    CAPTION_FONT_PX,
};

/// How far a render got. Later stages compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStage {
    /// No drawable surface; nothing happened.
    SurfaceUnavailable,
    /// Surface cleared, background not drawn (decode failed).
    Cleared,
    /// Background drawn; photo decode failed or is still to come.
    BackgroundDrawn,
    /// Photo drawn inside the box.
    PhotoDrawn,
    /// Caption drawn; the frame is finished.
    Complete,
}

/// Where things landed, without drawing anything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub photo: Option<PhotoPlacement>,
    pub caption: Vec<CaptionLine>,
}

/// Outcome of one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    pub stage: RenderStage,
    pub photo: Option<PhotoPlacement>,
    pub caption: Vec<CaptionLine>,
    /// False when no caption font was available and only layout ran.
    pub caption_rasterized: bool,
}

impl RenderReport {
    fn at(stage: RenderStage) -> Self {
        Self {
            stage,
            photo: None,
            caption: Vec::new(),
            caption_rasterized: false,
        }
    }
}

/// Compute photo placement and caption lines for `state`.
///
/// `photo_size` is the decoded photo's pixel size; `None` skips placement.
pub fn plan_layout(
    state: &RenderState,
    photo_size: Option<(u32, u32)>,
    measure: &dyn TextMeasure,
) -> LayoutPlan {
    let photo = photo_size.and_then(|(w, h)| place_photo(w, h, &state.photo_box, &state.transform));
    LayoutPlan {
        photo,
        caption: layout_caption(&state.caption, &state.photo_box, measure),
    }
}

/// Owns the drawing surface and the decoded background.
#[derive(Debug, Default)]
pub struct Compositor {
    font: Option<CaptionFont>,
    fallback_measure: ApproxMeasure,
    background: Option<(ImageSource, DecodedImage)>,
    surface: Option<Surface>,
    warned_missing_font: bool,
}

impl Compositor {
    /// A compositor drawing captions with `font`; `None` lays captions out without glyphs.
    pub fn new(font: Option<CaptionFont>) -> Self {
        Self {
            font,
            ..Self::default()
        }
    }

    /// The surface of the last render, if it had one.
    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Measurement used for wrapping: the caption font, or a fixed-advance fallback.
    pub fn measure(&self) -> &dyn TextMeasure {
        match &self.font {
            Some(font) => font,
            None => &self.fallback_measure,
        }
    }

    /// Redraw the whole frame from `state`.
    pub async fn render(&mut self, state: &RenderState) -> RenderReport {
        match self.surface.as_mut() {
            Some(surface) if surface.display() == state.display => surface.clear(),
            _ => self.surface = Surface::new(state.display),
        }
        if self.surface.is_none() {
            tracing::debug!(
                width = state.display.width,
                height = state.display.height,
                "No drawable surface, skipping render"
            );
            return RenderReport::at(RenderStage::SurfaceUnavailable);
        }
        let mut report = RenderReport::at(RenderStage::Cleared);

        // Stage 1: background.
        let background = match self.background_image(&state.background).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(error = %e, "Background did not load, frame left blank");
                return report;
            }
        };
        if let Some(surface) = self.surface.as_mut() {
            surface.draw_image(&background, &Rect::FRAME, None);
        }
        report.stage = RenderStage::BackgroundDrawn;
        tracing::debug!(stage = ?report.stage, "Render stage reached");

        // Stage 2: photo.
        let mut photo_size = None;
        let mut photo_image = None;
        if let Some(source) = &state.photo {
            match decode_source(source).await {
                Ok(image) => {
                    photo_size = Some(image.dimensions());
                    photo_image = Some(image);
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        photo = %source.display_name(),
                        "Photo did not load, stopping after background"
                    );
                    return report;
                }
            }
        }

        let plan = plan_layout(state, photo_size, self.measure());
        let Some(surface) = self.surface.as_mut() else {
            return report;
        };

        if let (Some(image), Some(placement)) = (&photo_image, &plan.photo) {
            surface.draw_image(image, &placement.rect(), Some(&state.photo_box));
            report.stage = RenderStage::PhotoDrawn;
            tracing::debug!(
                x = placement.x,
                y = placement.y,
                width = placement.width,
                height = placement.height,
                "Photo placed"
            );
        }

        // Caption.
        match &self.font {
            Some(font) => {
                for line in &plan.caption {
                    surface.fill_text(
                        font.font(),
                        CAPTION_FONT_PX,
                        &line.text,
                        line.x,
                        line.baseline_y,
                        CAPTION_COLOR,
                    );
                }
                report.caption_rasterized = true;
            }
            None => {
                if !self.warned_missing_font {
                    tracing::warn!("No caption font available, caption is laid out but not drawn");
                    self.warned_missing_font = true;
                }
            }
        }

        report.photo = plan.photo;
        report.caption = plan.caption;
        report.stage = RenderStage::Complete;
        tracing::debug!(lines = report.caption.len(), "Render complete");
        report
    }

    /// Encode the current surface as PNG; `None` when there is no surface.
    pub fn export(&self) -> BadgeResult<Option<Vec<u8>>> {
        match &self.surface {
            Some(surface) => encode_png(surface.pixels()).map(Some),
            None => Ok(None),
        }
    }

    async fn background_image(&mut self, source: &ImageSource) -> BadgeResult<DecodedImage> {
        if let Some((cached_source, image)) = &self.background {
            if cached_source == source {
                return Ok(image.clone());
            }
        }
        let image = decode_source(source).await?;
        self.background = Some((source.clone(), image.clone()));
        Ok(image)
    }
}
