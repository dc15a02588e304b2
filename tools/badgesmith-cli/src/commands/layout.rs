//! Print the layout of a badge as JSON.

use serde::Serialize;

use badgesmith_badge_model::geometry::{DisplaySize, Rect};
use badgesmith_badge_model::transform::PhotoTransform;
use badgesmith_common::config::AppConfig;
use badgesmith_render_engine::assets::probe_dimensions;
use badgesmith_render_engine::compositor::{plan_layout, LayoutPlan};
use badgesmith_render_engine::text::{ApproxMeasure, TextMeasure};

use super::inputs::BadgeArgs;

#[derive(Serialize)]
struct LayoutOutput {
    variant: String,
    display: DisplaySize,
    photo_box: Rect,
    transform: PhotoTransform,
    photo_size: Option<(u32, u32)>,
    measured_with: String,
    #[serde(flatten)]
    plan: LayoutPlan,
}

pub fn run(args: BadgeArgs, config: &AppConfig) -> anyhow::Result<()> {
    let session = args.build_session(config)?;
    let state = session.snapshot();

    let photo_size = match &state.photo {
        Some(source) => match probe_dimensions(source) {
            Ok(size) => Some(size),
            Err(e) => {
                tracing::warn!(error = %e, "Photo could not be probed, skipping placement");
                None
            }
        },
        None => None,
    };

    let font = args.caption_font(config);
    let fallback = ApproxMeasure::default();
    let (measure, measured_with): (&dyn TextMeasure, String) = match &font {
        Some(font) => (font as &dyn TextMeasure, font.path().display().to_string()),
        None => (&fallback, "approximate".to_string()),
    };

    let output = LayoutOutput {
        variant: session.variant().to_string(),
        display: state.display,
        photo_box: state.photo_box,
        transform: state.transform,
        photo_size,
        measured_with,
        plan: plan_layout(&state, photo_size, measure),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
