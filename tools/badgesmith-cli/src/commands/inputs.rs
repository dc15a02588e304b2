//! Badge inputs shared by `render` and `layout`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use badgesmith_badge_model::event::parse_gestures;
use badgesmith_badge_model::session::{BadgeSession, ImageSource};
use badgesmith_badge_model::transform::PhotoTransform;
use badgesmith_badge_model::variant::{BadgeVariant, UnknownVariant};
use badgesmith_common::config::AppConfig;
use badgesmith_input_tracker::GestureTracker;
use badgesmith_render_engine::text::CaptionFont;

#[derive(Args, Debug, Clone)]
pub struct BadgeArgs {
    /// Badge variant: speaking or attending (route form `/speaking` also accepted)
    #[arg(long)]
    pub variant: Option<String>,

    /// Background template overriding the variant's default
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Profile photo
    #[arg(long, conflicts_with = "no_photo")]
    pub photo: Option<PathBuf>,

    /// Render without any photo
    #[arg(long)]
    pub no_photo: bool,

    /// Name and title caption
    #[arg(long)]
    pub caption: Option<String>,

    /// Horizontal photo offset in frame units
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub offset_x: f64,

    /// Vertical photo offset in frame units
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub offset_y: f64,

    /// Photo scale (floored at 0.1)
    #[arg(long, default_value = "1.0")]
    pub scale: f64,

    /// JSONL gesture script replayed on top of the offset/scale
    #[arg(long)]
    pub gestures: Option<PathBuf>,

    /// Screen width to size the surface for (full 1200x627 when omitted)
    #[arg(long)]
    pub screen_width: Option<u32>,

    /// TrueType font for the caption
    #[arg(long)]
    pub font: Option<PathBuf>,
}

impl BadgeArgs {
    /// Build the badge session these arguments describe.
    pub fn build_session(&self, config: &AppConfig) -> anyhow::Result<BadgeSession> {
        let name = self.variant.as_deref().unwrap_or(&config.badge.default_variant);
        let variant =
            BadgeVariant::from_route(name).ok_or_else(|| UnknownVariant(name.to_string()))?;

        let mut session = BadgeSession::new(variant, &config.badge.assets_dir);
        if let Some(background) = &self.background {
            session = session.with_background(ImageSource::file(background));
        }

        if self.no_photo {
            session.clear_photo();
        } else if let Some(path) = &self.photo {
            // Read the picked file in full, like a browser file reader would.
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read photo {}", path.display()))?;
            let name = ImageSource::file(path).display_name();
            session.set_photo(ImageSource::encoded(name, bytes));
        } else if let Some(placeholder) = &config.badge.placeholder_photo {
            session.set_photo(ImageSource::file(placeholder));
        }

        session.set_caption(
            self.caption
                .clone()
                .unwrap_or_else(|| config.badge.default_caption.clone()),
        );

        if let Some(width) = self.screen_width {
            session.resize_for_screen(width);
        }

        *session.transform_mut() = PhotoTransform::new(self.offset_x, self.offset_y, self.scale);
        if let Some(script) = &self.gestures {
            let content = std::fs::read_to_string(script)
                .with_context(|| format!("Failed to read gesture script {}", script.display()))?;
            let events = parse_gestures(&content)
                .with_context(|| format!("Invalid gesture script {}", script.display()))?;
            let mut tracker = GestureTracker::new(config.gestures);
            tracker.replay(&events, session.transform_mut());
        }

        Ok(session)
    }

    /// The caption font from `--font`, the config, or the system.
    pub fn caption_font(&self, config: &AppConfig) -> Option<CaptionFont> {
        let configured = self.font.as_deref().or(config.badge.font_path.as_deref());
        CaptionFont::discover(configured)
    }
}
