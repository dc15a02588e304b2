//! Check caption fonts and background templates.

use std::path::PathBuf;

use badgesmith_badge_model::geometry::{FRAME_HEIGHT, FRAME_WIDTH};
use badgesmith_badge_model::session::ImageSource;
use badgesmith_badge_model::variant::BadgeVariant;
use badgesmith_common::config::{config_file_path, AppConfig};
use badgesmith_render_engine::assets::probe_dimensions;
use badgesmith_render_engine::text::CaptionFont;

pub fn run(font: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<()> {
    println!("Badgesmith Check");
    println!("{}", "=".repeat(50));

    let config_path = config_file_path();
    if !config_path.exists() {
        println!(
            "[INFO] Config: defaults (run `badgesmith init` to write {})",
            config_path.display()
        );
    } else if let Err(e) = AppConfig::load_from(&config_path) {
        println!("[WARN] Config: invalid ({e}), using defaults");
        println!("     File: {}", config_path.display());
    } else {
        println!("[OK] Config: {}", config_path.display());
    }

    // Caption font
    let configured = font.as_deref().or(config.badge.font_path.as_deref());
    let font_ok = match CaptionFont::discover(configured) {
        Some(found) => {
            println!("[OK] Caption font: {}", found.path().display());
            true
        }
        None => {
            println!("[WARN] Caption font: none found, captions will not be drawn");
            if let Some(path) = configured {
                println!("     Tried: {}", path.display());
            }
            println!("     Fix: pass --font or set badge.font_path in the config");
            false
        }
    };

    // Background templates
    println!();
    println!("Assets directory: {}", config.badge.assets_dir.display());
    let mut backgrounds_ok = true;
    for variant in BadgeVariant::ALL {
        let path = variant.background_path(&config.badge.assets_dir);
        match probe_dimensions(&ImageSource::file(&path)) {
            Ok((w, h)) => {
                let note = if (w as f64, h as f64) == (FRAME_WIDTH, FRAME_HEIGHT) {
                    ""
                } else {
                    " (stretched to 1200x627)"
                };
                println!("[OK] {variant}: {} {w}x{h}{note}", path.display());
            }
            Err(e) => {
                backgrounds_ok = false;
                println!("[FAIL] {variant}: {e}");
            }
        }
    }

    if let Some(placeholder) = &config.badge.placeholder_photo {
        match probe_dimensions(&ImageSource::file(placeholder)) {
            Ok((w, h)) => println!("[OK] Placeholder photo: {} {w}x{h}", placeholder.display()),
            Err(e) => println!("[WARN] Placeholder photo: {e}"),
        }
    } else {
        println!("[INFO] Placeholder photo: built-in silhouette");
    }

    println!();
    match (backgrounds_ok, font_ok) {
        (true, true) => println!("Everything is in place. Badgesmith is ready."),
        (true, false) => println!("Badges will render, but without caption text."),
        _ => println!("Some background templates are missing. Badges for them render blank."),
    }

    Ok(())
}
