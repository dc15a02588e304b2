//! Compose a badge and export it.

use std::path::PathBuf;

use badgesmith_common::config::AppConfig;
use badgesmith_render_engine::export::{export_badge, ExportJob};
use badgesmith_render_engine::{Compositor, RenderStage};

use super::inputs::BadgeArgs;

pub async fn run(
    args: BadgeArgs,
    output: Option<PathBuf>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let session = args.build_session(config)?;
    let mut compositor = Compositor::new(args.caption_font(config));

    let display = session.display();
    println!(
        "Rendering {} badge at {}x{}",
        session.variant(),
        display.width,
        display.height
    );
    if let Some(photo) = session.photo_name() {
        let transform = session.transform();
        let (dx, dy) = transform.offset();
        println!(
            "  Photo:   {photo} (offset {dx:.1},{dy:.1} scale {:.2})",
            transform.scale()
        );
    }

    let report = compositor.render(&session.snapshot()).await;
    tracing::info!(stage = ?report.stage, "Render finished");

    match report.stage {
        RenderStage::Complete => {}
        RenderStage::SurfaceUnavailable => {
            println!("Nothing to draw: the display has no area.");
            return Ok(());
        }
        RenderStage::Cleared => println!("[WARN] Background template did not load"),
        RenderStage::BackgroundDrawn | RenderStage::PhotoDrawn => {
            println!("[WARN] Photo did not load, badge has background only")
        }
    }
    if let Some(placement) = &report.photo {
        println!(
            "  Placed:  {:.1},{:.1} {:.1}x{:.1}",
            placement.x, placement.y, placement.width, placement.height
        );
    }
    for line in &report.caption {
        println!("  Caption: {:?}", line.text);
    }
    if !report.caption.is_empty() && !compositor.has_font() {
        println!("[WARN] No caption font found, caption text was not drawn");
    }

    let job = ExportJob::new(output.unwrap_or_else(|| config.output_dir.clone()));
    match export_badge(&compositor, &job).await? {
        Some(path) => println!("Badge written: {}", path.display()),
        None => println!("No surface to export."),
    }

    Ok(())
}
