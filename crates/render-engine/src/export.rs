//! PNG export of the composed badge.

use std::path::PathBuf;

use badgesmith_common::error::{BadgeError, BadgeResult};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::compositor::Compositor;

/// File name every export is written under.
pub const EXPORT_FILE_NAME: &str = "badge.png";

/// Where an export should be written.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Directory receiving the file; created if missing.
    pub output_dir: PathBuf,

    /// File name inside `output_dir`.
    pub file_name: String,
}

impl ExportJob {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

/// Encode an RGBA raster as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> BadgeResult<Vec<u8>> {
    let mut out = Vec::new();
    PngEncoder::new(&mut out)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| BadgeError::export(format!("PNG encoding failed: {e}")))?;
    Ok(out)
}

/// Write the compositor's current surface to the job's output path.
///
/// Returns `Ok(None)` without touching the filesystem when there is no
/// surface to export.
pub async fn export_badge(
    compositor: &Compositor,
    job: &ExportJob,
) -> BadgeResult<Option<PathBuf>> {
    let Some(png) = compositor.export()? else {
        tracing::debug!("No surface to export");
        return Ok(None);
    };

    tokio::fs::create_dir_all(&job.output_dir).await?;
    let path = job.output_path();
    tokio::fs::write(&path, &png).await?;
    tracing::info!(path = %path.display(), bytes = png.len(), "Badge exported");
    Ok(Some(path))
}
