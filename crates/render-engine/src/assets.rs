//! Image decoding for backgrounds and photos.
//!
//! Decoding runs on the blocking pool; callers await the result, which is
//! the suspension point each render stage is gated on.

use std::io::Cursor;
use std::sync::Arc;

use badgesmith_badge_model::session::ImageSource;
use badgesmith_common::error::{BadgeError, BadgeResult};
use image::{ImageReader, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_ellipse_mut};

/// A decoded image shared between renders.
pub type DecodedImage = Arc<RgbaImage>;

/// Size of the built-in placeholder avatar (the photo box at 1:1).
pub const PLACEHOLDER_SIZE: (u32, u32) = (318, 365);

/// Decode any image source to RGBA.
pub async fn decode_source(source: &ImageSource) -> BadgeResult<DecodedImage> {
    match source {
        ImageSource::File(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .map_err(|e| BadgeError::from_io_at(e, path))?;
            decode_bytes(bytes.into(), path.display().to_string()).await
        }
        ImageSource::Encoded { name, bytes } => decode_bytes(bytes.clone(), name.clone()).await,
        ImageSource::Placeholder => Ok(Arc::new(placeholder_avatar())),
    }
}

async fn decode_bytes(bytes: Arc<[u8]>, label: String) -> BadgeResult<DecodedImage> {
    tokio::task::spawn_blocking(move || {
        let image = image::load_from_memory(&bytes)
            .map_err(|e| BadgeError::decode(format!("{label}: {e}")))?;
        tracing::debug!(
            source = %label,
            width = image.width(),
            height = image.height(),
            "Image decoded"
        );
        Ok(Arc::new(image.to_rgba8()))
    })
    .await
    .map_err(|e| BadgeError::decode(format!("decode task failed: {e}")))?
}

/// Read only the header of a source to learn its pixel size.
pub fn probe_dimensions(source: &ImageSource) -> BadgeResult<(u32, u32)> {
    match source {
        ImageSource::File(path) => image::image_dimensions(path).map_err(|e| match e {
            image::ImageError::IoError(io) => BadgeError::from_io_at(io, path),
            other => BadgeError::decode(format!("{}: {other}", path.display())),
        }),
        ImageSource::Encoded { name, bytes } => ImageReader::new(Cursor::new(&bytes[..]))
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| BadgeError::decode(format!("{name}: {e}"))),
        ImageSource::Placeholder => Ok(PLACEHOLDER_SIZE),
    }
}

/// Grey avatar silhouette shown until a photo is picked.
pub fn placeholder_avatar() -> RgbaImage {
    let (width, height) = PLACEHOLDER_SIZE;
    let mut img = RgbaImage::from_pixel(width, height, Rgba([203, 213, 225, 255]));
    let figure = Rgba([148, 163, 184, 255]);
    let cx = (width / 2) as i32;

    // Head
    draw_filled_circle_mut(&mut img, (cx, 140), 70, figure);
    // Shoulders, cut off by the bottom edge
    draw_filled_ellipse_mut(&mut img, (cx, height as i32), 140, 130, figure);

    img
}
