use badgesmith_badge_model::geometry::{DisplaySize, Rect};
use badgesmith_badge_model::session::{BadgeSession, ImageSource, RenderState};
use badgesmith_badge_model::transform::PhotoTransform;
use badgesmith_badge_model::variant::BadgeVariant;
use badgesmith_render_engine::export::{encode_png, export_badge, ExportJob};
use badgesmith_render_engine::text::CaptionFont;
use badgesmith_render_engine::{Compositor, RenderStage};
use image::{Rgba, RgbaImage};

const BLUE: [u8; 4] = [0, 0, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];

fn solid_png(name: &str, width: u32, height: u32, color: [u8; 4]) -> ImageSource {
    let img = RgbaImage::from_pixel(width, height, Rgba(color));
    ImageSource::encoded(name, encode_png(&img).expect("encode fixture"))
}

fn base_state(display: DisplaySize) -> RenderState {
    RenderState {
        background: solid_png("background.png", 60, 32, BLUE),
        photo: None,
        photo_box: Rect::PHOTO_BOX,
        transform: PhotoTransform::IDENTITY,
        caption: "Alex Rivera, Staff Engineer".to_string(),
        display,
    }
}

/// Logical centre of a device pixel on a surface of `display` size.
fn logical_centre(display: DisplaySize, x: u32, y: u32) -> (f64, f64) {
    let (sx, sy) = display.scale_factors();
    ((x as f64 + 0.5) / sx, (y as f64 + 0.5) / sy)
}

#[tokio::test]
async fn renders_background_and_caption_without_photo() {
    let mut compositor = Compositor::new(None);
    let state = base_state(DisplaySize::new(240, 125));

    let report = compositor.render(&state).await;

    assert_eq!(report.stage, RenderStage::Complete);
    assert!(report.photo.is_none());
    assert!(!report.caption_rasterized);
    assert!(!report.caption.is_empty() && report.caption.len() <= 2);
    assert_eq!(report.caption[0].baseline_y, 550.0);
    for line in &report.caption {
        assert!(line.width <= 318.0);
    }

    let surface = compositor.surface().expect("surface after render");
    assert_eq!(surface.pixels().dimensions(), (240, 125));
    assert!(surface.pixels().pixels().all(|p| p.0[2] > 250 && p.0[0] < 3));
}

#[tokio::test]
async fn rendering_the_same_state_twice_is_pixel_identical() {
    let mut compositor = Compositor::new(None);
    let mut state = base_state(DisplaySize::new(300, 157));
    state.photo = Some(solid_png("photo.png", 40, 30, RED));
    state.transform = PhotoTransform::new(-12.0, 7.5, 1.35);

    compositor.render(&state).await;
    let first = compositor.export().unwrap().unwrap();
    compositor.render(&state).await;
    let second = compositor.export().unwrap().unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn photo_never_escapes_the_box() {
    let display = DisplaySize::new(600, 313);
    let mut compositor = Compositor::new(None);
    let mut state = base_state(display);
    state.photo = Some(solid_png("photo.png", 50, 50, RED));
    state.transform = PhotoTransform::new(-90.0, 60.0, 3.0);

    let report = compositor.render(&state).await;
    assert_eq!(report.stage, RenderStage::Complete);
    let placement = report.photo.expect("photo placed");
    assert!(placement.width > Rect::PHOTO_BOX.w);

    let pixels = compositor.surface().unwrap().pixels();
    let mut inside_red = 0;
    for (x, y, p) in pixels.enumerate_pixels() {
        let (lx, ly) = logical_centre(display, x, y);
        if Rect::PHOTO_BOX.contains(lx, ly) {
            if p.0[0] > 250 {
                inside_red += 1;
            }
        } else {
            assert!(p.0[0] < 3, "photo leaked to ({x},{y})");
        }
    }
    assert!(inside_red > 0);
}

#[tokio::test]
async fn undecodable_photo_stops_after_background() {
    let mut compositor = Compositor::new(None);
    let mut state = base_state(DisplaySize::new(120, 63));
    state.photo = Some(ImageSource::encoded("broken.png", b"not a png".to_vec()));

    let report = compositor.render(&state).await;

    assert_eq!(report.stage, RenderStage::BackgroundDrawn);
    assert!(report.caption.is_empty());
    let surface = compositor.surface().unwrap();
    assert!(surface.pixels().pixels().all(|p| p.0[2] > 250));
}

#[tokio::test]
async fn missing_background_leaves_cleared_surface() {
    let mut compositor = Compositor::new(None);
    let mut state = base_state(DisplaySize::new(120, 63));
    state.background = ImageSource::file("/nonexistent/badgesmith/joinme_attending.jpg");

    let report = compositor.render(&state).await;

    assert_eq!(report.stage, RenderStage::Cleared);
    let surface = compositor.surface().unwrap();
    assert!(surface.pixels().pixels().all(|p| p.0 == [0, 0, 0, 0]));
}

#[tokio::test]
async fn zero_sized_display_is_a_no_op() {
    let mut compositor = Compositor::new(None);
    compositor.render(&base_state(DisplaySize::new(120, 63))).await;
    assert!(compositor.surface().is_some());

    let report = compositor.render(&base_state(DisplaySize::new(0, 0))).await;

    assert_eq!(report.stage, RenderStage::SurfaceUnavailable);
    assert!(compositor.surface().is_none());
    assert!(compositor.export().unwrap().is_none());
}

#[tokio::test]
async fn resizing_between_renders_does_not_compound_scale() {
    let mut compositor = Compositor::new(None);
    let mut state = base_state(DisplaySize::new(300, 157));
    state.photo = Some(solid_png("photo.png", 40, 40, RED));

    compositor.render(&state).await;
    let small_first = compositor.export().unwrap().unwrap();

    state.display = DisplaySize::LOGICAL;
    compositor.render(&state).await;
    assert_eq!(
        compositor.surface().unwrap().pixels().dimensions(),
        (1200, 627)
    );

    state.display = DisplaySize::new(300, 157);
    compositor.render(&state).await;
    assert_eq!(compositor.export().unwrap().unwrap(), small_first);
}

#[tokio::test]
async fn session_with_placeholder_photo_completes() {
    let mut session = BadgeSession::new(BadgeVariant::Attending, std::path::Path::new("assets"))
        .with_background(solid_png("background.png", 12, 6, BLUE));
    session.resize_for_screen(500);
    session.set_caption("");

    let mut compositor = Compositor::new(None);
    let report = compositor.render(&session.snapshot()).await;

    assert_eq!(report.stage, RenderStage::Complete);
    assert!(report.photo.is_some());
    assert_eq!(report.caption.len(), 1);
    assert_eq!(report.caption[0].text, "");
}

#[tokio::test]
async fn export_writes_badge_png_at_display_size() {
    let dir = std::env::temp_dir().join(format!("badgesmith-export-{}", std::process::id()));
    let mut compositor = Compositor::new(None);
    compositor
        .render(&base_state(DisplaySize::new(200, 104)))
        .await;

    let written = export_badge(&compositor, &ExportJob::new(&dir))
        .await
        .unwrap()
        .expect("file written");

    assert_eq!(written.file_name().unwrap(), "badge.png");
    let decoded = image::open(&written).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (200, 104));
    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn caption_is_rasterized_in_white_under_the_photo_box() {
    let Some(font) = CaptionFont::discover(None) else {
        eprintln!("no system font found, skipping");
        return;
    };
    let mut compositor = Compositor::new(Some(font));
    let state = base_state(DisplaySize::LOGICAL);

    let report = compositor.render(&state).await;

    assert_eq!(report.stage, RenderStage::Complete);
    assert!(report.caption_rasterized);
    assert_eq!(report.caption[0].baseline_y, 550.0);
    for line in &report.caption {
        assert_eq!(line.x, 810.0);
        assert!(line.width <= 318.0, "{:?} measures {}", line.text, line.width);
    }
    let last_baseline = report.caption.last().map(|l| l.baseline_y).unwrap_or(550.0);

    // Only the caption puts any red into a blue frame with no photo.
    let pixels = compositor.surface().unwrap().pixels();
    let mut white = 0;
    for (x, y, p) in pixels.enumerate_pixels() {
        if p.0[0] == 0 {
            continue;
        }
        assert!((808..=1130).contains(&x), "caption ink at x={x}");
        let y = y as f64;
        assert!(y >= 550.0 - 24.0 && y <= last_baseline + 8.0, "caption ink at y={y}");
        if p.0[0] > 250 && p.0[1] > 250 {
            white += 1;
        }
    }
    assert!(white > 0);

    let first = compositor.export().unwrap().unwrap();
    compositor.render(&state).await;
    assert_eq!(compositor.export().unwrap().unwrap(), first);
}
