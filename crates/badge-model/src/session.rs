//! Badge session state and render snapshots.
//!
//! [`BadgeSession`] is the mutable state that input handlers edit.
//! [`RenderState`] is the immutable snapshot the compositor draws from;
//! rendering the same snapshot always yields the same pixels.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::geometry::{DisplaySize, Rect};
use crate::transform::PhotoTransform;
use crate::variant::BadgeVariant;

/// Caption shown before the user types anything.
pub const DEFAULT_CAPTION: &str = "Your name and title";

/// Where an image comes from before it is decoded.
#[derive(Clone, PartialEq)]
pub enum ImageSource {
    /// Image file on disk.
    File(PathBuf),

    /// Encoded image bytes already in memory (a picked file read in full).
    Encoded { name: String, bytes: Arc<[u8]> },

    /// Built-in avatar silhouette used until the user picks a photo.
    Placeholder,
}

impl ImageSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn encoded(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::Encoded {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Short human-readable name (file name for files).
    pub fn display_name(&self) -> String {
        match self {
            Self::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Encoded { name, .. } => name.clone(),
            Self::Placeholder => "placeholder".to_string(),
        }
    }
}

impl fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => f.debug_tuple("File").field(path).finish(),
            Self::Encoded { name, bytes } => f
                .debug_struct("Encoded")
                .field("name", name)
                .field("len", &bytes.len())
                .finish(),
            Self::Placeholder => f.write_str("Placeholder"),
        }
    }
}

/// Everything the compositor needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub background: ImageSource,
    pub photo: Option<ImageSource>,
    pub photo_box: Rect,
    pub transform: PhotoTransform,
    pub caption: String,
    pub display: DisplaySize,
}

/// Mutable badge state edited by the file picker, text field, and gestures.
#[derive(Debug, Clone)]
pub struct BadgeSession {
    variant: BadgeVariant,
    background: ImageSource,
    photo: Option<ImageSource>,
    transform: PhotoTransform,
    caption: String,
    display: DisplaySize,
}

impl BadgeSession {
    /// A fresh session for `variant`, with its background taken from `assets_dir`.
    pub fn new(variant: BadgeVariant, assets_dir: &Path) -> Self {
        Self {
            variant,
            background: ImageSource::File(variant.background_path(assets_dir)),
            photo: Some(ImageSource::Placeholder),
            transform: PhotoTransform::IDENTITY,
            caption: DEFAULT_CAPTION.to_string(),
            display: DisplaySize::LOGICAL,
        }
    }

    /// Replace the background template.
    pub fn with_background(mut self, background: ImageSource) -> Self {
        self.background = background;
        self
    }

    pub fn variant(&self) -> BadgeVariant {
        self.variant
    }

    /// Replace the user photo wholesale. The transform is left as is.
    pub fn set_photo(&mut self, photo: ImageSource) {
        self.photo = Some(photo);
    }

    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    /// Name of the currently selected photo, if any.
    pub fn photo_name(&self) -> Option<String> {
        self.photo.as_ref().map(ImageSource::display_name)
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    /// Size the surface for a screen of the given width.
    pub fn resize_for_screen(&mut self, screen_width: u32) {
        self.set_display(DisplaySize::fit_to_screen(screen_width));
    }

    pub fn set_display(&mut self, display: DisplaySize) {
        self.display = display;
    }

    pub fn display(&self) -> DisplaySize {
        self.display
    }

    pub fn transform(&self) -> PhotoTransform {
        self.transform
    }

    pub fn transform_mut(&mut self) -> &mut PhotoTransform {
        &mut self.transform
    }

    /// Freeze the current state for rendering.
    pub fn snapshot(&self) -> RenderState {
        RenderState {
            background: self.background.clone(),
            photo: self.photo.clone(),
            photo_box: Rect::PHOTO_BOX,
            transform: self.transform,
            caption: self.caption.clone(),
            display: self.display,
        }
    }
}
