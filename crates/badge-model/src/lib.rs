//! Badgesmith Badge Model
//!
//! Defines the data contracts the compositor renders from:
//! - **Geometry:** the fixed 1200x627 logical frame, the photo box, and display sizing
//! - **Transform:** user-controlled photo offset and floor-clamped scale
//! - **Events:** pointer, touch, and wheel gestures (JSONL scripts)
//! - **Session:** mutable badge state and the immutable snapshot handed to rendering
//!
//! Drawing coordinates are logical frame units; the display size only
//! decides how they are scaled onto device pixels.

pub mod event;
pub mod geometry;
pub mod session;
pub mod transform;
pub mod variant;

pub use event::*;
pub use geometry::*;
pub use session::*;
pub use transform::*;
pub use variant::*;
