//! Badgesmith Render Engine
//!
//! Draws the badge composite and exports it as PNG.
//!
//! # Pipeline
//!
//! ```text
//! clear surface
//!      │
//!      ▼
//! background decoded ──► draw background (0,0,1200,627)
//!                              │
//!                              ▼
//! photo decoded ───────► cover fit × transform, clipped to photo box
//!                              │
//!                              ▼
//!                        caption word-wrap (318 wide, 24 line height)
//!                              │
//!                              ▼
//!                        badge.png
//! ```
//!
//! Each draw stage waits on its own decode; a failed decode stops the
//! pipeline at the previous stage instead of drawing a partial frame.

pub mod assets;
pub mod compositor;
pub mod export;
pub mod fit;
pub mod surface;
pub mod text;

pub use compositor::*;
pub use export::*;
