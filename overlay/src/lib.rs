//! Spotlight overlay preview
//!
//! Paints composed overlay trees into pixel buffers so a tour step can be
//! inspected without a browser.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    renderer                         │
//! │     overlay layer + spotlights, blend composite     │
//! ├─────────────────────────────────────────────────────┤
//! │                    colors                           │
//! │        CSS color parsing (csscolorparser)           │
//! ├─────────────────────────────────────────────────────┤
//! │                    tiny-skia                        │
//! │              (drawing primitives)                   │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod colors;
pub mod error;
pub mod renderer;

pub use error::PreviewError;
pub use renderer::{Viewport, render_preview, save_png};

// Re-export tiny_skia types for external use
pub use tiny_skia::{Color, Pixmap};
