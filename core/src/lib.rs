//! Spotlight overlay engine
//!
//! Computes the cut-out rectangles of a guided-tour overlay and coordinates
//! their lifecycle against a host document.
//!
//! # Architecture
//!
//! ```text
//! Target ──resolve──► elements ──► compute_rectangles ──► SpotlightRect[]
//!                                        ▲                    │
//!                                        │                    ├─► hit testing
//!  Host signals ──► SpotlightCoordinator ┘                    └─► compose ──► OverlayVisual
//!  (scroll, resize, pointer, timers)
//! ```
//!
//! The host document, event loop and rendering environment are reached only
//! through the [`Document`], [`Host`] and [`Environment`] traits.

pub mod compose;
pub mod config;
pub mod dom;
pub mod error;
pub mod geometry;
pub mod lifecycle;
pub mod spotlight;

// Re-exports for convenience
pub use compose::{Environment, OverlayVisual, StaticEnvironment, VisualNode, compose};
pub use config::{SpotlightConfig, load_config};
pub use dom::{
    CssPosition, Document, DocumentMetrics, ElementId, ElementNode, Overflow, OverflowValue,
    PointerPosition, Rect, ScrollAnchor, ScrollBox, ScrollOffset, StaticDocument, Target,
};
pub use error::ConfigError;
pub use lifecycle::{
    Host, ListenerId, ListenerKind, OverlayProps, OverlayState, ResourceBundle, Signal,
    SpotlightCoordinator, TimerId, TimerKind, VirtualHost,
};
pub use spotlight::{
    PointerEvents, PositionMode, RectRequest, SpotlightRect, compute_rectangles,
    is_pointer_inside_any_spotlight,
};
pub use spotlight_types as types;
