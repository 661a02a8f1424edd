//! Spotlight rectangles
//!
//! This module provides:
//! - **Calculator**: turns a target into the overlay's cut-out rectangles
//! - **Hit testing**: checks whether the pointer sits inside any cut-out
//!
//! Rectangles are rebuilt from scratch on every pass and never mutated.

mod calculator;
mod hit_test;


pub use calculator::{RectRequest, compute_rectangles};
pub use hit_test::is_pointer_inside_any_spotlight;

use serde::{Deserialize, Serialize};
use spotlight_types::{StyleMap, StyleValue};

use crate::dom::PointerPosition;

/// Coordinate frame a spotlight is positioned in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Viewport-relative
    Fixed,
    /// Document-relative (scroll-inclusive)
    Absolute,
}

impl PositionMode {
    pub fn as_css(&self) -> &'static str {
        match self {
            PositionMode::Fixed => "fixed",
            PositionMode::Absolute => "absolute",
        }
    }
}

/// Whether a spotlight captures pointer events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvents {
    None,
    Auto,
}

impl PointerEvents {
    pub fn as_css(&self) -> &'static str {
        match self {
            PointerEvents::None => "none",
            PointerEvents::Auto => "auto",
        }
    }
}

/// One cut-out of the overlay.
///
/// `left`, `width` and `height` are whole pixels; `top` keeps its fraction to
/// avoid one-pixel seams against adjoining content.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotlightRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub position: PositionMode,
    /// 0 or 1
    pub opacity: f64,
    pub pointer_events: PointerEvents,
}

impl SpotlightRect {
    /// Inclusive containment test in the frame matching `position`
    pub fn contains(&self, pointer: &PointerPosition) -> bool {
        let (x, y) = match self.position {
            PositionMode::Fixed => (pointer.client_x, pointer.client_y),
            PositionMode::Absolute => (pointer.page_x, pointer.page_y),
        };
        let in_height = y >= self.top && y <= self.top + self.height;
        let in_width = x >= self.left && x <= self.left + self.width;
        in_width && in_height
    }

    /// Style declarations for this rect layered over a theme base style
    pub fn to_style(&self, base: &StyleMap) -> StyleMap {
        let mut style = base.clone();
        style.insert("height".into(), StyleValue::Number(self.height));
        style.insert("left".into(), StyleValue::Number(self.left));
        style.insert("opacity".into(), StyleValue::Number(self.opacity));
        style.insert(
            "pointerEvents".into(),
            self.pointer_events.as_css().into(),
        );
        style.insert("position".into(), self.position.as_css().into());
        style.insert("top".into(), StyleValue::Number(self.top));
        style.insert("transition".into(), "opacity 0.2s".into());
        style.insert("width".into(), StyleValue::Number(self.width));
        style
    }
}
