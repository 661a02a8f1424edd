//! Host document abstraction
//!
//! The overlay never owns the document it highlights. Everything it needs to
//! know about elements (geometry, computed style, ancestry, scroll boxes) is
//! queried through the [`Document`] trait, so the geometry engine can run
//! against a browser binding, a headless layout engine or the in-memory
//! [`StaticDocument`].

mod static_doc;
mod target;

pub use static_doc::{ElementNode, StaticDocument};
pub use target::Target;

use serde::{Deserialize, Serialize};

/// Opaque handle to an element owned by the host document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

/// Axis-aligned rectangle in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Smallest rectangle containing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        let top = self.top().min(other.top());
        let left = self.left().min(other.left());
        let bottom = self.bottom().max(other.bottom());
        let right = self.right().max(other.right());
        Rect::new(left, top, right - left, bottom - top)
    }
}

/// Computed `position` of an element
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CssPosition {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

/// Computed value of one overflow axis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowValue {
    #[default]
    Visible,
    Hidden,
    Clip,
    Scroll,
    Auto,
}

/// Computed overflow of both axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overflow {
    #[serde(default)]
    pub x: OverflowValue,
    #[serde(default)]
    pub y: OverflowValue,
}

impl Overflow {
    pub fn both(value: OverflowValue) -> Self {
        Self { x: value, y: value }
    }

    /// Whether either axis lets the user scroll
    pub fn is_scrollable(&self) -> bool {
        [self.x, self.y]
            .iter()
            .any(|v| matches!(v, OverflowValue::Auto | OverflowValue::Scroll))
    }
}

/// Scroll box measurements of a single element
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollBox {
    #[serde(default)]
    pub scroll_top: f64,
    #[serde(default)]
    pub scroll_height: f64,
    #[serde(default)]
    pub offset_height: f64,
}

impl ScrollBox {
    /// Content taller than the box itself
    pub fn overflows(&self) -> bool {
        self.scroll_height > self.offset_height
    }
}

/// Page scroll offset of the document viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// Height measurements of `<body>` and `<html>`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetrics {
    pub body_scroll_height: f64,
    pub body_offset_height: f64,
    pub html_client_height: f64,
    pub html_scroll_height: f64,
    pub html_offset_height: f64,
}

/// Pointer location in both coordinate frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointerPosition {
    /// Viewport-relative x
    pub client_x: f64,
    /// Viewport-relative y
    pub client_y: f64,
    /// Document-relative (scroll-inclusive) x
    pub page_x: f64,
    /// Document-relative (scroll-inclusive) y
    pub page_y: f64,
}

impl PointerPosition {
    /// Build a pointer position from viewport coordinates and the page scroll
    pub fn from_client(client_x: f64, client_y: f64, scroll: ScrollOffset) -> Self {
        Self {
            client_x,
            client_y,
            page_x: client_x + scroll.x,
            page_y: client_y + scroll.y,
        }
    }
}

/// The scroll-bearing ancestor of a target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollAnchor {
    /// The document itself scrolls
    #[default]
    Document,
    /// A custom scrolling ancestor
    Element(ElementId),
}

impl ScrollAnchor {
    pub fn is_document(&self) -> bool {
        matches!(self, ScrollAnchor::Document)
    }
}

/// Queries the overlay needs from the host document.
///
/// Implementations answer from live layout; nothing is cached on this side.
pub trait Document {
    /// All connected elements matching `selector`, in document order
    fn query_selector_all(&self, selector: &str) -> Vec<ElementId>;

    /// Whether the element is still attached to the document
    fn is_connected(&self, element: ElementId) -> bool;

    /// Viewport-relative bounding box
    fn bounding_client_rect(&self, element: ElementId) -> Rect;

    fn computed_position(&self, element: ElementId) -> CssPosition;

    fn computed_overflow(&self, element: ElementId) -> Overflow;

    /// Parent element, `None` above the root
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Whether the element is `<body>` or `<html>`
    fn is_document_root(&self, element: ElementId) -> bool;

    fn scroll_box(&self, element: ElementId) -> ScrollBox;

    /// Current page scroll offset
    fn page_offset(&self) -> ScrollOffset;

    fn document_metrics(&self) -> DocumentMetrics;

    /// Reset the overflow of an ancestor that claims to scroll but doesn't.
    ///
    /// Called when the scroll parent fix falls back to the document. Hosts
    /// that cannot mutate styles may ignore it.
    fn release_overflow(&self, _element: ElementId) {}
}
