//! In-memory document snapshot
//!
//! A fixed layout described up front (usually deserialized from a scene file).
//! Selector matching is exact: an element matches the selectors listed in its
//! `selectors` field and nothing else.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};

use super::{
    CssPosition, Document, DocumentMetrics, ElementId, Overflow, Rect, ScrollBox, ScrollOffset,
};

/// One element of a [`StaticDocument`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    pub id: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ElementId>,
    /// Selectors this element answers to (`"#hero"`, `".step"`, ...)
    #[serde(default)]
    pub selectors: Vec<String>,
    /// Viewport-relative bounding box
    pub rect: Rect,
    #[serde(default)]
    pub position: CssPosition,
    #[serde(default)]
    pub overflow: Overflow,
    #[serde(default)]
    pub scroll: ScrollBox,
    /// `<body>` or `<html>`
    #[serde(default)]
    pub root: bool,
    /// Detached elements are skipped by resolution
    #[serde(default = "default_connected")]
    pub connected: bool,
}

fn default_connected() -> bool {
    true
}

impl ElementNode {
    pub fn new(id: u32, rect: Rect) -> Self {
        Self {
            id: ElementId(id),
            parent: None,
            selectors: Vec::new(),
            rect,
            position: CssPosition::Static,
            overflow: Overflow::default(),
            scroll: ScrollBox::default(),
            root: false,
            connected: true,
        }
    }

    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selectors.push(selector.into());
        self
    }

    pub fn with_parent(mut self, parent: u32) -> Self {
        self.parent = Some(ElementId(parent));
        self
    }

    pub fn with_position(mut self, position: CssPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_overflow(mut self, overflow: Overflow) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_scroll(mut self, scroll: ScrollBox) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn as_root(mut self) -> Self {
        self.root = true;
        self
    }
}

/// A document whose layout never changes unless mutated explicitly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticDocument {
    #[serde(default)]
    pub scroll: ScrollOffset,
    #[serde(default)]
    pub metrics: DocumentMetrics,
    #[serde(default)]
    pub elements: Vec<ElementNode>,
    /// Elements whose overflow was released by the scroll parent fix
    #[serde(skip)]
    released: RefCell<Vec<ElementId>>,
}

impl StaticDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, element: ElementNode) -> Self {
        self.elements.push(element);
        self
    }

    pub fn with_scroll(mut self, x: f64, y: f64) -> Self {
        self.scroll = ScrollOffset { x, y };
        self
    }

    pub fn with_metrics(mut self, metrics: DocumentMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementNode> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementNode> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Scroll the page, shifting every element's client rect accordingly
    /// (fixed elements stay where they are).
    pub fn scroll_page_to(&mut self, y: f64) {
        let delta = y - self.scroll.y;
        self.scroll.y = y;
        for element in &mut self.elements {
            if element.position != CssPosition::Fixed {
                element.rect.y -= delta;
            }
        }
    }

    /// Elements released by the scroll parent fix so far
    pub fn released_overflow(&self) -> Vec<ElementId> {
        self.released.borrow().clone()
    }
}

impl Document for StaticDocument {
    fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.connected && e.selectors.iter().any(|s| s == selector))
            .map(|e| e.id)
            .collect()
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.element(element).is_some_and(|e| e.connected)
    }

    fn bounding_client_rect(&self, element: ElementId) -> Rect {
        self.element(element).map(|e| e.rect).unwrap_or_default()
    }

    fn computed_position(&self, element: ElementId) -> CssPosition {
        self.element(element).map(|e| e.position).unwrap_or_default()
    }

    fn computed_overflow(&self, element: ElementId) -> Overflow {
        if self.released.borrow().contains(&element) {
            return Overflow::default();
        }
        self.element(element).map(|e| e.overflow).unwrap_or_default()
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.element(element).and_then(|e| e.parent)
    }

    fn is_document_root(&self, element: ElementId) -> bool {
        self.element(element).is_some_and(|e| e.root)
    }

    fn scroll_box(&self, element: ElementId) -> ScrollBox {
        self.element(element).map(|e| e.scroll).unwrap_or_default()
    }

    fn page_offset(&self) -> ScrollOffset {
        self.scroll
    }

    fn document_metrics(&self) -> DocumentMetrics {
        self.metrics
    }

    fn release_overflow(&self, element: ElementId) {
        let mut released = self.released.borrow_mut();
        if !released.contains(&element) {
            released.push(element);
        }
    }
}
