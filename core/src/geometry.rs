//! Geometry utilities over the host document
//!
//! Pure functions: every answer is derived from [`Document`] queries at call
//! time.

use crate::dom::{CssPosition, Document, ElementId, Rect, ScrollAnchor};

/// Viewport-relative bounding box of an element
#[inline]
pub fn client_rect<D: Document + ?Sized>(doc: &D, element: ElementId) -> Rect {
    doc.bounding_client_rect(element)
}

/// Full document height (largest of the body and html measurements)
pub fn document_height<D: Document + ?Sized>(doc: &D) -> f64 {
    let m = doc.document_metrics();
    [
        m.body_scroll_height,
        m.body_offset_height,
        m.html_client_height,
        m.html_scroll_height,
        m.html_offset_height,
    ]
    .into_iter()
    .fold(0.0, f64::max)
}

/// Nearest ancestor that declares scrollable overflow.
///
/// Fixed elements scroll with nothing. Absolutely positioned elements skip
/// statically positioned ancestors since those cannot contain them.
/// Returns `None` when the document is the scroller.
pub fn find_scroll_parent<D: Document + ?Sized>(doc: &D, element: ElementId) -> Option<ElementId> {
    let position = doc.computed_position(element);
    if position == CssPosition::Fixed {
        return None;
    }
    let skip_static = position == CssPosition::Absolute;

    let mut current = doc.parent(element);
    while let Some(ancestor) = current {
        if doc.is_document_root(ancestor) {
            return None;
        }
        let static_skipped =
            skip_static && doc.computed_position(ancestor) == CssPosition::Static;
        if !static_skipped && doc.computed_overflow(ancestor).is_scrollable() {
            return Some(ancestor);
        }
        current = doc.parent(ancestor);
    }
    None
}

/// The scroll anchor of an element.
///
/// A discovered parent that doesn't actually overflow is replaced by the
/// document unless `skip_fix` is set; in that case the host is asked to
/// release the parent's overflow.
pub fn scroll_parent<D: Document + ?Sized>(
    doc: &D,
    element: Option<ElementId>,
    skip_fix: bool,
) -> ScrollAnchor {
    let Some(element) = element else {
        return ScrollAnchor::Document;
    };
    let Some(parent) = find_scroll_parent(doc, element) else {
        return ScrollAnchor::Document;
    };

    if !doc.scroll_box(parent).overflows() && !skip_fix {
        tracing::debug!(?parent, "scroll parent does not overflow, using document");
        doc.release_overflow(parent);
        return ScrollAnchor::Document;
    }

    ScrollAnchor::Element(parent)
}

/// Whether the element scrolls inside something other than the document
pub fn has_custom_scroll_parent<D: Document + ?Sized>(
    doc: &D,
    element: Option<ElementId>,
    skip_fix: bool,
) -> bool {
    element.is_some() && !scroll_parent(doc, element, skip_fix).is_document()
}

/// Whether the element, or any ancestor below the document root, has the
/// given computed position (`Fixed` or `Sticky`).
pub fn has_position<D: Document + ?Sized>(doc: &D, element: ElementId, mode: CssPosition) -> bool {
    let mut current = Some(element);
    while let Some(el) = current {
        if doc.is_document_root(el) {
            return false;
        }
        if doc.computed_position(el) == mode {
            return true;
        }
        current = doc.parent(el);
    }
    false
}

/// Document-relative top edge of an element, moved up by `offset`.
///
/// The page scroll offset is added only when the element scrolls with the
/// document and isn't fixed. The result is intentionally not rounded.
pub fn element_top<D: Document + ?Sized>(
    doc: &D,
    element: ElementId,
    offset: f64,
    skip_fix: bool,
) -> f64 {
    let rect = client_rect(doc, element);
    rect.top() + page_scroll_top(doc, element, skip_fix) - offset
}

/// Vertical scroll offset that turns an element's client top into a
/// document-relative top (0 for fixed elements and custom scrollers).
pub(crate) fn page_scroll_top<D: Document + ?Sized>(
    doc: &D,
    element: ElementId,
    skip_fix: bool,
) -> f64 {
    let custom = has_custom_scroll_parent(doc, Some(element), skip_fix);
    if !custom && !has_position(doc, element, CssPosition::Fixed) {
        doc.page_offset().y
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{
        DocumentMetrics, ElementNode, Overflow, OverflowValue, ScrollBox, StaticDocument,
    };

    fn scroller(id: u32, parent: u32, overflows: bool) -> ElementNode {
        ElementNode::new(id, Rect::new(0.0, 0.0, 300.0, 200.0))
            .with_parent(parent)
            .with_overflow(Overflow::both(OverflowValue::Auto))
            .with_scroll(ScrollBox {
                scroll_top: 0.0,
                scroll_height: if overflows { 900.0 } else { 200.0 },
                offset_height: 200.0,
            })
    }

    #[test]
    fn test_document_height_takes_max() {
        let doc = StaticDocument::new().with_metrics(DocumentMetrics {
            body_scroll_height: 1200.0,
            body_offset_height: 800.0,
            html_client_height: 700.0,
            html_scroll_height: 1250.0,
            html_offset_height: 1000.0,
        });
        assert_eq!(document_height(&doc), 1250.0);
    }

    #[test]
    fn test_scroll_parent_found() {
        let doc = StaticDocument::new()
            .with_element(ElementNode::new(1, Rect::default()).as_root())
            .with_element(scroller(2, 1, true))
            .with_element(ElementNode::new(3, Rect::default()).with_parent(2));

        assert_eq!(find_scroll_parent(&doc, ElementId(3)), Some(ElementId(2)));
        assert_eq!(
            scroll_parent(&doc, Some(ElementId(3)), false),
            ScrollAnchor::Element(ElementId(2))
        );
        assert!(has_custom_scroll_parent(&doc, Some(ElementId(3)), false));
    }

    #[test]
    fn test_non_scrolling_parent_falls_back_to_document() {
        let doc = StaticDocument::new()
            .with_element(ElementNode::new(1, Rect::default()).as_root())
            .with_element(scroller(2, 1, false))
            .with_element(ElementNode::new(3, Rect::default()).with_parent(2));

        assert_eq!(
            scroll_parent(&doc, Some(ElementId(3)), false),
            ScrollAnchor::Document
        );
        assert_eq!(doc.released_overflow(), vec![ElementId(2)]);
    }

    #[test]
    fn test_skip_fix_keeps_non_scrolling_parent() {
        let doc = StaticDocument::new()
            .with_element(ElementNode::new(1, Rect::default()).as_root())
            .with_element(scroller(2, 1, false))
            .with_element(ElementNode::new(3, Rect::default()).with_parent(2));

        assert_eq!(
            scroll_parent(&doc, Some(ElementId(3)), true),
            ScrollAnchor::Element(ElementId(2))
        );
        assert!(doc.released_overflow().is_empty());
    }

    #[test]
    fn test_no_element_means_document() {
        let doc = StaticDocument::new();
        assert_eq!(scroll_parent(&doc, None, false), ScrollAnchor::Document);
        assert!(!has_custom_scroll_parent(&doc, None, false));
    }

    #[test]
    fn test_fixed_element_has_no_scroll_parent() {
        let doc = StaticDocument::new()
            .with_element(scroller(2, 1, true))
            .with_element(
                ElementNode::new(3, Rect::default())
                    .with_parent(2)
                    .with_position(CssPosition::Fixed),
            );
        assert_eq!(find_scroll_parent(&doc, ElementId(3)), None);
    }

    #[test]
    fn test_absolute_skips_static_ancestors() {
        let doc = StaticDocument::new()
            .with_element(ElementNode::new(1, Rect::default()).as_root())
            .with_element(scroller(2, 1, true).with_position(CssPosition::Relative))
            .with_element(scroller(3, 2, true))
            .with_element(
                ElementNode::new(4, Rect::default())
                    .with_parent(3)
                    .with_position(CssPosition::Absolute),
            );
        assert_eq!(find_scroll_parent(&doc, ElementId(4)), Some(ElementId(2)));
    }

    #[test]
    fn test_has_position_walks_ancestors() {
        let doc = StaticDocument::new()
            .with_element(ElementNode::new(1, Rect::default()).as_root())
            .with_element(
                ElementNode::new(2, Rect::default())
                    .with_parent(1)
                    .with_position(CssPosition::Sticky),
            )
            .with_element(ElementNode::new(3, Rect::default()).with_parent(2));

        assert!(has_position(&doc, ElementId(3), CssPosition::Sticky));
        assert!(!has_position(&doc, ElementId(3), CssPosition::Fixed));
    }

    #[test]
    fn test_has_position_ignores_document_root() {
        let doc = StaticDocument::new()
            .with_element(
                ElementNode::new(1, Rect::default())
                    .as_root()
                    .with_position(CssPosition::Fixed),
            )
            .with_element(ElementNode::new(2, Rect::default()).with_parent(1));
        assert!(!has_position(&doc, ElementId(2), CssPosition::Fixed));
    }

    #[test]
    fn test_element_top_adds_page_scroll() {
        let doc = StaticDocument::new()
            .with_scroll(0.0, 250.0)
            .with_element(ElementNode::new(1, Rect::new(0.0, 40.5, 10.0, 10.0)))
            .with_element(
                ElementNode::new(2, Rect::new(0.0, 40.5, 10.0, 10.0))
                    .with_position(CssPosition::Fixed),
            );
        assert_eq!(element_top(&doc, ElementId(1), 8.0, false), 282.5);
        assert_eq!(element_top(&doc, ElementId(2), 8.0, false), 32.5);
    }
}
