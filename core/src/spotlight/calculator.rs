//! Spotlight rectangle calculator

use spotlight_types::{PaddingSize, SpotlightOptions};

use super::{PointerEvents, PositionMode, SpotlightRect};
use crate::dom::{CssPosition, Document, ElementId, Rect, Target};
use crate::geometry::{client_rect, element_top, has_position, page_scroll_top};

/// Inputs to a rectangle pass besides the target itself
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectRequest {
    /// Merge two or more resolved targets into one spotlight
    pub group: bool,
    pub padding_size: PaddingSize,
    /// Uniform padding for the grouped spotlight
    pub spotlight_padding: f64,
    /// Scroll parent fix disabled
    pub skip_scroll_fix: bool,
    /// Spotlight click-through enabled
    pub spotlight_clicks: bool,
    /// Current visibility from the overlay state
    pub show_spotlight: bool,
}

impl RectRequest {
    pub fn from_options(options: &SpotlightOptions, show_spotlight: bool) -> Self {
        Self {
            group: options.group,
            padding_size: options.padding_size,
            spotlight_padding: options.spotlight_padding,
            skip_scroll_fix: options.disable_scroll_parent_fix,
            spotlight_clicks: options.spotlight_clicks,
            show_spotlight,
        }
    }

    fn opacity(&self) -> f64 {
        if self.show_spotlight { 1.0 } else { 0.0 }
    }

    fn pointer_events(&self) -> PointerEvents {
        if self.spotlight_clicks {
            PointerEvents::None
        } else {
            PointerEvents::Auto
        }
    }
}

/// Compute the overlay cut-outs for a target.
///
/// Returns one rect per resolved element, a single merged rect when grouping
/// applies to two or more elements, or nothing when no element resolves.
pub fn compute_rectangles<D: Document + ?Sized>(
    doc: &D,
    target: &Target,
    request: &RectRequest,
) -> Vec<SpotlightRect> {
    let elements = target.resolve(doc);

    if !request.group || elements.len() < 2 {
        return elements
            .iter()
            .map(|&element| element_rect(doc, element, request))
            .collect();
    }

    group_rect(doc, &elements, request).into_iter().collect()
}

/// Round to the nearest pixel, halves towards positive infinity
#[inline]
fn round_px(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn position_mode<D: Document + ?Sized>(doc: &D, element: ElementId) -> PositionMode {
    if has_position(doc, element, CssPosition::Fixed) {
        PositionMode::Fixed
    } else {
        PositionMode::Absolute
    }
}

fn element_rect<D: Document + ?Sized>(
    doc: &D,
    element: ElementId,
    request: &RectRequest,
) -> SpotlightRect {
    let (outer, inner) = request.padding_size.padding();
    let rect = client_rect(doc, element);

    SpotlightRect {
        top: element_top(doc, element, inner, request.skip_scroll_fix),
        left: round_px(rect.left() - outer),
        width: round_px(rect.width + outer * 2.0),
        height: round_px(rect.height + inner * 2.0),
        position: position_mode(doc, element),
        opacity: request.opacity(),
        pointer_events: request.pointer_events(),
    }
}

fn group_rect<D: Document + ?Sized>(
    doc: &D,
    elements: &[ElementId],
    request: &RectRequest,
) -> Option<SpotlightRect> {
    let first = *elements.first()?;
    let bounds = union_rect(doc, elements)?;
    let padding = request.spotlight_padding;

    // Frame and scroll offset come from the first target only
    let offset = page_scroll_top(doc, first, request.skip_scroll_fix);

    Some(SpotlightRect {
        top: bounds.top() + offset - padding,
        left: round_px(bounds.left() - padding),
        width: round_px(bounds.width + padding * 2.0),
        height: round_px(bounds.height + padding * 2.0),
        position: position_mode(doc, first),
        opacity: request.opacity(),
        pointer_events: request.pointer_events(),
    })
}

/// Union of the client rects of `elements`
fn union_rect<D: Document + ?Sized>(doc: &D, elements: &[ElementId]) -> Option<Rect> {
    elements
        .iter()
        .map(|&el| client_rect(doc, el))
        .reduce(|acc, r| acc.union(&r))
}
