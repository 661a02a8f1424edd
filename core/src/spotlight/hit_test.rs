use super::SpotlightRect;
use crate::dom::PointerPosition;

/// Check if the pointer is inside any spotlight.
///
/// Each rect is compared in its own frame: fixed rects against viewport
/// coordinates, absolute rects against page coordinates. Edges count as
/// inside.
pub fn is_pointer_inside_any_spotlight(pointer: &PointerPosition, rects: &[SpotlightRect]) -> bool {
    rects.iter().any(|rect| rect.contains(pointer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::ScrollOffset;
    use crate::spotlight::{PointerEvents, PositionMode};

    fn rect(top: f64, left: f64, width: f64, height: f64, position: PositionMode) -> SpotlightRect {
        SpotlightRect {
            top,
            left,
            width,
            height,
            position,
            opacity: 1.0,
            pointer_events: PointerEvents::Auto,
        }
    }

    #[test]
    fn test_strictly_inside() {
        let rects = [rect(100.0, 100.0, 50.0, 50.0, PositionMode::Absolute)];
        let p = PointerPosition::from_client(120.0, 120.0, ScrollOffset::default());
        assert!(is_pointer_inside_any_spotlight(&p, &rects));
    }

    #[test]
    fn test_edges_are_inclusive() {
        let rects = [rect(100.0, 100.0, 50.0, 50.0, PositionMode::Absolute)];
        for (x, y) in [(100.0, 100.0), (150.0, 150.0), (100.0, 150.0), (150.0, 125.0)] {
            let p = PointerPosition::from_client(x, y, ScrollOffset::default());
            assert!(is_pointer_inside_any_spotlight(&p, &rects), "({x}, {y})");
        }
    }

    #[test]
    fn test_outside_all() {
        let rects = [
            rect(100.0, 100.0, 50.0, 50.0, PositionMode::Absolute),
            rect(300.0, 300.0, 10.0, 10.0, PositionMode::Fixed),
        ];
        let p = PointerPosition::from_client(150.5, 99.0, ScrollOffset::default());
        assert!(!is_pointer_inside_any_spotlight(&p, &rects));
        assert!(!is_pointer_inside_any_spotlight(&p, &[]));
    }

    #[test]
    fn test_frame_follows_position_mode() {
        // Page scrolled by 500: client (120, 120) is page (120, 620)
        let p = PointerPosition::from_client(120.0, 120.0, ScrollOffset { x: 0.0, y: 500.0 });

        let absolute = [rect(600.0, 100.0, 50.0, 50.0, PositionMode::Absolute)];
        assert!(is_pointer_inside_any_spotlight(&p, &absolute));

        let fixed_same_numbers = [rect(600.0, 100.0, 50.0, 50.0, PositionMode::Fixed)];
        assert!(!is_pointer_inside_any_spotlight(&p, &fixed_same_numbers));

        let fixed = [rect(100.0, 100.0, 50.0, 50.0, PositionMode::Fixed)];
        assert!(is_pointer_inside_any_spotlight(&p, &fixed));
    }
}
