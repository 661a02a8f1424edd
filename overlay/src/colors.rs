//! CSS color handling

use tiny_skia::Color;

use crate::error::PreviewError;

/// Page backdrop the overlay is composited onto
#[inline]
pub fn page_background() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

#[inline]
pub fn transparent() -> Color {
    Color::from_rgba8(0, 0, 0, 0)
}

/// Convert [u8; 4] RGBA array to tiny_skia Color
#[inline]
pub fn color_from_rgba(rgba: [u8; 4]) -> Color {
    Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

/// Parse any CSS `<color>` (named, hex, `rgb()`/`rgba()`, `hsl()`, ...)
pub fn parse_css_color(value: &str) -> Result<Color, PreviewError> {
    let parsed: csscolorparser::Color = value.trim().parse().map_err(|source| PreviewError::Color {
        value: value.to_string(),
        source,
    })?;
    Ok(color_from_rgba(parsed.to_rgba8()))
}

/// Color of the spread layer of a `box-shadow` (`0 0 0 9999px <color>, ...`).
///
/// Only the first shadow layer is inspected; `None` when it has no positive
/// spread.
pub fn spread_shadow_color(box_shadow: &str) -> Option<&str> {
    let layer = first_layer(box_shadow).trim();
    let mut parts = layer.splitn(5, ' ');
    let spread = parts.nth(3)?;
    let spread: f64 = spread.trim_end_matches("px").parse().ok()?;
    if spread <= 0.0 {
        return None;
    }
    parts.next().map(str::trim)
}

/// Text before the first comma that isn't inside parentheses
fn first_layer(value: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return &value[..i],
            _ => {}
        }
    }
    value
}
