//! Software preview renderer using tiny-skia
//!
//! Paints a composed [`OverlayVisual`] over a plain page backdrop the way a
//! browser would lay it out: the overlay is its own layer, spotlights are
//! drawn into it and the layer is composited with the overlay's blend mode.
//! All rendering is done on the CPU.

use std::path::Path;

use spotlight_core::types::{StyleMap, StyleValue};
use spotlight_core::{OverlayVisual, VisualNode};
use tiny_skia::{BlendMode, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Transform};

use crate::colors::{page_background, parse_css_color, spread_shadow_color, transparent};
use crate::error::PreviewError;

/// Visible part of the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    /// Vertical page scroll; absolutely positioned spotlights move up by it
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }
}

/// Render the overlay into a viewport-sized pixmap
pub fn render_preview(
    visual: &OverlayVisual,
    viewport: &Viewport,
) -> Result<Pixmap, PreviewError> {
    let invalid = || PreviewError::InvalidSize {
        width: viewport.width,
        height: viewport.height,
    };
    let mut page = Pixmap::new(viewport.width, viewport.height).ok_or_else(invalid)?;
    let mut layer = Pixmap::new(viewport.width, viewport.height).ok_or_else(invalid)?;
    page.fill(page_background());
    layer.fill(transparent());

    if let Some(color) = text(&visual.style, "backgroundColor") {
        layer.fill(parse_css_color(color)?);
    }

    for node in &visual.children {
        match node {
            VisualNode::Spotlight { style } => draw_spotlight(&mut layer, style, viewport)?,
            VisualNode::Wrapper { style, child } => {
                // Wrappers span the whole overlay
                if let Some(color) = text(style, "backgroundColor") {
                    fill_layer(&mut layer, parse_css_color(color)?);
                }
                if let Some(style) = child.as_deref().and_then(VisualNode::spotlight_style) {
                    draw_spotlight(&mut layer, style, viewport)?;
                }
            }
        }
    }

    let blend_mode = match text(&visual.style, "mixBlendMode") {
        Some("hard-light") => BlendMode::HardLight,
        _ => BlendMode::SourceOver,
    };
    let paint = PixmapPaint {
        blend_mode,
        ..PixmapPaint::default()
    };
    page.draw_pixmap(0, 0, layer.as_ref(), &paint, Transform::identity(), None);

    tracing::debug!(
        width = viewport.width,
        height = viewport.height,
        spotlights = visual.spotlights().count(),
        ?blend_mode,
        "preview rendered"
    );
    Ok(page)
}

/// Write a rendered preview as PNG
pub fn save_png(pixmap: &Pixmap, path: &Path) -> Result<(), PreviewError> {
    pixmap.save_png(path).map_err(|source| PreviewError::EncodePng {
        path: path.to_path_buf(),
        source,
    })
}

fn draw_spotlight(
    layer: &mut Pixmap,
    style: &StyleMap,
    viewport: &Viewport,
) -> Result<(), PreviewError> {
    if number(style, "opacity").is_some_and(|o| o <= 0.0) {
        return Ok(());
    }
    let (Some(left), Some(top), Some(width), Some(height)) = (
        number(style, "left"),
        number(style, "top"),
        number(style, "width"),
        number(style, "height"),
    ) else {
        tracing::warn!("spotlight without geometry skipped");
        return Ok(());
    };

    let top = match text(style, "position") {
        Some("fixed") => top,
        _ => top - viewport.scroll_y,
    };
    let radius = number(style, "borderRadius").unwrap_or(0.0) as f32;
    let Some(path) =
        rounded_rect_path(left as f32, top as f32, width as f32, height as f32, radius)
    else {
        return Ok(());
    };

    let mut paint = Paint::default();
    paint.anti_alias = true;

    // Legacy spotlights darken everything around them with a huge shadow
    if let Some(shadow) = text(style, "boxShadow").and_then(spread_shadow_color) {
        fill_layer(layer, parse_css_color(shadow)?);
        paint.blend_mode = BlendMode::Clear;
        layer.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        paint.blend_mode = BlendMode::SourceOver;
    }

    if let Some(color) = text(style, "backgroundColor") {
        paint.set_color(parse_css_color(color)?);
        layer.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
    Ok(())
}

/// Paint a color over the whole layer
fn fill_layer(layer: &mut Pixmap, color: tiny_skia::Color) {
    let Some(rect) = Rect::from_xywh(0.0, 0.0, layer.width() as f32, layer.height() as f32) else {
        return;
    };
    let mut paint = Paint::default();
    paint.set_color(color);
    layer.fill_rect(rect, &paint, Transform::identity(), None);
}

fn number(style: &StyleMap, key: &str) -> Option<f64> {
    style.get(key).and_then(StyleValue::as_number)
}

fn text<'a>(style: &'a StyleMap, key: &str) -> Option<&'a str> {
    style.get(key).and_then(StyleValue::as_text)
}

/// Create a rounded rectangle path
fn rounded_rect_path(x: f32, y: f32, w: f32, h: f32, r: f32) -> Option<tiny_skia::Path> {
    let r = r.max(0.0).min(w / 2.0).min(h / 2.0);
    if r == 0.0 {
        return Rect::from_xywh(x, y, w, h).map(PathBuilder::from_rect);
    }

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}
