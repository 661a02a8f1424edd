//! Overlay composition
//!
//! Turns props, state and the current rectangles into a renderer-agnostic
//! [`OverlayVisual`] tree. Nothing here touches the host; the tree is rebuilt
//! on every render pass.

use serde::{Deserialize, Serialize};
use spotlight_types::{LifecyclePhase, StyleMap, StyleValue, style_map};

use crate::dom::Document;
use crate::geometry::document_height;
use crate::lifecycle::{OverlayProps, OverlayState};
use crate::spotlight::{RectRequest, compute_rectangles};

/// Class name carried by the overlay root
pub const OVERLAY_CLASS: &str = "spotlight__overlay";

/// Rendering-environment probe
pub trait Environment {
    /// Lowercase engine name (`"chrome"`, `"firefox"`, `"safari"`, ...)
    fn rendering_engine(&self) -> &str;

    /// Engines without `mix-blend-mode` support
    fn is_legacy(&self) -> bool;

    fn is_safari(&self) -> bool {
        self.rendering_engine() == "safari"
    }
}

/// Fixed environment answers, usually read from a scene file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticEnvironment {
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default)]
    pub legacy: bool,
}

fn default_engine() -> String {
    "chrome".to_string()
}

impl StaticEnvironment {
    pub fn new(engine: impl Into<String>, legacy: bool) -> Self {
        Self {
            engine: engine.into(),
            legacy,
        }
    }
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self::new(default_engine(), false)
    }
}

impl Environment for StaticEnvironment {
    fn rendering_engine(&self) -> &str {
        &self.engine
    }

    fn is_legacy(&self) -> bool {
        self.legacy
    }
}

/// A child of the overlay root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisualNode {
    /// The cut-out itself
    Spotlight { style: StyleMap },
    /// Safari blend-mode container, possibly empty
    Wrapper {
        style: StyleMap,
        child: Option<Box<VisualNode>>,
    },
}

impl VisualNode {
    /// Style of the spotlight in this node, looking through wrappers
    pub fn spotlight_style(&self) -> Option<&StyleMap> {
        match self {
            VisualNode::Spotlight { style } => Some(style),
            VisualNode::Wrapper { child, .. } => child.as_deref().and_then(Self::spotlight_style),
        }
    }
}

/// The composed overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayVisual {
    pub class_name: String,
    pub style: StyleMap,
    pub children: Vec<VisualNode>,
}

impl OverlayVisual {
    /// Styles of every spotlight node in child order
    pub fn spotlights(&self) -> impl Iterator<Item = &StyleMap> {
        self.children.iter().filter_map(VisualNode::spotlight_style)
    }
}

/// Compose the overlay tree.
///
/// Returns `None` when the overlay is disabled or the tour isn't showing its
/// tooltip.
pub fn compose<D, E>(
    doc: &D,
    env: &E,
    props: &OverlayProps,
    state: &OverlayState,
) -> Option<OverlayVisual>
where
    D: Document + ?Sized,
    E: Environment + ?Sized,
{
    let options = &props.options;
    let theme = &props.theme;
    if options.disable_overlay || props.phase != LifecyclePhase::Tooltip {
        return None;
    }

    let legacy = env.is_legacy();
    let center = options.placement.is_center();
    let base = match (legacy, center) {
        (false, _) => &theme.overlay,
        (true, true) => &theme.overlay_legacy_center,
        (true, false) => &theme.overlay_legacy,
    };

    let mut overlay_style = style_map([
        (
            "cursor",
            if options.disable_overlay_close { "default" } else { "pointer" },
        ),
        (
            "pointerEvents",
            if state.mouse_over_spotlight { "none" } else { "auto" },
        ),
    ]);
    overlay_style.insert("height".into(), StyleValue::Number(document_height(doc)));
    overlay_style.extend(base.iter().map(|(k, v)| (k.clone(), v.clone())));

    let spotlight_base = if legacy {
        &theme.spotlight_legacy
    } else {
        &theme.spotlight
    };
    let request = RectRequest::from_options(options, state.show_spotlight);
    let rects = compute_rectangles(doc, &props.target, &request);
    let safari = env.is_safari();

    let mut children = Vec::with_capacity(rects.len());
    for rect in &rects {
        let spotlight = (!center && state.show_spotlight).then(|| VisualNode::Spotlight {
            style: rect.to_style(spotlight_base),
        });

        if safari {
            // Blend mode breaks under a z-index in Safari: each spotlight gets
            // its own tinted container and only the first one keeps the tint
            let mut wrapper = overlay_style.clone();
            wrapper.remove("mixBlendMode");
            wrapper.remove("zIndex");
            children.push(VisualNode::Wrapper {
                style: wrapper,
                child: spotlight.map(Box::new),
            });
            overlay_style.remove("backgroundColor");
        } else if let Some(node) = spotlight {
            children.push(node);
        }
    }

    tracing::trace!(rects = rects.len(), children = children.len(), "overlay composed");
    Some(OverlayVisual {
        class_name: OVERLAY_CLASS.to_string(),
        style: overlay_style,
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{DocumentMetrics, ElementNode, Rect, StaticDocument};
    use spotlight_types::{Placement, SpotlightOptions, Theme};

    fn doc() -> StaticDocument {
        StaticDocument::new()
            .with_metrics(DocumentMetrics {
                body_scroll_height: 1800.0,
                html_client_height: 900.0,
                ..DocumentMetrics::default()
            })
            .with_element(
                ElementNode::new(1, Rect::new(10.0, 20.0, 100.0, 40.0)).with_selector(".step"),
            )
            .with_element(
                ElementNode::new(2, Rect::new(300.0, 20.0, 100.0, 40.0)).with_selector(".step"),
            )
    }

    fn props(options: SpotlightOptions) -> OverlayProps {
        OverlayProps::new(".step")
            .with_phase(LifecyclePhase::Tooltip)
            .with_options(options)
    }

    fn text<'a>(style: &'a StyleMap, key: &str) -> Option<&'a str> {
        style.get(key).and_then(StyleValue::as_text)
    }

    #[test]
    fn test_nothing_outside_tooltip_or_when_disabled() {
        let env = StaticEnvironment::default();
        let state = OverlayState::default();
        let ready = OverlayProps::new(".step").with_phase(LifecyclePhase::Ready);
        assert!(compose(&doc(), &env, &ready, &state).is_none());

        let disabled = props(SpotlightOptions {
            disable_overlay: true,
            ..SpotlightOptions::default()
        });
        assert!(compose(&doc(), &env, &disabled, &state).is_none());
    }

    #[test]
    fn test_overlay_style() {
        let env = StaticEnvironment::default();
        let visual = compose(
            &doc(),
            &env,
            &props(SpotlightOptions::default()),
            &OverlayState::default(),
        )
        .unwrap();

        assert_eq!(visual.class_name, OVERLAY_CLASS);
        assert_eq!(text(&visual.style, "cursor"), Some("pointer"));
        assert_eq!(text(&visual.style, "pointerEvents"), Some("auto"));
        assert_eq!(visual.style["height"].as_number(), Some(1800.0));
        assert_eq!(text(&visual.style, "mixBlendMode"), Some("hard-light"));
        assert_eq!(visual.children.len(), 2);

        let hovering = OverlayState {
            mouse_over_spotlight: true,
            ..OverlayState::default()
        };
        let options = SpotlightOptions {
            disable_overlay_close: true,
            ..SpotlightOptions::default()
        };
        let visual = compose(&doc(), &env, &props(options), &hovering).unwrap();
        assert_eq!(text(&visual.style, "cursor"), Some("default"));
        assert_eq!(text(&visual.style, "pointerEvents"), Some("none"));
    }

    #[test]
    fn test_theme_overrides_computed_overlay_keys() {
        let mut p = props(SpotlightOptions::default());
        p.theme.overlay.insert("cursor".into(), "crosshair".into());
        let visual = compose(
            &doc(),
            &StaticEnvironment::default(),
            &p,
            &OverlayState::default(),
        )
        .unwrap();
        assert_eq!(text(&visual.style, "cursor"), Some("crosshair"));
    }

    #[test]
    fn test_spotlight_style_layers_rect_over_theme() {
        let visual = compose(
            &doc(),
            &StaticEnvironment::default(),
            &props(SpotlightOptions::default()),
            &OverlayState::default(),
        )
        .unwrap();
        let style = visual.spotlights().next().unwrap();
        assert_eq!(text(style, "backgroundColor"), Some("gray"));
        assert_eq!(style["borderRadius"].as_number(), Some(4.0));
        assert_eq!(text(style, "position"), Some("absolute"));
        assert_eq!(text(style, "transition"), Some("opacity 0.2s"));
        assert_eq!(style["left"].as_number(), Some(2.0));
        assert_eq!(style["width"].as_number(), Some(116.0));
    }

    #[test]
    fn test_legacy_variants() {
        let env = StaticEnvironment::new("chrome", true);
        let visual = compose(
            &doc(),
            &env,
            &props(SpotlightOptions::default()),
            &OverlayState::default(),
        )
        .unwrap();
        assert!(!visual.style.contains_key("backgroundColor"));
        assert!(!visual.style.contains_key("mixBlendMode"));
        let style = visual.spotlights().next().unwrap();
        assert!(style.contains_key("boxShadow"));

        let center = props(SpotlightOptions {
            placement: Placement::Center,
            ..SpotlightOptions::default()
        });
        let visual = compose(&doc(), &env, &center, &OverlayState::default()).unwrap();
        assert_eq!(
            visual.style.get("backgroundColor"),
            Theme::default().overlay_legacy_center.get("backgroundColor")
        );
    }

    #[test]
    fn test_center_placement_has_no_spotlight() {
        let center = props(SpotlightOptions {
            placement: Placement::Center,
            ..SpotlightOptions::default()
        });
        let visual = compose(
            &doc(),
            &StaticEnvironment::default(),
            &center,
            &OverlayState::default(),
        )
        .unwrap();
        assert!(visual.children.is_empty());
        assert_eq!(visual.spotlights().count(), 0);
    }

    #[test]
    fn test_hidden_spotlight_is_omitted() {
        let hidden = OverlayState {
            show_spotlight: false,
            ..OverlayState::default()
        };
        let visual = compose(
            &doc(),
            &StaticEnvironment::default(),
            &props(SpotlightOptions::default()),
            &hidden,
        )
        .unwrap();
        assert!(visual.children.is_empty());
    }

    #[test]
    fn test_safari_wraps_each_spotlight() {
        let env = StaticEnvironment::new("safari", false);
        let visual = compose(
            &doc(),
            &env,
            &props(SpotlightOptions::default()),
            &OverlayState::default(),
        )
        .unwrap();

        assert_eq!(visual.children.len(), 2);
        assert!(!visual.style.contains_key("backgroundColor"));
        assert!(visual.style.contains_key("mixBlendMode"));

        let wrapper_styles: Vec<&StyleMap> = visual
            .children
            .iter()
            .map(|node| match node {
                VisualNode::Wrapper { style, child } => {
                    assert!(child.is_some());
                    style
                }
                VisualNode::Spotlight { .. } => panic!("unwrapped spotlight"),
            })
            .collect();
        for style in &wrapper_styles {
            assert!(!style.contains_key("mixBlendMode"));
            assert!(!style.contains_key("zIndex"));
        }
        assert!(wrapper_styles[0].contains_key("backgroundColor"));
        assert!(!wrapper_styles[1].contains_key("backgroundColor"));
        assert_eq!(visual.spotlights().count(), 2);
    }

    #[test]
    fn test_safari_keeps_empty_wrappers_when_hidden() {
        let env = StaticEnvironment::new("safari", false);
        let hidden = OverlayState {
            show_spotlight: false,
            ..OverlayState::default()
        };
        let visual = compose(&doc(), &env, &props(SpotlightOptions::default()), &hidden).unwrap();
        assert_eq!(visual.children.len(), 2);
        assert_eq!(visual.spotlights().count(), 0);
    }
}
