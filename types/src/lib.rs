//! Shared configuration types for the spotlight overlay
//!
//! This crate contains serializable configuration types that are shared between
//! the geometry core (spotlight-core), the preview renderer and the CLI.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─────────────────────────────────────────────────────────────────────────────
// Tour Lifecycle
// ─────────────────────────────────────────────────────────────────────────────

/// Lifecycle phase of the current tour step.
///
/// Only [`LifecyclePhase::Tooltip`] activates the overlay; every other phase
/// renders nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    #[default]
    Init,
    Ready,
    Beacon,
    Tooltip,
    Complete,
    Error,
}

impl LifecyclePhase {
    /// Returns true if this is the "tooltip visible" phase
    pub fn is_active(&self) -> bool {
        matches!(self, LifecyclePhase::Tooltip)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Padding & Placement
// ─────────────────────────────────────────────────────────────────────────────

/// Named padding presets for ungrouped spotlights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingSize {
    Small,
    Mid,
    Large,
    #[default]
    Default,
}

impl PaddingSize {
    /// Returns `(outer, inner)` padding in pixels.
    ///
    /// Outer padding inflates the horizontal axis (left/width), inner padding
    /// the vertical axis (top/height).
    pub fn padding(&self) -> (f64, f64) {
        match self {
            PaddingSize::Small => (4.0, 8.0),
            PaddingSize::Mid => (8.0, 12.0),
            PaddingSize::Large => (12.0, 16.0),
            PaddingSize::Default => (8.0, 12.0),
        }
    }

    pub fn outer(&self) -> f64 {
        self.padding().0
    }

    pub fn inner(&self) -> f64 {
        self.padding().1
    }
}

/// Tooltip placement relative to the target.
///
/// The overlay only cares about [`Placement::Center`], which disables
/// spotlight rendering and selects the overlay-only legacy style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Top,
    TopStart,
    TopEnd,
    #[default]
    Bottom,
    BottomStart,
    BottomEnd,
    Left,
    LeftStart,
    LeftEnd,
    Right,
    RightStart,
    RightEnd,
    Auto,
    Center,
}

impl Placement {
    pub fn is_center(&self) -> bool {
        matches!(self, Placement::Center)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Overlay Options
// ─────────────────────────────────────────────────────────────────────────────

fn default_spotlight_padding() -> f64 {
    10.0
}

/// Externally supplied overlay options (validated by the caller).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotlightOptions {
    /// Emit advisory diagnostics (custom scroll parent warnings)
    #[serde(default)]
    pub debug: bool,
    /// Render nothing at all
    #[serde(default)]
    pub disable_overlay: bool,
    /// Clicking the overlay does not close the tour (changes the cursor)
    #[serde(default)]
    pub disable_overlay_close: bool,
    #[serde(default)]
    pub disable_scrolling: bool,
    /// Keep non-scrolling scroll parents instead of falling back to the document
    #[serde(default)]
    pub disable_scroll_parent_fix: bool,
    /// Let pointer events pass through the spotlight to the target
    #[serde(default)]
    pub spotlight_clicks: bool,
    /// Uniform padding applied to grouped spotlights
    #[serde(default = "default_spotlight_padding")]
    pub spotlight_padding: f64,
    /// Per-axis padding preset applied to ungrouped spotlights
    #[serde(default)]
    pub padding_size: PaddingSize,
    /// Merge multiple targets into one spotlight
    #[serde(default)]
    pub group: bool,
    #[serde(default)]
    pub placement: Placement,
}

impl Default for SpotlightOptions {
    fn default() -> Self {
        Self {
            debug: false,
            disable_overlay: false,
            disable_overlay_close: false,
            disable_scrolling: false,
            disable_scroll_parent_fix: false,
            spotlight_clicks: false,
            spotlight_padding: 10.0,
            padding_size: PaddingSize::Default,
            group: false,
            placement: Placement::Bottom,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Styles
// ─────────────────────────────────────────────────────────────────────────────

/// A single style declaration value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

/// Style declarations keyed by camelCase property name.
///
/// Ordered so serialized output is stable.
pub type StyleMap = BTreeMap<String, StyleValue>;

/// Build a [`StyleMap`] from `(property, value)` pairs
pub fn style_map<I, K, V>(entries: I) -> StyleMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<StyleValue>,
{
    entries
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Default overlay dimming color
pub const OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.5)";
/// Default spotlight shadow used by the legacy spotlight
pub const SPOTLIGHT_SHADOW: &str = "0 0 15px rgba(0, 0, 0, 0.5)";
/// Default overlay stacking index
pub const OVERLAY_Z_INDEX: f64 = 100.0;

/// Style theme consumed by the overlay composer.
///
/// The composer treats these as opaque declarations and only merges them.
/// When deserialized, each section is merged key by key over the stock
/// styles, so a partial section only overrides the keys it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ThemeOverrides")]
pub struct Theme {
    pub overlay: StyleMap,
    pub overlay_legacy: StyleMap,
    pub overlay_legacy_center: StyleMap,
    pub spotlight: StyleMap,
    pub spotlight_legacy: StyleMap,
}

/// Theme sections as written in config, before merging over the defaults
#[derive(Default, Deserialize)]
#[serde(default)]
struct ThemeOverrides {
    overlay: StyleMap,
    overlay_legacy: StyleMap,
    overlay_legacy_center: StyleMap,
    spotlight: StyleMap,
    spotlight_legacy: StyleMap,
}

impl From<ThemeOverrides> for Theme {
    fn from(overrides: ThemeOverrides) -> Self {
        let mut theme = Theme::default();
        theme.overlay.extend(overrides.overlay);
        theme.overlay_legacy.extend(overrides.overlay_legacy);
        theme.overlay_legacy_center.extend(overrides.overlay_legacy_center);
        theme.spotlight.extend(overrides.spotlight);
        theme.spotlight_legacy.extend(overrides.spotlight_legacy);
        theme
    }
}

impl Theme {
    /// Build the stock theme for a given overlay color and stacking index
    pub fn with_overlay_color(overlay_color: &str, z_index: f64) -> Self {
        let overlay_base = style_map([
            ("bottom", StyleValue::Number(0.0)),
            ("left", StyleValue::Number(0.0)),
            ("overflow", "hidden".into()),
            ("position", "absolute".into()),
            ("right", StyleValue::Number(0.0)),
            ("top", StyleValue::Number(0.0)),
            ("zIndex", StyleValue::Number(z_index)),
        ]);
        let spotlight_base = style_map([
            ("borderRadius", StyleValue::Number(4.0)),
            ("position", "absolute".into()),
        ]);

        let mut overlay = overlay_base.clone();
        overlay.insert("backgroundColor".into(), overlay_color.into());
        overlay.insert("mixBlendMode".into(), "hard-light".into());

        let mut overlay_legacy_center = overlay_base.clone();
        overlay_legacy_center.insert("backgroundColor".into(), overlay_color.into());

        let mut spotlight = spotlight_base.clone();
        spotlight.insert("backgroundColor".into(), "gray".into());

        let mut spotlight_legacy = spotlight_base;
        spotlight_legacy.insert(
            "boxShadow".into(),
            format!("0 0 0 9999px {}, {}", overlay_color, SPOTLIGHT_SHADOW).into(),
        );

        Self {
            overlay,
            overlay_legacy: overlay_base,
            overlay_legacy_center,
            spotlight,
            spotlight_legacy,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::with_overlay_color(OVERLAY_COLOR, OVERLAY_Z_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_table() {
        assert_eq!(PaddingSize::Small.padding(), (4.0, 8.0));
        assert_eq!(PaddingSize::Mid.padding(), (8.0, 12.0));
        assert_eq!(PaddingSize::Large.padding(), (12.0, 16.0));
        assert_eq!(PaddingSize::Default.padding(), (8.0, 12.0));
    }

    #[test]
    fn test_only_tooltip_is_active() {
        assert!(LifecyclePhase::Tooltip.is_active());
        assert!(!LifecyclePhase::Beacon.is_active());
        assert!(!LifecyclePhase::Complete.is_active());
    }

    #[test]
    fn test_options_defaults_from_empty_toml() {
        let options: SpotlightOptions = toml::from_str("").unwrap();
        assert_eq!(options, SpotlightOptions::default());
        assert_eq!(options.spotlight_padding, 10.0);
    }

    #[test]
    fn test_options_parse_enums() {
        let options: SpotlightOptions = toml::from_str(
            r#"
            padding_size = "small"
            placement = "top-start"
            group = true
            "#,
        )
        .unwrap();
        assert_eq!(options.padding_size, PaddingSize::Small);
        assert_eq!(options.placement, Placement::TopStart);
        assert!(options.group);
        assert!(!options.spotlight_clicks);
    }

    #[test]
    fn test_default_theme_overlay() {
        let theme = Theme::default();
        assert_eq!(
            theme.overlay.get("mixBlendMode"),
            Some(&StyleValue::Text("hard-light".into()))
        );
        assert_eq!(
            theme.overlay.get("zIndex").and_then(StyleValue::as_number),
            Some(100.0)
        );
        assert!(!theme.overlay_legacy.contains_key("backgroundColor"));
        assert!(theme.overlay_legacy_center.contains_key("backgroundColor"));
        assert!(
            theme.spotlight_legacy["boxShadow"]
                .as_text()
                .unwrap()
                .starts_with("0 0 0 9999px rgba(0, 0, 0, 0.5)")
        );
    }

    #[test]
    fn test_theme_partial_override() {
        let theme: Theme = toml::from_str(
            r#"
            [spotlight]
            backgroundColor = "white"
            borderRadius = 8
            "#,
        )
        .unwrap();
        assert_eq!(theme.spotlight["borderRadius"], StyleValue::Number(8.0));
        assert_eq!(theme.spotlight["backgroundColor"], StyleValue::Text("white".into()));
        // Keys not named keep their stock values
        assert_eq!(theme.spotlight["position"], StyleValue::Text("absolute".into()));
        assert_eq!(theme.spotlight.len(), Theme::default().spotlight.len());
        // Sections not mentioned keep their defaults
        assert_eq!(theme.overlay, Theme::default().overlay);
    }
}
