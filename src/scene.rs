//! Scene files
//!
//! A scene bundles everything needed to exercise the overlay outside a
//! browser: a static document, the environment, options, theme, the target
//! and an optional timeline of host events.
//!
//! ```toml
//! target = "#hero"
//! phase = "tooltip"
//!
//! [options]
//! padding_size = "small"
//!
//! [environment]
//! engine = "safari"
//!
//! [[document.elements]]
//! id = 1
//! selectors = ["#hero"]
//! rect = { x = 100, y = 200, width = 50, height = 30 }
//!
//! [[timeline]]
//! at_ms = 20
//! kind = "scroll"
//! y = 150
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spotlight_core::types::{LifecyclePhase, SpotlightOptions, Theme};
use spotlight_core::{ElementId, OverlayProps, StaticDocument, StaticEnvironment, Target};
use thiserror::Error;

/// Errors while loading a scene
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scene TOML in {path}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("element {id} referenced by {referenced_by} does not exist")]
    UnknownElement { id: u32, referenced_by: String },

    #[error("element id {id} is used more than once")]
    DuplicateElement { id: u32 },
}

/// Viewport size used for previews
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 800,
        }
    }
}

/// A host event at a virtual time offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Milliseconds since mount
    pub at_ms: u64,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// The tour moves to another phase
    Phase { phase: LifecyclePhase },
    /// A scroll event; `y` scrolls the page first
    Scroll {
        #[serde(default)]
        y: Option<f64>,
    },
    Resize,
    /// Pointer at viewport coordinates
    Pointer { x: f64, y: f64 },
    Unmount,
}

fn default_phase() -> LifecyclePhase {
    LifecyclePhase::Tooltip
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub target: Target,
    #[serde(default = "default_phase")]
    pub phase: LifecyclePhase,
    #[serde(default)]
    pub options: SpotlightOptions,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub environment: StaticEnvironment,
    #[serde(default)]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub document: StaticDocument,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

impl Scene {
    /// Parse and validate a scene
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, SceneError> {
        let scene: Scene = toml::from_str(content).map_err(|source| SceneError::ParseToml {
            path: path.to_path_buf(),
            source,
        })?;
        scene.validate()?;
        Ok(scene)
    }

    /// Overlay props at the given phase
    pub fn props(&self, phase: LifecyclePhase) -> OverlayProps {
        OverlayProps {
            phase,
            target: self.target.clone(),
            options: self.options.clone(),
            theme: self.theme.clone(),
        }
    }

    /// Check that every element reference points at a declared element
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut ids = HashSet::new();
        for element in &self.document.elements {
            if !ids.insert(element.id) {
                return Err(SceneError::DuplicateElement { id: element.id.0 });
            }
        }

        for element in &self.document.elements {
            match element.parent {
                Some(parent) if !ids.contains(&parent) => {
                    return Err(SceneError::UnknownElement {
                        id: parent.0,
                        referenced_by: format!("element {}", element.id.0),
                    });
                }
                _ => {}
            }
        }

        let mut referenced = Vec::new();
        collect_element_refs(&self.target, &mut referenced);
        if let Some(missing) = referenced.into_iter().find(|id| !ids.contains(id)) {
            return Err(SceneError::UnknownElement {
                id: missing.0,
                referenced_by: "target".to_string(),
            });
        }
        Ok(())
    }
}

fn collect_element_refs(target: &Target, out: &mut Vec<ElementId>) {
    match target {
        Target::Selector(_) => {}
        Target::Element(id) => out.push(*id),
        Target::List(items) => items.iter().for_each(|t| collect_element_refs(t, out)),
    }
}

/// Load and validate a scene file
pub fn load_scene(path: &Path) -> Result<Scene, SceneError> {
    let content = std::fs::read_to_string(path).map_err(|source| SceneError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let scene = Scene::from_toml_str(&content, path)?;
    tracing::debug!(
        path = %path.display(),
        elements = scene.document.elements.len(),
        events = scene.timeline.len(),
        "loaded scene"
    );
    Ok(scene)
}
