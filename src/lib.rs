//! Command-line front end for the spotlight overlay engine
//!
//! Loads scene files, computes rectangles, replays event timelines and
//! renders previews.

pub mod error;
pub mod logging;
pub mod replay;
pub mod scene;

pub use error::CliError;
pub use replay::{ReplayReport, Transition, replay};
pub use scene::{Action, Scene, SceneError, TimelineEvent, ViewportSize, load_scene};
