//! Spotlight overlay CLI
//!
//! - `rects`: print the spotlight rectangles of a scene
//! - `replay`: run the scene timeline on a virtual clock
//! - `preview`: render the overlay of a scene to PNG

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use spotlight::{CliError, Scene, load_scene, logging, replay};
use spotlight_core::types::LifecyclePhase;
use spotlight_core::{OverlayState, RectRequest, compose, compute_rectangles};
use spotlight_overlay::{Viewport, render_preview, save_png};

// ═══════════════════════════════════════════════════════════════════════════════
// CLI Arguments
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug)]
#[command(name = "spotlight")]
#[command(about = "Compute, replay and preview guided-tour spotlight overlays")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the spotlight rectangles of a scene as JSON
    Rects {
        /// Path to the scene file
        scene: PathBuf,
    },
    /// Replay the scene timeline and print the state transitions
    Replay {
        /// Path to the scene file
        scene: PathBuf,

        /// Virtual time to let pass after the last event
        #[arg(long, default_value_t = 500)]
        tail_ms: u64,
    },
    /// Render the scene's overlay to a PNG file
    Preview {
        /// Path to the scene file
        scene: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn main() -> ExitCode {
    logging::init();
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Commands::Rects { scene } => {
            let scene = load_scene(&scene)?;
            let request = RectRequest::from_options(&scene.options, true);
            let rects = compute_rectangles(&scene.document, &scene.target, &request);
            print_json(&rects, args.pretty)
        }
        Commands::Replay { scene, tail_ms } => {
            let scene = load_scene(&scene)?;
            let report = replay(&scene, Duration::from_millis(tail_ms));
            print_json(&report, args.pretty)
        }
        Commands::Preview { scene: path, out } => preview(&path, &out),
    }
}

fn preview(path: &Path, out: &Path) -> Result<(), CliError> {
    let scene: Scene = load_scene(path)?;
    let props = scene.props(LifecyclePhase::Tooltip);
    let visual = compose(&scene.document, &scene.environment, &props, &OverlayState::default())
        .ok_or_else(|| CliError::NothingToRender {
            path: path.to_path_buf(),
        })?;

    let viewport = Viewport::new(scene.viewport.width, scene.viewport.height)
        .with_scroll(scene.document.scroll.y);
    let pixmap = render_preview(&visual, &viewport)?;
    save_png(&pixmap, out)?;

    tracing::info!(out = %out.display(), "preview written");
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}
