//! Scene timeline replay
//!
//! Mounts a coordinator against the scene's document, then feeds the timeline
//! through a [`VirtualHost`]: the clock advances to each event, due timers
//! fire on the way, and every state change is recorded.

use std::time::Duration;

use serde::Serialize;
use spotlight_core::{
    OverlayState, OverlayVisual, PointerPosition, Signal, SpotlightCoordinator, SpotlightRect,
    StaticDocument, VirtualHost,
};

use crate::scene::{Action, Scene};

/// One observed state change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub at_ms: u64,
    /// What caused it (`mount`, `timer`, or the timeline action kind)
    pub cause: String,
    pub state: OverlayState,
}

/// Result of a replay
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub transitions: Vec<Transition>,
    pub render_requests: usize,
    pub final_state: OverlayState,
    pub rects: Vec<SpotlightRect>,
    pub overlay: Option<OverlayVisual>,
    /// Listeners still attached at the end
    pub listeners: usize,
    /// Timers still pending at the end
    pub pending_timers: usize,
}

struct Recorder {
    transitions: Vec<Transition>,
    last: OverlayState,
}

impl Recorder {
    fn observe(&mut self, now: Duration, cause: &str, state: OverlayState) {
        if state != self.last {
            tracing::info!(at_ms = now.as_millis() as u64, cause, ?state, "state changed");
            self.transitions.push(Transition {
                at_ms: now.as_millis() as u64,
                cause: cause.to_string(),
                state,
            });
            self.last = state;
        }
    }
}

/// Replay the scene timeline, then let `tail` of virtual time pass so pending
/// timers settle.
pub fn replay(scene: &Scene, tail: Duration) -> ReplayReport {
    let mut doc: StaticDocument = scene.document.clone();
    let mut host = VirtualHost::new();
    let mut props = scene.props(scene.phase);
    let mut coordinator = SpotlightCoordinator::mount(props.clone(), &doc, &mut host);

    let mut recorder = Recorder {
        transitions: vec![Transition {
            at_ms: 0,
            cause: "mount".to_string(),
            state: coordinator.state(),
        }],
        last: coordinator.state(),
    };

    let mut timeline = scene.timeline.clone();
    timeline.sort_by_key(|event| event.at_ms);

    for event in &timeline {
        let at = Duration::from_millis(event.at_ms);
        advance_to(&mut coordinator, &mut host, &doc, &mut recorder, at);

        let cause = match &event.action {
            Action::Phase { phase } => {
                props.phase = *phase;
                coordinator.update(props.clone(), &mut host);
                "phase"
            }
            Action::Scroll { y } => {
                if let Some(y) = y {
                    doc.scroll_page_to(*y);
                }
                coordinator.on_signal(Signal::Scroll, &doc, &mut host);
                "scroll"
            }
            Action::Resize => {
                coordinator.on_signal(Signal::Resize, &doc, &mut host);
                "resize"
            }
            Action::Pointer { x, y } => {
                let pointer = PointerPosition::from_client(*x, *y, doc.scroll);
                coordinator.on_signal(Signal::PointerMove(pointer), &doc, &mut host);
                "pointer"
            }
            Action::Unmount => {
                coordinator.unmount(&mut host);
                "unmount"
            }
        };
        recorder.observe(host.now(), cause, coordinator.state());
    }

    let end = host.now() + tail;
    advance_to(&mut coordinator, &mut host, &doc, &mut recorder, end);

    ReplayReport {
        transitions: recorder.transitions,
        render_requests: host.render_requests(),
        final_state: coordinator.state(),
        rects: coordinator.spotlight_rects(&doc),
        overlay: coordinator.render(&doc, &scene.environment),
        listeners: host.listeners().len(),
        pending_timers: host.pending_timers(),
    }
}

fn advance_to(
    coordinator: &mut SpotlightCoordinator,
    host: &mut VirtualHost,
    doc: &StaticDocument,
    recorder: &mut Recorder,
    at: Duration,
) {
    let by = at.saturating_sub(host.now());
    host.advance(by, |host, id| {
        coordinator.on_signal(Signal::Timer(id), doc, host);
        recorder.observe(host.now(), "timer", coordinator.state());
    });
}
