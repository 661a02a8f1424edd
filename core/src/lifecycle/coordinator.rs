//! Lifecycle coordinator
//!
//! Owns [`OverlayState`] and the host resources of the active phase. All
//! mutation happens through the transitions below, on the host's single
//! dispatch thread.

use serde::{Deserialize, Serialize};
use spotlight_types::{LifecyclePhase, SpotlightOptions, Theme};

use super::host::{Host, ListenerKind, TimerId};
use super::resources::{ResourceBundle, TimerKind};
use crate::compose::{Environment, OverlayVisual, compose};
use crate::dom::{CssPosition, Document, PointerPosition, ScrollAnchor, Target};
use crate::geometry::{has_custom_scroll_parent, has_position, scroll_parent};
use crate::spotlight::{
    RectRequest, SpotlightRect, compute_rectangles, is_pointer_inside_any_spotlight,
};

/// Everything the surrounding tour passes to the overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayProps {
    #[serde(default)]
    pub phase: LifecyclePhase,
    pub target: Target,
    #[serde(default)]
    pub options: SpotlightOptions,
    #[serde(default)]
    pub theme: Theme,
}

impl OverlayProps {
    pub fn new(target: impl Into<Target>) -> Self {
        Self {
            phase: LifecyclePhase::Init,
            target: target.into(),
            options: SpotlightOptions::default(),
            theme: Theme::default(),
        }
    }

    pub fn with_phase(mut self, phase: LifecyclePhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_options(mut self, options: SpotlightOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether the pointer-move listener should be attached
    fn wants_pointer_tracking(&self) -> bool {
        self.options.spotlight_clicks && self.phase.is_active()
    }
}

/// Mutable overlay state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayState {
    pub mouse_over_spotlight: bool,
    pub is_scrolling: bool,
    pub show_spotlight: bool,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            mouse_over_spotlight: false,
            is_scrolling: false,
            show_spotlight: true,
        }
    }
}

/// Signals the host delivers for attached listeners and scheduled timers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Scroll,
    Resize,
    PointerMove(PointerPosition),
    Timer(TimerId),
}

/// Drives one mounted overlay
#[derive(Debug)]
pub struct SpotlightCoordinator {
    props: OverlayProps,
    state: OverlayState,
    /// Cached at mount, valid until unmount
    scroll_anchor: ScrollAnchor,
    resources: ResourceBundle,
    alive: bool,
}

impl SpotlightCoordinator {
    /// Mount the overlay: discover and cache the scroll anchor, then enter the
    /// active phase right away if the tour is already showing its tooltip.
    pub fn mount<D, H>(props: OverlayProps, doc: &D, host: &mut H) -> Self
    where
        D: Document + ?Sized,
        H: Host + ?Sized,
    {
        let options = &props.options;
        let element = props.target.resolve(doc).first().copied();
        let scroll_anchor = scroll_parent(doc, element, options.disable_scroll_parent_fix);

        if !options.disable_scrolling
            && options.debug
            && has_custom_scroll_parent(doc, element, true)
        {
            tracing::warn!(
                parent = ?scroll_anchor,
                "step has a custom scroll parent and can cause trouble with scrolling"
            );
        }

        let mut coordinator = Self {
            props,
            state: OverlayState::default(),
            scroll_anchor,
            resources: ResourceBundle::default(),
            alive: true,
        };
        tracing::debug!(anchor = ?coordinator.scroll_anchor, "overlay mounted");

        if coordinator.props.phase.is_active() {
            coordinator.on_enter_active_phase(host);
        }
        coordinator
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn props(&self) -> &OverlayProps {
        &self.props
    }

    pub fn scroll_anchor(&self) -> ScrollAnchor {
        self.scroll_anchor
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply new props, firing phase transitions and pointer-listener changes
    pub fn update<H: Host + ?Sized>(&mut self, props: OverlayProps, host: &mut H) {
        if !self.alive {
            return;
        }
        let previous = std::mem::replace(&mut self.props, props);
        let was_active = previous.phase.is_active();
        let is_active = self.props.phase.is_active();

        match (was_active, is_active) {
            (false, true) => self.on_enter_active_phase(host),
            (true, false) => self.on_exit_active_phase(host),
            _ => self.sync_pointer_listener(host),
        }
    }

    /// Acquire the active-phase resources and start the settle timer
    pub fn on_enter_active_phase<H: Host + ?Sized>(&mut self, host: &mut H) {
        if !self.alive {
            return;
        }
        tracing::debug!("entering active phase");
        self.resources.listen(host, self.scroll_listener());
        self.resources.listen(host, ListenerKind::Resize);
        self.resources.restart_timer(host, TimerKind::Settle);
        self.sync_pointer_listener(host);
    }

    /// Release every active-phase resource.
    ///
    /// Transient flags are cleared since the timers that would have cleared
    /// them are gone. After unmount only the release happens.
    pub fn on_exit_active_phase<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.resources.release(host);
        if !self.alive {
            return;
        }
        tracing::debug!("leaving active phase");
        self.state.is_scrolling = false;
        self.state.mouse_over_spotlight = false;
    }

    /// Tear down for good. Every later call is a no-op.
    pub fn unmount<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.alive = false;
        self.resources.release(host);
        tracing::debug!("overlay unmounted");
    }

    /// Handle a host signal
    pub fn on_signal<D, H>(&mut self, signal: Signal, doc: &D, host: &mut H)
    where
        D: Document + ?Sized,
        H: Host + ?Sized,
    {
        if !self.alive {
            tracing::trace!(?signal, "signal after unmount ignored");
            return;
        }

        match signal {
            Signal::Scroll => {
                if self.resources.is_listening(&self.scroll_listener()) {
                    self.handle_scroll(doc, host);
                }
            }
            Signal::Resize => {
                if self.resources.is_listening(&ListenerKind::Resize) {
                    self.resources.restart_timer(host, TimerKind::ResizeDebounce);
                }
            }
            Signal::PointerMove(pointer) => {
                if self.resources.is_listening(&ListenerKind::PointerMove) {
                    self.handle_pointer_move(&pointer, doc, host);
                }
            }
            Signal::Timer(id) => match self.resources.take_fired(id) {
                Some(TimerKind::Settle) => {
                    if !self.state.is_scrolling {
                        self.update_state(host, |s| s.show_spotlight = true);
                    }
                }
                Some(TimerKind::ScrollDebounce) => self.update_state(host, |s| {
                    s.is_scrolling = false;
                    s.show_spotlight = true;
                }),
                Some(TimerKind::ResizeDebounce) => host.request_render(),
                None => tracing::trace!(?id, "stale timer ignored"),
            },
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// Rectangles for the current props and state
    pub fn spotlight_rects<D: Document + ?Sized>(&self, doc: &D) -> Vec<SpotlightRect> {
        let request = RectRequest::from_options(&self.props.options, self.state.show_spotlight);
        compute_rectangles(doc, &self.props.target, &request)
    }

    /// Compose the visual tree for the current props and state
    pub fn render<D, E>(&self, doc: &D, env: &E) -> Option<OverlayVisual>
    where
        D: Document + ?Sized,
        E: Environment + ?Sized,
    {
        if !self.alive {
            return None;
        }
        compose(doc, env, &self.props, &self.state)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Handlers
    // ─────────────────────────────────────────────────────────────────────────

    fn scroll_listener(&self) -> ListenerKind {
        ListenerKind::Scroll {
            anchor: self.scroll_anchor,
            passive: true,
        }
    }

    fn sync_pointer_listener<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.alive && self.props.wants_pointer_tracking() {
            self.resources.listen(host, ListenerKind::PointerMove);
        } else {
            self.resources.unlisten(host, ListenerKind::PointerMove);
        }
    }

    fn handle_scroll<D, H>(&mut self, doc: &D, host: &mut H)
    where
        D: Document + ?Sized,
        H: Host + ?Sized,
    {
        if !self.scroll_anchor.is_document() {
            // Hide immediately, show again once the burst settles
            if !self.state.is_scrolling {
                self.update_state(host, |s| {
                    s.is_scrolling = true;
                    s.show_spotlight = false;
                });
            }
            self.resources.restart_timer(host, TimerKind::ScrollDebounce);
            return;
        }

        // Sticky targets move without a resize, so recompute on page scroll
        let has_sticky = self
            .props
            .target
            .resolve(doc)
            .into_iter()
            .any(|el| has_position(doc, el, CssPosition::Sticky));
        if has_sticky {
            host.request_render();
        }
    }

    fn handle_pointer_move<D, H>(&mut self, pointer: &PointerPosition, doc: &D, host: &mut H)
    where
        D: Document + ?Sized,
        H: Host + ?Sized,
    {
        let rects = self.spotlight_rects(doc);
        let inside = is_pointer_inside_any_spotlight(pointer, &rects);
        if inside != self.state.mouse_over_spotlight {
            self.update_state(host, |s| s.mouse_over_spotlight = inside);
        }
    }

    /// Apply a state change and request a render if anything changed
    fn update_state<H, F>(&mut self, host: &mut H, change: F)
    where
        H: Host + ?Sized,
        F: FnOnce(&mut OverlayState),
    {
        if !self.alive {
            return;
        }
        let mut next = self.state;
        change(&mut next);
        if next != self.state {
            tracing::debug!(from = ?self.state, to = ?next, "overlay state changed");
            self.state = next;
            host.request_render();
        }
    }
}
