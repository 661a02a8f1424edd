//! Listener and timer handles owned by the coordinator

use std::time::Duration;

use super::host::{Host, ListenerId, ListenerKind, TimerId};

/// Timeouts the coordinator schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Grace period after entering the active phase
    Settle,
    /// Quiet period that ends a scroll burst
    ScrollDebounce,
    /// Quiet period that ends a resize burst
    ResizeDebounce,
}

impl TimerKind {
    pub fn delay(&self) -> Duration {
        match self {
            TimerKind::Settle => Duration::from_millis(100),
            TimerKind::ScrollDebounce => Duration::from_millis(50),
            TimerKind::ResizeDebounce => Duration::from_millis(100),
        }
    }
}

/// Every host resource held for the active phase.
///
/// Acquired piecewise, released as a whole. Nothing here survives
/// [`ResourceBundle::release`].
#[derive(Debug, Default)]
pub struct ResourceBundle {
    scroll: Option<ListenerId>,
    resize: Option<ListenerId>,
    pointer_move: Option<ListenerId>,
    settle: Option<TimerId>,
    scroll_debounce: Option<TimerId>,
    resize_debounce: Option<TimerId>,
}

impl ResourceBundle {
    fn listener_slot(&mut self, kind: &ListenerKind) -> &mut Option<ListenerId> {
        match kind {
            ListenerKind::Scroll { .. } => &mut self.scroll,
            ListenerKind::Resize => &mut self.resize,
            ListenerKind::PointerMove => &mut self.pointer_move,
        }
    }

    fn timer_slot(&mut self, kind: TimerKind) -> &mut Option<TimerId> {
        match kind {
            TimerKind::Settle => &mut self.settle,
            TimerKind::ScrollDebounce => &mut self.scroll_debounce,
            TimerKind::ResizeDebounce => &mut self.resize_debounce,
        }
    }

    /// Attach a listener unless one of the same kind is already held
    pub fn listen<H: Host + ?Sized>(&mut self, host: &mut H, kind: ListenerKind) -> bool {
        let slot = self.listener_slot(&kind);
        if slot.is_some() {
            return false;
        }
        *slot = Some(host.add_listener(kind));
        tracing::debug!(?kind, "listener attached");
        true
    }

    /// Detach the listener of this kind, if held
    pub fn unlisten<H: Host + ?Sized>(&mut self, host: &mut H, kind: ListenerKind) -> bool {
        match self.listener_slot(&kind).take() {
            Some(id) => {
                host.remove_listener(id);
                tracing::debug!(?kind, "listener detached");
                true
            }
            None => false,
        }
    }

    pub fn is_listening(&self, kind: &ListenerKind) -> bool {
        match kind {
            ListenerKind::Scroll { .. } => self.scroll.is_some(),
            ListenerKind::Resize => self.resize.is_some(),
            ListenerKind::PointerMove => self.pointer_move.is_some(),
        }
    }

    /// (Re)start a timer: any pending timer of the same kind is superseded
    pub fn restart_timer<H: Host + ?Sized>(&mut self, host: &mut H, kind: TimerKind) {
        let slot = self.timer_slot(kind);
        if let Some(previous) = slot.take() {
            host.clear_timeout(previous);
        }
        *slot = Some(host.set_timeout(kind.delay()));
    }

    /// Claim a fired timer. Returns `None` for ids this bundle doesn't hold
    /// (superseded, cancelled or foreign timers).
    pub fn take_fired(&mut self, id: TimerId) -> Option<TimerKind> {
        [
            TimerKind::Settle,
            TimerKind::ScrollDebounce,
            TimerKind::ResizeDebounce,
        ]
        .into_iter()
        .find(|&kind| {
            let slot = self.timer_slot(kind);
            if *slot == Some(id) {
                *slot = None;
                true
            } else {
                false
            }
        })
    }

    /// Detach every listener and cancel every pending timer
    pub fn release<H: Host + ?Sized>(&mut self, host: &mut H) {
        let listeners = [
            self.scroll.take(),
            self.resize.take(),
            self.pointer_move.take(),
        ];
        for id in listeners.into_iter().flatten() {
            host.remove_listener(id);
        }

        let timers = [
            self.settle.take(),
            self.scroll_debounce.take(),
            self.resize_debounce.take(),
        ];
        for id in timers.into_iter().flatten() {
            host.clear_timeout(id);
        }
        tracing::debug!("resource bundle released");
    }

    /// Nothing attached and nothing pending
    pub fn is_empty(&self) -> bool {
        self.scroll.is_none()
            && self.resize.is_none()
            && self.pointer_move.is_none()
            && self.settle.is_none()
            && self.scroll_debounce.is_none()
            && self.resize_debounce.is_none()
    }
}
