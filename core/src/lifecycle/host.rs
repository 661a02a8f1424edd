//! Host signal and timer wiring
//!
//! The coordinator never touches the event loop directly. It asks the host
//! to attach listeners and schedule timeouts, and the host later delivers the
//! matching [`Signal`](super::Signal)s back.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::dom::ScrollAnchor;

/// Handle to an attached listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Handle to a scheduled timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// What a listener is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    /// Scroll events on the anchor. Passive listeners never block scrolling.
    Scroll { anchor: ScrollAnchor, passive: bool },
    /// Window resize
    Resize,
    /// Window pointer movement
    PointerMove,
}

/// Event-loop capabilities the coordinator needs from its host
pub trait Host {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId;

    fn remove_listener(&mut self, id: ListenerId);

    /// Schedule a one-shot timeout; the host delivers `Signal::Timer(id)`
    /// when it elapses.
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Cancel a timeout. Unknown or already fired ids are ignored.
    fn clear_timeout(&mut self, id: TimerId);

    /// Ask for a fresh render pass (rectangles are recomputed from scratch)
    fn request_render(&mut self);
}

/// Deterministic host driven by a virtual clock.
///
/// Timers fire only while [`VirtualHost::advance`] is running, in deadline
/// order (ties by scheduling order).
#[derive(Debug, Default)]
pub struct VirtualHost {
    now: Duration,
    next_id: u64,
    listeners: BTreeMap<ListenerId, ListenerKind>,
    timers: BTreeMap<TimerId, Duration>,
    render_requests: usize,
}

impl VirtualHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Attached listeners in attachment order
    pub fn listeners(&self) -> Vec<ListenerKind> {
        self.listeners.values().copied().collect()
    }

    /// Number of attached listeners matching a predicate
    pub fn count_listeners(&self, matches: impl Fn(&ListenerKind) -> bool) -> usize {
        self.listeners.values().filter(|kind| matches(kind)).count()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn render_requests(&self) -> usize {
        self.render_requests
    }

    /// Read and reset the render request counter
    pub fn take_render_requests(&mut self) -> usize {
        std::mem::take(&mut self.render_requests)
    }

    /// Advance the clock by `by`, firing every timer that comes due.
    ///
    /// `on_fire` receives the host back so handlers can schedule or cancel
    /// timers; anything newly scheduled inside the window also fires.
    pub fn advance(&mut self, by: Duration, mut on_fire: impl FnMut(&mut Self, TimerId)) {
        let target = self.now + by;
        while let Some((id, deadline)) = self.next_due(target) {
            self.timers.remove(&id);
            self.now = deadline;
            on_fire(self, id);
        }
        self.now = target;
    }

    fn next_due(&self, until: Duration) -> Option<(TimerId, Duration)> {
        self.timers
            .iter()
            .filter(|(_, deadline)| **deadline <= until)
            .min_by_key(|(id, deadline)| (**deadline, **id))
            .map(|(id, deadline)| (*id, *deadline))
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl Host for VirtualHost {
    fn add_listener(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        self.listeners.remove(&id);
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id());
        self.timers.insert(id, self.now + delay);
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn request_render(&mut self) {
        self.render_requests += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_timers_fire_in_deadline_order() {
        let mut host = VirtualHost::new();
        let late = host.set_timeout(ms(100));
        let early = host.set_timeout(ms(50));

        let mut fired = Vec::new();
        host.advance(ms(200), |host, id| fired.push((id, host.now())));
        assert_eq!(fired, vec![(early, ms(50)), (late, ms(100))]);
        assert_eq!(host.now(), ms(200));
        assert_eq!(host.pending_timers(), 0);
    }

    #[test]
    fn test_cleared_timer_never_fires() {
        let mut host = VirtualHost::new();
        let id = host.set_timeout(ms(10));
        host.clear_timeout(id);
        host.advance(ms(20), |_, _| panic!("cleared timer fired"));
    }

    #[test]
    fn test_timer_scheduled_during_advance_fires_in_window() {
        let mut host = VirtualHost::new();
        host.set_timeout(ms(10));
        let mut count = 0;
        host.advance(ms(30), |host, _| {
            count += 1;
            if count == 1 {
                host.set_timeout(ms(10));
            }
        });
        assert_eq!(count, 2);
    }

    #[test]
    fn test_listeners_tracked() {
        let mut host = VirtualHost::new();
        let resize = host.add_listener(ListenerKind::Resize);
        host.add_listener(ListenerKind::PointerMove);
        assert_eq!(host.listeners().len(), 2);
        host.remove_listener(resize);
        assert_eq!(host.listeners(), vec![ListenerKind::PointerMove]);
    }
}
