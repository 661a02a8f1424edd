//! Overlay lifecycle
//!
//! This module provides:
//! - **Host**: the listener/timer capabilities the overlay borrows from its
//!   environment, plus a virtual-clock implementation
//! - **Resources**: the bundle of listener and timer handles held while active
//! - **Coordinator**: the state machine that reacts to phase changes and
//!   scroll/resize/pointer signals
//!
//! # Timers
//!
//! | timer | delay | effect |
//! |-------|-------|--------|
//! | settle | 100 ms | show the spotlight unless mid-scroll |
//! | scroll debounce | 50 ms | end of scroll burst, show again |
//! | resize debounce | 100 ms | request a recomputation |

mod coordinator;
mod host;
mod resources;


pub use coordinator::{OverlayProps, OverlayState, Signal, SpotlightCoordinator};
pub use host::{Host, ListenerId, ListenerKind, TimerId, VirtualHost};
pub use resources::{ResourceBundle, TimerKind};
