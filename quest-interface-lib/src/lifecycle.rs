//! Activity lifecycle states and the transitions between them.
//!
//! The host framework drives the order create → (resume ↔ pause)* → destroy.
//! `LifecycleState::apply` is the single place that decides whether an event
//! is acceptable in the current state.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{Error, Result};

/// State values stored in [`StateCell`]
/// - 0 (UNINITIALIZED): process started, no create yet
/// - 1 (CREATED): create received
/// - 2 (RUNNING): in the foreground
/// - 3 (PAUSED): out of the foreground
/// - 4 (DESTROYED): terminal
pub const STATE_UNINITIALIZED: u8 = 0;
pub const STATE_CREATED: u8 = 1;
pub const STATE_RUNNING: u8 = 2;
pub const STATE_PAUSED: u8 = 3;
pub const STATE_DESTROYED: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Uninitialized,
    Created,
    Running,
    Paused,
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    Create,
    Resume,
    Pause,
    Destroy,
}

impl LifecycleState {
    /// Returns the state reached by applying `event`, or an error if the host
    /// delivered the event out of order.
    pub fn apply(self, event: LifecycleEvent) -> Result<LifecycleState> {
        use LifecycleEvent::*;
        use LifecycleState::*;

        let next = match (self, event) {
            (Uninitialized, Create) => Created,
            (Created, Resume) | (Paused, Resume) => Running,
            (Running, Pause) => Paused,
            (Created, Destroy) | (Paused, Destroy) => Destroyed,
            (from, event) => return Err(Error::InvalidTransition { from, event }),
        };
        Ok(next)
    }

    pub fn is_destroyed(self) -> bool {
        self == LifecycleState::Destroyed
    }

    pub(crate) fn as_u8(self) -> u8 {
        match self {
            LifecycleState::Uninitialized => STATE_UNINITIALIZED,
            LifecycleState::Created => STATE_CREATED,
            LifecycleState::Running => STATE_RUNNING,
            LifecycleState::Paused => STATE_PAUSED,
            LifecycleState::Destroyed => STATE_DESTROYED,
        }
    }

    pub(crate) fn from_u8(value: u8) -> Option<Self> {
        match value {
            STATE_UNINITIALIZED => Some(LifecycleState::Uninitialized),
            STATE_CREATED => Some(LifecycleState::Created),
            STATE_RUNNING => Some(LifecycleState::Running),
            STATE_PAUSED => Some(LifecycleState::Paused),
            STATE_DESTROYED => Some(LifecycleState::Destroyed),
            _ => None,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LifecycleState::Uninitialized => "uninitialized",
            LifecycleState::Created => "created",
            LifecycleState::Running => "running",
            LifecycleState::Paused => "paused",
            LifecycleState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

impl LifecycleEvent {
    /// Name of the engine symbol this event is forwarded to.
    pub fn entry_point(self) -> &'static str {
        match self {
            LifecycleEvent::Create => "questNativeOnCreate",
            LifecycleEvent::Resume => "questNativeOnResume",
            LifecycleEvent::Pause => "questNativeOnPause",
            LifecycleEvent::Destroy => "questNativeOnDestroy",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            LifecycleEvent::Create => "create",
            LifecycleEvent::Resume => "resume",
            LifecycleEvent::Pause => "pause",
            LifecycleEvent::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

/// Atomic holder for the observed lifecycle state.
///
/// Shared between the bridge and the post-load hooks it posts, so a hook can
/// see whether destroy already happened when it finally runs.
#[derive(Debug, Default)]
pub struct StateCell(AtomicU8);

impl StateCell {
    pub fn new() -> Self {
        Self(AtomicU8::new(STATE_UNINITIALIZED))
    }

    pub fn get(&self) -> LifecycleState {
        let raw = self.0.load(Ordering::SeqCst);
        match LifecycleState::from_u8(raw) {
            Some(state) => state,
            // Only `set` writes the cell, and it always stores a valid value.
            None => unreachable!("corrupt lifecycle state byte {}", raw),
        }
    }

    pub fn set(&self, state: LifecycleState) {
        self.0.store(state.as_u8(), Ordering::SeqCst);
    }
}
